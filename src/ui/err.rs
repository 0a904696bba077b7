use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Blocking error panel shown when questions could not be fetched.
pub struct ErrorDisplay<'a> {
    message: &'a str,
}

impl<'a> ErrorDisplay<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for ErrorDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Error fetching questions ")
            .border_style(Style::default().fg(Color::Red));

        let text = vec![
            Line::from(Span::styled(
                format!("Error: {}", self.message),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Yellow).bold()),
                Span::raw(" retry   "),
                Span::styled("m", Style::default().fg(Color::Yellow).bold()),
                Span::raw(" change settings"),
            ]),
        ];

        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::ui::Palette;

/// Read-only text popup, used for the key help.
pub struct TextOverlay {
    title: String,
    content: String,
    dismissed: bool,
}

impl TextOverlay {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            dismissed: false,
        }
    }

    /// Handle a key press. Returns true if the overlay consumed the key.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
                self.dismissed = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Render the overlay content (without centering; that's done by the caller).
    pub fn render_content(&self, area: Rect, buf: &mut Buffer, palette: Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(Span::styled(
                format!(" {} ", self.title),
                palette.title_style(),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        Paragraph::new(self.content.as_str())
            .style(palette.text_style())
            .wrap(Wrap { trim: false })
            .render(layout[0], buf);

        let footer = Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", palette.accent_style()),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .render(layout[1], buf);
    }
}

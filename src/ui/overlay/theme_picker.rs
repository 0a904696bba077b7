use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::Theme;
use crate::ui::Palette;

/// Lists every theme with the active one highlighted in its own colours.
pub struct ThemePicker {
    current: Theme,
}

impl ThemePicker {
    pub fn new(current: Theme) -> Self {
        Self { current }
    }

    pub fn render_content(&self, area: Rect, buf: &mut Buffer) {
        let active = Palette::for_theme(self.current);

        let mut lines: Vec<Line<'_>> = Theme::ALL
            .iter()
            .map(|theme| {
                let swatch = Palette::for_theme(*theme);
                if *theme == self.current {
                    Line::from(vec![
                        Span::styled("▸ ", active.accent_style()),
                        Span::styled(
                            theme.name(),
                            swatch.accent_style().add_modifier(Modifier::REVERSED),
                        ),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(theme.name(), Style::default().fg(swatch.accent)),
                    ])
                }
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Changes apply immediately",
            active.text_style().add_modifier(Modifier::DIM),
        )));

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_to_string;

    #[test]
    fn test_lists_all_themes_and_marks_current() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        ThemePicker::new(Theme::Matrix).render_content(area, &mut buf);

        let content = buffer_to_string(&buf);
        for theme in Theme::ALL {
            assert!(content.contains(theme.name()));
        }
        assert!(content.contains("▸ matrix"));
    }
}

use ratatui::prelude::*;
use ratatui::widgets::Gauge;

use super::Palette;

/// Thin bar showing how far through the quiz the player is.
pub struct ProgressBar {
    position: usize,
    total: usize,
    palette: Palette,
}

impl ProgressBar {
    /// `position` is one-based: the question currently on screen.
    pub fn new(position: usize, total: usize, palette: Palette) -> Self {
        Self {
            position,
            total,
            palette,
        }
    }

    fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.position.min(self.total) as f64) / (self.total as f64)
    }
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let label = format!("{} / {}", self.position.min(self.total), self.total);
        Gauge::default()
            .gauge_style(Style::default().fg(self.palette.accent))
            .ratio(self.ratio())
            .label(Span::styled(label, self.palette.title_style()))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::ui::buffer_to_string;

    fn palette() -> Palette {
        Palette::for_theme(Theme::Default)
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ProgressBar::new(0, 0, palette()).ratio(), 0.0);
        assert_eq!(ProgressBar::new(5, 10, palette()).ratio(), 0.5);
        assert_eq!(ProgressBar::new(12, 10, palette()).ratio(), 1.0);
    }

    #[test]
    fn test_render_label() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        ProgressBar::new(3, 10, palette()).render(area, &mut buf);
        assert!(buffer_to_string(&buf).contains("3 / 10"));
    }
}

use ratatui::prelude::*;
use ratatui::widgets::Tabs;

use super::Palette;

/// The active tab of the in-game menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Gameplay,
    Theme,
}

/// Tab bar for switching between the gameplay form and the theme picker.
pub struct TabbedWindow {
    active_tab: Tab,
    palette: Palette,
}

impl TabbedWindow {
    pub fn new(palette: Palette) -> Self {
        Self {
            active_tab: Tab::Gameplay,
            palette,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn switch_tab(&mut self) {
        self.active_tab = match self.active_tab {
            Tab::Gameplay => Tab::Theme,
            Tab::Theme => Tab::Gameplay,
        };
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }
}

impl Widget for &TabbedWindow {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let selected = match self.active_tab {
            Tab::Gameplay => 0,
            Tab::Theme => 1,
        };

        let tabs = Tabs::new(vec!["Gameplay", "Theme"])
            .select(selected)
            .style(Style::default().fg(self.palette.border))
            .highlight_style(self.palette.title_style())
            .divider("|");

        Widget::render(tabs, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    fn window() -> TabbedWindow {
        TabbedWindow::new(Palette::for_theme(Theme::Default))
    }

    #[test]
    fn test_tabbed_window_default() {
        assert_eq!(window().active_tab(), Tab::Gameplay);
    }

    #[test]
    fn test_tabbed_window_switch() {
        let mut tw = window();
        tw.switch_tab();
        assert_eq!(tw.active_tab(), Tab::Theme);

        tw.switch_tab();
        assert_eq!(tw.active_tab(), Tab::Gameplay);
    }

    #[test]
    fn test_tabbed_window_set_tab() {
        let mut tw = window();
        tw.set_tab(Tab::Theme);
        assert_eq!(tw.active_tab(), Tab::Theme);
    }

    #[test]
    fn test_tabbed_window_render() {
        let tw = window();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        Widget::render(&tw, area, &mut buf);

        let content: String = (0..40)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert!(content.contains("Gameplay"));
        assert!(content.contains("Theme"));
    }
}

use ratatui::prelude::*;

use crate::quiz::Stage;

const START_ITEMS: &[(&str, &str)] = &[
    ("Enter", "Start"),
    ("o", "Options"),
    ("t", "Theme"),
    ("m", "Menu"),
    ("?", "Help"),
    ("q", "Quit"),
];

const QUIZ_ITEMS: &[(&str, &str)] = &[
    ("1-4", "Answer"),
    ("j/k", "Move"),
    ("Enter", "Select"),
    ("m", "Menu"),
    ("q", "Quit"),
];

const FEEDBACK_ITEMS: &[(&str, &str)] = &[("Enter", "Next"), ("m", "Menu"), ("q", "Quit")];

const RESULT_ITEMS: &[(&str, &str)] = &[
    ("r", "Play again"),
    ("o", "Options"),
    ("m", "Menu"),
    ("q", "Quit"),
];

const MENU_ITEMS: &[(&str, &str)] = &[
    ("Tab", "Switch"),
    ("j/k", "Field"),
    ("h/l", "Change"),
    ("Enter", "Save"),
    ("x", "Discard"),
    ("Esc", "Close"),
];

const SETTINGS_ITEMS: &[(&str, &str)] = &[
    ("j/k", "Field"),
    ("h/l", "Change"),
    ("Enter", "Save"),
    ("Esc", "Cancel"),
];

const THEME_ITEMS: &[(&str, &str)] = &[("h/l", "Theme"), ("Enter", "Done"), ("Esc", "Back")];

/// Shows the key bindings available on the current screen.
pub struct MenuBar {
    items: &'static [(&'static str, &'static str)],
}

impl MenuBar {
    /// Key hints for `stage`; `answered` switches the quiz hints to feedback mode.
    pub fn for_stage(stage: Stage, answered: bool) -> Self {
        let items = match stage {
            Stage::Start => START_ITEMS,
            Stage::Quiz if answered => FEEDBACK_ITEMS,
            Stage::Quiz => QUIZ_ITEMS,
            Stage::Result => RESULT_ITEMS,
            Stage::Menu => MENU_ITEMS,
            Stage::Settings => SETTINGS_ITEMS,
            Stage::Theme => THEME_ITEMS,
        };
        Self { items }
    }
}

impl Widget for &MenuBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut spans: Vec<Span<'_>> = Vec::new();
        for (i, (key, desc)) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().add_modifier(Modifier::BOLD)));
            spans.push(Span::raw(":"));
            spans.push(Span::styled(
                *desc,
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub mod settings_form;
pub mod text_overlay;
pub mod theme_picker;

pub use settings_form::SettingsForm;
pub use text_overlay::TextOverlay;
pub use theme_picker::ThemePicker;

use ratatui::prelude::*;

/// Calculate a centered rect of given percentage within `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

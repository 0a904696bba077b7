pub mod err;
pub mod menu;
pub mod overlay;
pub mod progress;
pub mod question;
pub mod screens;
pub mod tabbed_window;
pub mod theme;

pub use err::ErrorDisplay;
pub use menu::MenuBar;
pub use progress::ProgressBar;
pub use question::QuestionView;
pub use screens::{LoadingScreen, ResultScreen, StartScreen};
pub use tabbed_window::{Tab, TabbedWindow};
pub use theme::Palette;

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

/// Flatten a rendered buffer into newline-separated rows.
#[cfg(test)]
pub(crate) fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                out.push_str(cell.symbol());
            }
        }
        out.push('\n');
    }
    out
}

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::{Difficulty, FieldError, GameplayOptions, MAX_AMOUNT, MIN_AMOUNT};
use crate::trivia::Category;
use crate::ui::Palette;
use crate::ui::screens::category_name;

const AMOUNT_DIGITS: usize = 3;

/// A row of the gameplay form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    Amount,
    Difficulty,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Category => Field::Amount,
            Field::Amount => Field::Difficulty,
            Field::Difficulty => Field::Category,
        }
    }

    fn previous(self) -> Field {
        match self {
            Field::Category => Field::Difficulty,
            Field::Amount => Field::Category,
            Field::Difficulty => Field::Amount,
        }
    }
}

/// Draft of the gameplay options being edited.
///
/// The amount is kept as typed text so an out-of-range value can be shown
/// and rejected by validation instead of silently corrected.
pub struct SettingsForm {
    category: u32,
    amount: String,
    difficulty: Difficulty,
    focus: Field,
    category_ids: Vec<u32>,
    errors: Vec<FieldError>,
}

impl SettingsForm {
    pub fn new(options: GameplayOptions, categories: &[Category]) -> Self {
        let mut form = Self {
            category: options.category,
            amount: options.amount.to_string(),
            difficulty: options.difficulty,
            focus: Field::Category,
            category_ids: Vec::new(),
            errors: Vec::new(),
        };
        form.set_categories(categories);
        form
    }

    /// Refresh the category choices, e.g. after the list finishes loading.
    pub fn set_categories(&mut self, categories: &[Category]) {
        self.category_ids = std::iter::once(0)
            .chain(categories.iter().map(|c| c.id))
            .collect();
    }

    /// Handle a key event. Returns true if the form consumed the key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.focus = self.focus.previous();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.focus = self.focus.next();
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.step(false);
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.step(true);
                true
            }
            KeyCode::Char(c) if self.focus == Field::Amount && c.is_ascii_digit() => {
                if self.amount.len() < AMOUNT_DIGITS {
                    self.amount.push(c);
                    self.errors.clear();
                }
                true
            }
            KeyCode::Backspace if self.focus == Field::Amount => {
                self.amount.pop();
                self.errors.clear();
                true
            }
            _ => false,
        }
    }

    fn step(&mut self, forward: bool) {
        self.errors.clear();
        match self.focus {
            Field::Category => self.category = self.cycle_category(forward),
            Field::Amount => {
                let current = self.amount.parse::<u32>().unwrap_or(0);
                let next = if forward {
                    current.saturating_add(1).clamp(MIN_AMOUNT, MAX_AMOUNT)
                } else {
                    current.saturating_sub(1).clamp(MIN_AMOUNT, MAX_AMOUNT)
                };
                self.amount = next.to_string();
            }
            Field::Difficulty => {
                self.difficulty = if forward {
                    self.difficulty.next()
                } else {
                    self.difficulty.previous()
                };
            }
        }
    }

    fn cycle_category(&self, forward: bool) -> u32 {
        let len = self.category_ids.len();
        if len == 0 {
            return 0;
        }
        let Some(pos) = self.category_ids.iter().position(|id| *id == self.category) else {
            return self.category_ids[0];
        };
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.category_ids[next]
    }

    /// The options as currently entered. Unparseable amounts become 0.
    pub fn options(&self) -> GameplayOptions {
        GameplayOptions {
            category: self.category,
            amount: self.amount.parse().unwrap_or(0),
            difficulty: self.difficulty,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn set_errors(&mut self, errors: &[FieldError]) {
        self.errors = errors.to_vec();
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    fn error_for(&self, field: Field) -> Option<FieldError> {
        self.errors.iter().copied().find(|e| {
            matches!(
                (e, field),
                (FieldError::Amount, Field::Amount) | (FieldError::Category, Field::Category)
            )
        })
    }

    /// Render the form (without centering or framing; the caller owns the block).
    pub fn render_content(
        &self,
        area: Rect,
        buf: &mut Buffer,
        categories: &[Category],
        palette: Palette,
    ) {
        let rows = [
            (
                Field::Category,
                "Category",
                category_name(self.category, categories),
            ),
            (Field::Amount, "Questions", self.amount.clone()),
            (Field::Difficulty, "Difficulty", self.difficulty.to_string()),
        ];

        let mut lines = Vec::new();
        for (field, label, value) in rows {
            let focused = field == self.focus;
            let marker = if focused { "▸ " } else { "  " };
            let value_style = if focused {
                palette.accent_style().add_modifier(Modifier::REVERSED)
            } else {
                palette.accent_style()
            };
            lines.push(Line::from(vec![
                Span::styled(marker, palette.accent_style()),
                Span::styled(format!("{:<12}", label), palette.text_style()),
                Span::styled(format!("‹ {} ›", value), value_style),
            ]));
            if let Some(error) = self.error_for(field) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", error),
                    Style::default().fg(palette.incorrect),
                )));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(palette.correct).bold()),
            Span::raw(" Save  "),
            Span::styled("[Esc]", Style::default().fg(palette.incorrect).bold()),
            Span::raw(" Cancel"),
        ]));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::ui::buffer_to_string;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 9,
                name: "General Knowledge".into(),
            },
            Category {
                id: 17,
                name: "Science & Nature".into(),
            },
        ]
    }

    fn form() -> SettingsForm {
        SettingsForm::new(
            GameplayOptions {
                category: 0,
                amount: 10,
                difficulty: Difficulty::Any,
            },
            &categories(),
        )
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = form();
        assert_eq!(form.focus(), Field::Category);
        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.focus(), Field::Difficulty);
        form.handle_key(key(KeyCode::Char('j')));
        assert_eq!(form.focus(), Field::Category);
    }

    #[test]
    fn test_category_cycles_through_known_ids() {
        let mut form = form();
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.options().category, 9);
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.options().category, 17);
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.options().category, 0);
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.options().category, 17);
    }

    #[test]
    fn test_unknown_category_resets_to_any() {
        let mut form = SettingsForm::new(
            GameplayOptions {
                category: 99,
                amount: 10,
                difficulty: Difficulty::Any,
            },
            &[],
        );
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.options().category, 0);
    }

    #[test]
    fn test_amount_typing_and_stepping() {
        let mut form = form();
        form.handle_key(key(KeyCode::Down));
        assert_eq!(form.focus(), Field::Amount);

        form.handle_key(key(KeyCode::Backspace));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.options().amount, 0);

        form.handle_key(key(KeyCode::Char('7')));
        form.handle_key(key(KeyCode::Char('5')));
        assert_eq!(form.options().amount, 75);

        // Stepping pulls the value back into range.
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.options().amount, MAX_AMOUNT);
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.options().amount, MAX_AMOUNT - 1);
    }

    #[test]
    fn test_digits_ignored_outside_amount() {
        let mut form = form();
        assert!(!form.handle_key(key(KeyCode::Char('5'))));
        assert_eq!(form.options().amount, 10);
    }

    #[test]
    fn test_difficulty_steps() {
        let mut form = form();
        form.handle_key(key(KeyCode::Up));
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.options().difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_unhandled_keys_fall_through() {
        let mut form = form();
        assert!(!form.handle_key(key(KeyCode::Enter)));
        assert!(!form.handle_key(key(KeyCode::Esc)));
        assert!(!form.handle_key(key(KeyCode::Tab)));
    }

    #[test]
    fn test_errors_render_under_field_and_clear_on_edit() {
        let mut form = form();
        form.set_errors(&[FieldError::Amount]);

        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        form.render_content(
            area,
            &mut buf,
            &categories(),
            Palette::for_theme(Theme::Default),
        );
        assert!(buffer_to_string(&buf).contains("Select between 1 and 50 questions."));

        form.handle_key(key(KeyCode::Down));
        form.handle_key(key(KeyCode::Char('1')));
        assert!(form.errors().is_empty());
    }
}

use thiserror::Error;

use super::{Difficulty, MAX_AMOUNT, MIN_AMOUNT};

/// The gameplay subset of settings submitted from the options form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameplayOptions {
    pub category: u32,
    pub amount: u32,
    pub difficulty: Difficulty,
}

/// A validation problem tied to a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Select between 1 and 50 questions.")]
    Amount,
    #[error("Invalid category selected.")]
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid settings: {}", join_errors(.0))]
    Invalid(Vec<FieldError>),
}

impl SettingsError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            SettingsError::Invalid(errors) => errors,
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl GameplayOptions {
    /// Check the options against the known category ids.
    ///
    /// Category 0 (any) is always accepted. An empty `known_categories`
    /// means the list never loaded, so only 0 passes.
    pub fn validate(&self, known_categories: &[u32]) -> Result<(), SettingsError> {
        let mut errors = Vec::new();
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&self.amount) {
            errors.push(FieldError::Amount);
        }
        if self.category != 0 && !known_categories.contains(&self.category) {
            errors.push(FieldError::Category);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Invalid(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(category: u32, amount: u32) -> GameplayOptions {
        GameplayOptions {
            category,
            amount,
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_valid_options_pass() {
        assert!(options(0, 10).validate(&[]).is_ok());
        assert!(options(9, 1).validate(&[9, 10]).is_ok());
        assert!(options(10, 50).validate(&[9, 10]).is_ok());
    }

    #[test]
    fn test_amount_out_of_range_rejected() {
        let err = options(0, 0).validate(&[]).unwrap_err();
        assert_eq!(err.fields(), &[FieldError::Amount]);

        let err = options(0, 51).validate(&[]).unwrap_err();
        assert_eq!(err.fields(), &[FieldError::Amount]);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = options(42, 10).validate(&[9, 10]).unwrap_err();
        assert_eq!(err.fields(), &[FieldError::Category]);
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let err = options(42, 99).validate(&[9]).unwrap_err();
        assert_eq!(err.fields(), &[FieldError::Amount, FieldError::Category]);
        assert!(err.to_string().contains("Select between 1 and 50 questions."));
        assert!(err.to_string().contains("Invalid category selected."));
    }
}

pub mod options;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use options::{FieldError, GameplayOptions, SettingsError};

const CONFIG_DIR_NAME: &str = ".trivium";
const SETTINGS_FILE_NAME: &str = "settings.json";

pub const MIN_AMOUNT: u32 = 1;
pub const MAX_AMOUNT: u32 = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config directory not found: could not determine home directory")]
    HomeDirNotFound,
    #[error("failed to write settings file: {0}")]
    WriteFailed(#[from] std::io::Error),
    #[error("failed to encode settings: {0}")]
    EncodeFailed(#[from] serde_json::Error),
}

/// Colour scheme applied to every screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Night,
    Matrix,
    Aquatic,
    Desert,
    Farm,
    Pink,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Default,
        Theme::Night,
        Theme::Matrix,
        Theme::Aquatic,
        Theme::Desert,
        Theme::Farm,
        Theme::Pink,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Night => "night",
            Theme::Matrix => "matrix",
            Theme::Aquatic => "aquatic",
            Theme::Desert => "desert",
            Theme::Farm => "farm",
            Theme::Pink => "pink",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// The next theme in display order, wrapping around.
    pub fn next(&self) -> Theme {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The previous theme in display order, wrapping around.
    pub fn previous(&self) -> Theme {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Any,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Any,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Any => "any",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a difficulty, coercing anything unknown to `Any`.
    pub fn parse_lossy(value: &str) -> Difficulty {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(Difficulty::Any)
    }

    pub fn next(&self) -> Difficulty {
        let idx = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Difficulty {
        let len = Self::ALL.len();
        let idx = Self::ALL.iter().position(|d| d == self).unwrap_or(0);
        Self::ALL[(idx + len - 1) % len]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Clamp a question count into the range the API accepts.
pub fn clamp_amount(amount: u32) -> u32 {
    amount.clamp(MIN_AMOUNT, MAX_AMOUNT)
}

/// User configuration persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,

    /// OpenTDB category id; 0 means any category.
    pub category: u32,

    /// Number of questions per quiz, always within [1, 50].
    pub amount: u32,

    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            category: 0,
            amount: 10,
            difficulty: Difficulty::Any,
        }
    }
}

impl Settings {
    pub fn gameplay(&self) -> GameplayOptions {
        GameplayOptions {
            category: self.category,
            amount: self.amount,
            difficulty: self.difficulty,
        }
    }

    /// Merge a stored JSON document over the defaults, field by field.
    ///
    /// Fields that are missing or hold a value of the wrong shape keep their
    /// default; anything that is not a JSON object yields the defaults.
    pub fn merge_stored(contents: &str) -> Self {
        let mut settings = Self::default();
        let object: Map<String, Value> = match serde_json::from_str(contents) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                tracing::warn!("stored settings are not an object, using defaults");
                return settings;
            }
            Err(e) => {
                tracing::warn!("failed to parse stored settings, using defaults: {}", e);
                return settings;
            }
        };

        if let Some(theme) = field::<Theme>(&object, "theme") {
            settings.theme = theme;
        }
        if let Some(category) = field::<u32>(&object, "category") {
            settings.category = category;
        }
        if let Some(amount) = field::<u32>(&object, "amount") {
            settings.amount = clamp_amount(amount);
        }
        if let Some(difficulty) = field::<Difficulty>(&object, "difficulty") {
            settings.difficulty = difficulty;
        }
        settings
    }
}

fn field<T: serde::de::DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    let value = object.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, %value, "ignoring invalid stored setting");
            None
        }
    }
}

/// Persistence for [`Settings`], injected into the quiz controller.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore: Send {
    /// Stored settings merged over the defaults. Never fails.
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> Result<(), ConfigError>;
}

/// Stores settings as `settings.json` in the config directory.
pub struct FileSettingsStore {
    config_dir: PathBuf,
}

impl FileSettingsStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE_NAME)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        match std::fs::read_to_string(self.path()) {
            Ok(contents) => Settings::merge_stored(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                tracing::warn!("failed to read settings, using defaults: {}", e);
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.config_dir)?;
        let contents = serde_json::to_string_pretty(settings)?;
        std::fs::write(self.path(), contents)?;
        tracing::debug!(path = %self.path().display(), "settings saved");
        Ok(())
    }
}

/// Return the config directory path: `~/.trivium/`
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
    Ok(home.join(CONFIG_DIR_NAME))
}

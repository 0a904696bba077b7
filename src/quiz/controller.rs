use std::collections::HashMap;

use crate::config::{GameplayOptions, Settings, SettingsError, SettingsStore, Theme};
use crate::trivia::{Category, FeedUpdate, Question, QuestionId, QuestionProvider, QuestionQuery};

/// Top-level mode of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Menu,
    Settings,
    Theme,
    Start,
    Quiz,
    Result,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Menu => write!(f, "menu"),
            Stage::Settings => write!(f, "settings"),
            Stage::Theme => write!(f, "theme"),
            Stage::Start => write!(f, "start"),
            Stage::Quiz => write!(f, "quiz"),
            Stage::Result => write!(f, "result"),
        }
    }
}

/// Stage implied by the answer count: a quiz with every question answered
/// moves to its result.
pub fn next_stage(stage: Stage, answered: usize, total: usize) -> Stage {
    if stage == Stage::Quiz && total > 0 && answered == total {
        Stage::Result
    } else {
        stage
    }
}

/// Owns the quiz session: stage, loaded questions, responses and settings.
///
/// Every operation runs to completion synchronously and ends by
/// re-evaluating [`next_stage`], so observers always see a settled state.
pub struct QuizController {
    settings: Settings,
    store: Box<dyn SettingsStore>,
    provider: Box<dyn QuestionProvider>,

    stage: Stage,
    previous_stage: Stage,

    questions: Vec<Question>,
    categories: Vec<Category>,
    loading: bool,
    error: Option<String>,

    current_index: usize,
    responses: HashMap<QuestionId, bool>,
}

impl QuizController {
    /// Load settings and kick off the first question and category fetches.
    pub fn new(store: Box<dyn SettingsStore>, mut provider: Box<dyn QuestionProvider>) -> Self {
        let settings = store.load();
        tracing::info!(?settings, "quiz session starting");
        provider.request(QuestionQuery::from(&settings));
        provider.request_categories();

        Self {
            settings,
            store,
            provider,
            stage: Stage::Start,
            previous_stage: Stage::Start,
            questions: Vec::new(),
            categories: Vec::new(),
            loading: true,
            error: None,
            current_index: 0,
            responses: HashMap::new(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn previous_stage(&self) -> Stage {
        self.previous_stage
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn response(&self, id: &QuestionId) -> Option<bool> {
        self.responses.get(id).copied()
    }

    pub fn answered(&self) -> usize {
        self.responses.len()
    }

    pub fn score(&self) -> usize {
        self.responses.values().filter(|correct| **correct).count()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_start(&self) -> bool {
        !self.loading && self.error.is_none() && !self.questions.is_empty()
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Open the menu over the current stage, or close it and restore that stage.
    pub fn toggle_menu(&mut self) {
        if self.stage == Stage::Menu {
            self.stage = self.previous_stage;
        } else {
            self.previous_stage = self.stage;
            self.stage = Stage::Menu;
        }
        tracing::debug!(stage = %self.stage, "menu toggled");
        self.settle();
    }

    /// Show the full gameplay options panel.
    pub fn open_settings(&mut self) {
        self.open_panel(Stage::Settings);
    }

    /// Show the full theme picker panel.
    pub fn open_theme(&mut self) {
        self.open_panel(Stage::Theme);
    }

    fn open_panel(&mut self, panel: Stage) {
        match self.stage {
            Stage::Menu => {}
            Stage::Start | Stage::Result => self.previous_stage = self.stage,
            _ => return,
        }
        self.stage = panel;
    }

    /// Apply a theme immediately. Never touches quiz progress.
    pub fn select_theme(&mut self, theme: Theme) {
        if self.settings.theme == theme {
            return;
        }
        self.settings.theme = theme;
        self.persist();
    }

    /// Validate and apply gameplay options, then return to the start screen.
    ///
    /// A change to category, amount or difficulty clears all progress and
    /// requests a fresh question set. Invalid options leave everything as is.
    pub fn save_settings(&mut self, options: GameplayOptions) -> Result<(), SettingsError> {
        let known: Vec<u32> = self.categories.iter().map(|c| c.id).collect();
        options.validate(&known)?;

        let changed = options != self.settings.gameplay();
        self.settings.category = options.category;
        self.settings.amount = options.amount;
        self.settings.difficulty = options.difficulty;
        self.persist();

        self.stage = Stage::Start;
        if changed {
            tracing::info!(?options, "gameplay settings changed");
            self.reset_progress();
            self.refetch();
        }
        self.settle();
        Ok(())
    }

    /// Return to the start screen without changing settings.
    pub fn cancel(&mut self) {
        self.stage = Stage::Start;
        self.settle();
    }

    /// Begin a fresh attempt. Returns false while questions are unavailable.
    pub fn start_quiz(&mut self) -> bool {
        if !self.can_start() {
            tracing::debug!(loading = self.loading, error = ?self.error, "start blocked");
            return false;
        }
        self.reset_progress();
        self.stage = Stage::Quiz;
        self.settle();
        true
    }

    /// Record the outcome for `id`. The first answer for a question is final.
    ///
    /// Answers outside a running quiz, or for ids not in the loaded set, are ignored.
    pub fn answer_question(&mut self, id: &QuestionId, correct: bool) {
        if self.stage != Stage::Quiz || !self.questions.iter().any(|q| &q.id == id) {
            tracing::debug!(%id, stage = %self.stage, "ignoring answer outside the quiz");
        } else if self.responses.contains_key(id) {
            tracing::debug!(%id, "ignoring repeated answer");
        } else {
            self.responses.insert(id.clone(), correct);
            tracing::debug!(%id, correct, "answer recorded");
        }
        self.settle();
    }

    /// Move to the next question. Returns false on the last question.
    pub fn next_question(&mut self) -> bool {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Finish the quiz by hand, whatever the answer count.
    pub fn complete_quiz(&mut self) {
        if self.stage == Stage::Quiz {
            self.stage = Stage::Result;
        }
    }

    /// Clear progress and return to the start screen with the same questions.
    pub fn restart_quiz(&mut self) {
        self.reset_progress();
        self.stage = Stage::Start;
        self.settle();
    }

    /// Fetch the current settings' questions again, e.g. after an error.
    pub fn reload(&mut self) {
        self.abandon_quiz();
        self.refetch();
    }

    /// Apply every update the provider has ready. Returns true if any arrived.
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        while let Some(update) = self.provider.poll() {
            self.apply(update);
            changed = true;
        }
        changed
    }

    fn apply(&mut self, update: FeedUpdate) {
        match update {
            FeedUpdate::Loaded(questions) => {
                tracing::info!(count = questions.len(), "questions loaded");
                self.questions = questions;
                self.loading = false;
                self.error = None;
                self.abandon_quiz();
            }
            FeedUpdate::Failed(message) => {
                tracing::warn!("questions unavailable: {}", message);
                self.questions.clear();
                self.loading = false;
                self.error = Some(message);
                self.abandon_quiz();
            }
            FeedUpdate::Categories(categories) => {
                tracing::debug!(count = categories.len(), "categories loaded");
                self.categories = categories;
            }
        }
        self.settle();
    }

    /// A new question set invalidates any attempt in progress or finished.
    fn abandon_quiz(&mut self) {
        self.reset_progress();
        if matches!(self.stage, Stage::Quiz | Stage::Result) {
            self.stage = Stage::Start;
        }
        if matches!(self.previous_stage, Stage::Quiz | Stage::Result) {
            self.previous_stage = Stage::Start;
        }
    }

    fn reset_progress(&mut self) {
        self.responses.clear();
        self.current_index = 0;
    }

    fn refetch(&mut self) {
        self.loading = true;
        self.error = None;
        self.questions.clear();
        self.provider.request(QuestionQuery::from(&self.settings));
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!("failed to save settings: {}", e);
        }
    }

    fn settle(&mut self) {
        self.stage = next_stage(self.stage, self.responses.len(), self.questions.len());
    }
}

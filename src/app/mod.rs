pub mod help;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::time::{Duration, Instant};

use crate::keys::{KeyAction, map_key};
use crate::quiz::{QuestionRound, QuizController, RoundEvent, RoundTimings, Stage};
use crate::ui::err::ErrorDisplay;
use crate::ui::menu::MenuBar;
use crate::ui::overlay::{SettingsForm, TextOverlay, ThemePicker, centered_rect};
use crate::ui::tabbed_window::{Tab, TabbedWindow};
use crate::ui::{
    LoadingScreen, MIN_HEIGHT, MIN_WIDTH, Palette, ProgressBar, QuestionView, ResultScreen,
    StartScreen,
};

const TICK: Duration = Duration::from_millis(250);

/// Whether a popup currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Default,
    Help,
}

pub struct App {
    state: AppState,
    running: bool,

    controller: QuizController,
    round: QuestionRound,
    /// Highlighted answer on the question screen.
    cursor: usize,

    // UI components
    form: SettingsForm,
    tabbed_window: TabbedWindow,
    help_overlay: Option<TextOverlay>,
}

impl App {
    pub fn new(controller: QuizController, timings: RoundTimings) -> Self {
        let palette = Palette::for_theme(controller.settings().theme);
        let form = SettingsForm::new(controller.settings().gameplay(), controller.categories());
        Self {
            state: AppState::Default,
            running: true,
            controller,
            round: QuestionRound::new(timings),
            cursor: 0,
            form,
            tabbed_window: TabbedWindow::new(palette),
            help_overlay: None,
        }
    }

    /// Run the main TUI event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        let mut last_tick = Instant::now();
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }

            let now = Instant::now();
            self.tick(now.duration_since(last_tick));
            last_tick = now;
        }
        Ok(())
    }

    /// Apply provider updates and let the question clock run.
    fn tick(&mut self, elapsed: Duration) {
        if self.controller.sync() {
            self.form.set_categories(self.controller.categories());
        }
        if self.state != AppState::Default {
            return;
        }
        match self.round.advance(&mut self.controller, elapsed) {
            Some(RoundEvent::Advanced) => self.cursor = 0,
            Some(event) => tracing::debug!(?event, "round event"),
            None => {}
        }
    }

    /// Handle a raw key event by routing to the current state.
    fn handle_key(&mut self, key: KeyEvent) {
        match self.state {
            AppState::Help => self.handle_help_key(key.code),
            AppState::Default => {
                if self.form_has_focus() && self.form.handle_key(key) {
                    return;
                }
                if let Some(action) = map_key(key) {
                    self.handle_key_action(action);
                }
            }
        }
    }

    fn form_has_focus(&self) -> bool {
        match self.controller.stage() {
            Stage::Settings => true,
            Stage::Menu => self.tabbed_window.active_tab() == Tab::Gameplay,
            _ => false,
        }
    }

    /// Handle a mapped key action for the current stage.
    fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => {
                self.running = false;
                return;
            }
            KeyAction::Help => {
                self.state = AppState::Help;
                self.help_overlay = Some(TextOverlay::new("Help", help::help_text()));
                return;
            }
            _ => {}
        }

        match self.controller.stage() {
            Stage::Start => self.handle_start_action(action),
            Stage::Quiz => self.handle_quiz_action(action),
            Stage::Result => self.handle_result_action(action),
            Stage::Menu => self.handle_menu_action(action),
            Stage::Settings => match action {
                KeyAction::Enter => self.save_form(),
                KeyAction::Cancel => self.controller.cancel(),
                _ => {}
            },
            Stage::Theme => self.handle_theme_action(action),
        }
    }

    fn handle_start_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Enter => {
                if self.round.start_quiz(&mut self.controller) {
                    self.cursor = 0;
                }
            }
            KeyAction::Reload => self.controller.reload(),
            KeyAction::Options => self.open_settings(),
            KeyAction::Themes => self.controller.open_theme(),
            KeyAction::Menu => self.open_menu(),
            _ => {}
        }
    }

    fn handle_quiz_action(&mut self, action: KeyAction) {
        let choices = self
            .controller
            .current_question()
            .map(|q| q.choices.len())
            .unwrap_or(0);

        match action {
            KeyAction::Up if !self.round.is_answered() && choices > 0 => {
                self.cursor = (self.cursor + choices - 1) % choices;
            }
            KeyAction::Down if !self.round.is_answered() && choices > 0 => {
                self.cursor = (self.cursor + 1) % choices;
            }
            KeyAction::Choice(idx) if idx < choices => {
                self.cursor = idx;
                self.choose(idx);
            }
            KeyAction::Enter => {
                if self.round.is_answered() {
                    if self.round.skip_or_finish(&mut self.controller) {
                        self.cursor = 0;
                    }
                } else {
                    self.choose(self.cursor);
                }
            }
            KeyAction::Menu => self.open_menu(),
            _ => {}
        }
    }

    fn choose(&mut self, idx: usize) {
        let choice = self
            .controller
            .current_question()
            .and_then(|q| q.choices.get(idx))
            .cloned();
        if let Some(choice) = choice {
            self.round.choose(&mut self.controller, Some(&choice));
        }
    }

    fn handle_result_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Restart | KeyAction::Enter => self.controller.restart_quiz(),
            KeyAction::Reload => self.controller.reload(),
            KeyAction::Options => self.open_settings(),
            KeyAction::Themes => self.controller.open_theme(),
            KeyAction::Menu => self.open_menu(),
            _ => {}
        }
    }

    fn handle_menu_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Cancel | KeyAction::Menu => self.controller.toggle_menu(),
            KeyAction::Tab => self.tabbed_window.switch_tab(),
            KeyAction::Discard => self.controller.cancel(),
            KeyAction::Enter => match self.tabbed_window.active_tab() {
                Tab::Gameplay => self.save_form(),
                Tab::Theme => self.controller.toggle_menu(),
            },
            KeyAction::Left | KeyAction::Up if self.tabbed_window.active_tab() == Tab::Theme => {
                self.step_theme(false)
            }
            KeyAction::Right | KeyAction::Down if self.tabbed_window.active_tab() == Tab::Theme => {
                self.step_theme(true)
            }
            _ => {}
        }
    }

    fn handle_theme_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Left | KeyAction::Up => self.step_theme(false),
            KeyAction::Right | KeyAction::Down => self.step_theme(true),
            KeyAction::Enter | KeyAction::Cancel => self.controller.cancel(),
            _ => {}
        }
    }

    fn step_theme(&mut self, forward: bool) {
        let current = self.controller.settings().theme;
        let theme = if forward {
            current.next()
        } else {
            current.previous()
        };
        self.controller.select_theme(theme);
    }

    fn open_menu(&mut self) {
        self.reset_form();
        self.tabbed_window.set_tab(Tab::Gameplay);
        self.controller.toggle_menu();
    }

    fn open_settings(&mut self) {
        self.reset_form();
        self.controller.open_settings();
    }

    fn reset_form(&mut self) {
        self.form = SettingsForm::new(
            self.controller.settings().gameplay(),
            self.controller.categories(),
        );
    }

    fn save_form(&mut self) {
        match self.controller.save_settings(self.form.options()) {
            Ok(()) => self.cursor = 0,
            Err(e) => {
                tracing::debug!("settings rejected: {}", e);
                self.form.set_errors(e.fields());
            }
        }
    }

    /// Handle key events while the help overlay is active.
    fn handle_help_key(&mut self, key: KeyCode) {
        if let Some(ref mut overlay) = self.help_overlay {
            overlay.handle_key(key);

            if overlay.is_dismissed() {
                self.help_overlay = None;
                self.state = AppState::Default;
            }
        }
    }

    // ── Drawing ─────────────────────────────────────────────────────

    fn palette(&self) -> Palette {
        Palette::for_theme(self.controller.settings().theme)
    }

    /// Draw all UI components.
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let palette = self.palette();
        self.tabbed_window.set_palette(palette);

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            frame.render_widget(
                Paragraph::new("Terminal too small").style(palette.text_style()),
                area,
            );
            return;
        }

        let stage = self.controller.stage();
        let layout = Layout::vertical([
            Constraint::Length(1), // progress
            Constraint::Min(1),    // content
            Constraint::Length(1), // menu bar
        ])
        .split(area);

        // Panels draw over whatever they were opened from.
        let behind = match stage {
            Stage::Menu | Stage::Settings | Stage::Theme => self.controller.previous_stage(),
            other => other,
        };
        if behind == Stage::Quiz && self.controller.total() > 0 {
            let position = self.controller.current_index() + 1;
            frame.render_widget(
                ProgressBar::new(position, self.controller.total(), palette),
                layout[0],
            );
        }
        self.draw_body(frame, behind, layout[1], palette);

        let menu = MenuBar::for_stage(stage, self.round.is_answered());
        frame.render_widget(&menu, layout[2]);

        match stage {
            Stage::Menu => self.draw_menu(frame, area, palette),
            Stage::Settings => {
                let popup = self.draw_panel(frame, area, " Gameplay options ", palette);
                self.form.render_content(
                    popup,
                    frame.buffer_mut(),
                    self.controller.categories(),
                    palette,
                );
            }
            Stage::Theme => {
                let popup = self.draw_panel(frame, area, " Theme ", palette);
                ThemePicker::new(self.controller.settings().theme)
                    .render_content(popup, frame.buffer_mut());
            }
            _ => {}
        }

        if self.state == AppState::Help
            && let Some(ref overlay) = self.help_overlay
        {
            let popup_area = centered_rect(60, 80, area);
            frame.render_widget(Clear, popup_area);
            overlay.render_content(popup_area, frame.buffer_mut(), palette);
        }
    }

    fn draw_body(&self, frame: &mut Frame, stage: Stage, area: Rect, palette: Palette) {
        match stage {
            Stage::Quiz => {
                let Some(question) = self.controller.current_question() else {
                    return;
                };
                let mut view = QuestionView::new(
                    question,
                    self.controller.current_index() + 1,
                    self.controller.total(),
                    palette,
                )
                .cursor(self.cursor);
                view = if self.round.is_answered() {
                    view.answered(self.round.selected())
                        .seconds_left(self.round.feedback_time_left())
                } else {
                    view.seconds_left(self.round.answer_time_left())
                };
                frame.render_widget(view, area);
            }
            Stage::Result => frame.render_widget(
                ResultScreen::new(self.controller.score(), self.controller.total(), palette),
                area,
            ),
            _ => {
                if let Some(message) = self.controller.error() {
                    frame.render_widget(ErrorDisplay::new(message), area);
                } else if self.controller.is_loading() {
                    frame.render_widget(LoadingScreen::new(palette), area);
                } else {
                    frame.render_widget(
                        StartScreen::new(
                            self.controller.settings(),
                            self.controller.categories(),
                            self.controller.total(),
                            palette,
                        ),
                        area,
                    );
                }
            }
        }
    }

    /// Clear a centered popup, frame it, and return the inner area.
    fn draw_panel(&self, frame: &mut Frame, area: Rect, title: &str, palette: Palette) -> Rect {
        let popup = centered_rect(60, 60, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(Span::styled(title.to_string(), palette.title_style()));
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);
        inner
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect, palette: Palette) {
        let inner = self.draw_panel(frame, area, " Menu ", palette);
        let layout = Layout::vertical([
            Constraint::Length(1), // tabs
            Constraint::Length(1),
            Constraint::Min(1), // content
        ])
        .split(inner);

        frame.render_widget(&self.tabbed_window, layout[0]);
        match self.tabbed_window.active_tab() {
            Tab::Gameplay => self.form.render_content(
                layout[2],
                frame.buffer_mut(),
                self.controller.categories(),
                palette,
            ),
            Tab::Theme => ThemePicker::new(self.controller.settings().theme)
                .render_content(layout[2], frame.buffer_mut()),
        }
    }
}

/// Set up terminal, run the TUI app, and restore terminal on exit.
pub fn run(controller: QuizController, timings: RoundTimings) -> anyhow::Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(controller, timings);
    let result = app.run(&mut terminal);

    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen
    )?;

    result
}

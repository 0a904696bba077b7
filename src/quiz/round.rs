use std::time::Duration;

use super::controller::{QuizController, Stage};
use super::countdown::Countdown;

pub const ANSWER_SECONDS: u32 = 15;
pub const FEEDBACK_SECONDS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTimings {
    /// Seconds the player has to pick an answer.
    pub answer_seconds: u32,
    /// Seconds the correct answer stays on screen before moving on.
    pub feedback_seconds: u32,
}

impl Default for RoundTimings {
    fn default() -> Self {
        Self {
            answer_seconds: ANSWER_SECONDS,
            feedback_seconds: FEEDBACK_SECONDS,
        }
    }
}

/// Something the round did on its own while time passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// The answer countdown ran out and an incorrect answer was recorded.
    TimedOut,
    /// Feedback finished and the next question is now showing.
    Advanced,
    /// Feedback finished on the last question; waiting for an explicit finish.
    AwaitingFinish,
}

/// Timing for the question on screen: an answer countdown, then a feedback
/// countdown once an answer (or timeout) is in.
///
/// Both countdowns are reset whenever a question is entered, so nothing left
/// over from one question can act on the next.
#[derive(Debug, Clone)]
pub struct QuestionRound {
    timings: RoundTimings,
    answer: Countdown,
    feedback: Countdown,
    index: usize,
    answered: bool,
    selected: Option<String>,
}

impl QuestionRound {
    pub fn new(timings: RoundTimings) -> Self {
        Self {
            timings,
            answer: Countdown::new(timings.answer_seconds, false),
            feedback: Countdown::new(timings.feedback_seconds, false),
            index: 0,
            answered: false,
            selected: None,
        }
    }

    pub fn timings(&self) -> RoundTimings {
        self.timings
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// The choice picked for this question; `None` before answering or after a timeout.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn answer_time_left(&self) -> u32 {
        self.answer.time_left()
    }

    pub fn feedback_time_left(&self) -> u32 {
        self.feedback.time_left()
    }

    /// Start a new attempt on the controller and arm the first question.
    pub fn start_quiz(&mut self, ctl: &mut QuizController) -> bool {
        if !ctl.start_quiz() {
            return false;
        }
        self.enter(ctl.current_index());
        true
    }

    /// Show question `index` with a fresh answer countdown.
    pub fn enter(&mut self, index: usize) {
        self.index = index;
        self.answered = false;
        self.selected = None;
        self.feedback.reset();
        self.answer.start();
    }

    /// Submit an answer for the current question; `None` means no choice.
    ///
    /// Returns false if the question was already answered or no quiz is running.
    pub fn choose(&mut self, ctl: &mut QuizController, choice: Option<&str>) -> bool {
        if self.answered || ctl.stage() != Stage::Quiz || ctl.current_index() != self.index {
            return false;
        }
        let Some(question) = ctl.current_question() else {
            return false;
        };
        let id = question.id.clone();
        let correct = question.is_correct(choice);

        self.answered = true;
        self.selected = choice.map(str::to_string);
        self.answer.reset();
        self.feedback.start();
        ctl.answer_question(&id, correct);
        true
    }

    /// Let time pass. Countdowns only run while the quiz stage is showing.
    pub fn advance(&mut self, ctl: &mut QuizController, elapsed: Duration) -> Option<RoundEvent> {
        if ctl.stage() != Stage::Quiz {
            return None;
        }
        if ctl.current_index() != self.index {
            self.enter(ctl.current_index());
        }

        if self.answer.advance(elapsed) {
            tracing::debug!(index = self.index, "answer time expired");
            self.choose(ctl, None);
            return Some(RoundEvent::TimedOut);
        }
        if self.feedback.advance(elapsed) {
            return Some(self.after_feedback(ctl));
        }
        None
    }

    fn after_feedback(&mut self, ctl: &mut QuizController) -> RoundEvent {
        if ctl.next_question() {
            self.enter(ctl.current_index());
            RoundEvent::Advanced
        } else {
            RoundEvent::AwaitingFinish
        }
    }

    /// Cut the feedback short: go to the next question, or finish on the last.
    pub fn skip_or_finish(&mut self, ctl: &mut QuizController) -> bool {
        if !self.answered || ctl.stage() != Stage::Quiz {
            return false;
        }
        if ctl.next_question() {
            self.enter(ctl.current_index());
        } else {
            self.feedback.reset();
            ctl.complete_quiz();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MockSettingsStore, Settings};
    use crate::trivia::feed::MockQuestionProvider;
    use crate::trivia::{FeedUpdate, Question, QuestionId, QuestionKind};

    const SEC: Duration = Duration::from_secs(1);

    fn question(id: &str) -> Question {
        Question {
            id: QuestionId::new(id),
            category: "General".into(),
            kind: QuestionKind::Multiple,
            difficulty: "easy".into(),
            prompt: format!("prompt {}", id),
            correct_answer: "right".into(),
            incorrect_answers: vec!["wrong".into()],
            choices: vec!["right".into(), "wrong".into()],
        }
    }

    fn controller(ids: &[&str]) -> QuizController {
        let mut store = MockSettingsStore::new();
        store.expect_load().returning(Settings::default);
        store.expect_save().returning(|_| Ok(()));

        let mut updates = Some(FeedUpdate::Loaded(ids.iter().map(|id| question(id)).collect()));
        let mut provider = MockQuestionProvider::new();
        provider.expect_request().returning(|_| ());
        provider.expect_request_categories().returning(|| ());
        provider.expect_poll().returning(move || updates.take());

        let mut ctl = QuizController::new(Box::new(store), Box::new(provider));
        ctl.sync();
        ctl
    }

    fn timings() -> RoundTimings {
        RoundTimings {
            answer_seconds: 3,
            feedback_seconds: 2,
        }
    }

    fn started(ids: &[&str]) -> (QuizController, QuestionRound) {
        let mut ctl = controller(ids);
        let mut round = QuestionRound::new(timings());
        assert!(round.start_quiz(&mut ctl));
        (ctl, round)
    }

    #[test]
    fn test_default_timings() {
        let t = RoundTimings::default();
        assert_eq!(t.answer_seconds, 15);
        assert_eq!(t.feedback_seconds, 4);
    }

    #[test]
    fn test_start_arms_answer_countdown() {
        let (ctl, round) = started(&["q1", "q2"]);
        assert_eq!(ctl.stage(), Stage::Quiz);
        assert_eq!(round.answer_time_left(), 3);
        assert!(!round.is_answered());
    }

    #[test]
    fn test_correct_choice_records_and_starts_feedback() {
        let (mut ctl, mut round) = started(&["q1", "q2"]);
        assert!(round.choose(&mut ctl, Some("right")));
        assert!(round.is_answered());
        assert_eq!(round.selected(), Some("right"));
        assert_eq!(ctl.response(&QuestionId::new("q1")), Some(true));
        assert_eq!(ctl.score(), 1);

        // The answer countdown is stopped once answered
        round.advance(&mut ctl, SEC);
        assert_eq!(round.answer_time_left(), 3);
        assert_eq!(round.feedback_time_left(), 1);
    }

    #[test]
    fn test_second_choice_is_ignored() {
        let (mut ctl, mut round) = started(&["q1", "q2"]);
        assert!(round.choose(&mut ctl, Some("wrong")));
        assert!(!round.choose(&mut ctl, Some("right")));
        assert_eq!(ctl.response(&QuestionId::new("q1")), Some(false));
        assert_eq!(round.selected(), Some("wrong"));
    }

    #[test]
    fn test_timeout_records_incorrect() {
        let (mut ctl, mut round) = started(&["q1", "q2"]);
        assert_eq!(round.advance(&mut ctl, SEC), None);
        assert_eq!(round.advance(&mut ctl, SEC), None);
        assert_eq!(round.advance(&mut ctl, SEC), Some(RoundEvent::TimedOut));

        assert!(round.is_answered());
        assert_eq!(round.selected(), None);
        assert_eq!(ctl.response(&QuestionId::new("q1")), Some(false));
        assert_eq!(round.feedback_time_left(), 2);
    }

    #[test]
    fn test_feedback_completion_advances() {
        let (mut ctl, mut round) = started(&["q1", "q2", "q3"]);
        round.choose(&mut ctl, Some("right"));
        assert_eq!(round.advance(&mut ctl, SEC), None);
        assert_eq!(round.advance(&mut ctl, SEC), Some(RoundEvent::Advanced));

        assert_eq!(ctl.current_index(), 1);
        assert_eq!(round.index(), 1);
        assert!(!round.is_answered());
        assert_eq!(round.answer_time_left(), 3);
        assert_eq!(round.feedback_time_left(), 2);
    }

    #[test]
    fn test_last_question_waits_for_finish() {
        let (mut ctl, mut round) = started(&["q1", "q2"]);
        // Record q2 out of band so the last question's answer does not complete the set
        ctl.answer_question(&QuestionId::new("q2"), true);
        assert!(ctl.next_question());
        round.enter(ctl.current_index());

        // A duplicate answer leaves the quiz running on its final question
        round.choose(&mut ctl, Some("wrong"));
        assert_eq!(ctl.stage(), Stage::Quiz);
        assert_eq!(round.advance(&mut ctl, SEC * 2), Some(RoundEvent::AwaitingFinish));
        assert_eq!(ctl.stage(), Stage::Quiz);

        // Nothing further happens on its own
        assert_eq!(round.advance(&mut ctl, SEC * 10), None);
        assert_eq!(ctl.stage(), Stage::Quiz);

        assert!(round.skip_or_finish(&mut ctl));
        assert_eq!(ctl.stage(), Stage::Result);
    }

    #[test]
    fn test_answering_every_question_reaches_result() {
        let (mut ctl, mut round) = started(&["q1", "q2"]);
        round.choose(&mut ctl, Some("right"));
        assert!(round.skip_or_finish(&mut ctl));
        assert_eq!(ctl.current_index(), 1);

        round.choose(&mut ctl, Some("wrong"));
        assert_eq!(ctl.stage(), Stage::Result);
        assert_eq!(ctl.score(), 1);
        assert_eq!(ctl.total(), 2);
    }

    #[test]
    fn test_skip_requires_answer() {
        let (mut ctl, mut round) = started(&["q1", "q2"]);
        assert!(!round.skip_or_finish(&mut ctl));
        assert_eq!(ctl.current_index(), 0);
    }

    #[test]
    fn test_countdowns_pause_outside_quiz() {
        let (mut ctl, mut round) = started(&["q1", "q2"]);
        ctl.toggle_menu();
        assert_eq!(round.advance(&mut ctl, SEC * 30), None);
        assert_eq!(round.answer_time_left(), 3);

        ctl.toggle_menu();
        assert_eq!(round.advance(&mut ctl, SEC), None);
        assert_eq!(round.answer_time_left(), 2);
    }

    #[test]
    fn test_entering_question_cancels_pending_feedback() {
        let (mut ctl, mut round) = started(&["q1", "q2", "q3"]);
        round.choose(&mut ctl, Some("right"));
        assert_eq!(round.advance(&mut ctl, SEC), None);

        // Skip ahead by hand; the half-finished feedback must not fire later
        assert!(round.skip_or_finish(&mut ctl));
        assert_eq!(ctl.current_index(), 1);
        assert_eq!(round.advance(&mut ctl, SEC), None);
        assert_eq!(ctl.current_index(), 1);
        assert!(!round.is_answered());
    }

    #[test]
    fn test_start_blocked_without_questions() {
        let mut ctl = controller(&[]);
        let mut round = QuestionRound::new(timings());
        // An empty set never arrives as Loaded from the feed, but guard anyway
        assert!(!round.start_quiz(&mut ctl));
        assert_eq!(ctl.stage(), Stage::Start);
    }
}

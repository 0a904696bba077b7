pub mod controller;
pub mod countdown;
pub mod round;

pub use controller::{QuizController, Stage};
pub use countdown::Countdown;
pub use round::{QuestionRound, RoundEvent, RoundTimings};

pub mod api;
pub mod feed;
pub mod question;

pub use api::{ApiError, OpenTdbClient, QuestionQuery, TriviaApi};
pub use feed::{FeedUpdate, QuestionFeed, QuestionProvider};
pub use question::{Category, Question, QuestionId, QuestionKind};

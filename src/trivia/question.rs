use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::api::ApiError;

/// Identity of a question within the currently loaded set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for the question at `index` in a freshly loaded set (`q1`, `q2`, ...).
    pub fn for_position(index: usize) -> Self {
        Self(format!("q{}", index + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple,
    Boolean,
}

/// A question exactly as OpenTDB returns it, every string base64 encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// A decoded question ready for display and answer comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub category: String,
    pub kind: QuestionKind,
    pub difficulty: String,
    pub prompt: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    /// Correct and incorrect answers, shuffled once when the question loads.
    pub choices: Vec<String>,
}

impl Question {
    /// Decode a raw question and shuffle its choices.
    pub fn from_raw(raw: RawQuestion, index: usize) -> Result<Self, ApiError> {
        let kind = match decode(&raw.kind)?.as_str() {
            "boolean" => QuestionKind::Boolean,
            _ => QuestionKind::Multiple,
        };
        let correct_answer = decode(&raw.correct_answer)?;
        let incorrect_answers = raw
            .incorrect_answers
            .iter()
            .map(|a| decode(a))
            .collect::<Result<Vec<_>, _>>()?;

        let mut choices = incorrect_answers.clone();
        choices.push(correct_answer.clone());
        choices.shuffle(&mut rand::thread_rng());

        Ok(Self {
            id: QuestionId::for_position(index),
            category: decode(&raw.category)?,
            kind,
            difficulty: decode(&raw.difficulty)?,
            prompt: decode(&raw.question)?,
            correct_answer,
            incorrect_answers,
            choices,
        })
    }

    /// Whether `choice` matches the correct answer. `None` (timed out) never does.
    pub fn is_correct(&self, choice: Option<&str>) -> bool {
        choice == Some(self.correct_answer.as_str())
    }
}

/// A trivia category offered by OpenTDB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// Decode one base64 transport string into UTF-8 text.
pub fn decode(encoded: &str) -> Result<String, ApiError> {
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}

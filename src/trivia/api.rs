use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::question::{Category, Question, RawQuestion};
use crate::config::{Difficulty, Settings, clamp_amount};

pub const DEFAULT_API_URL: &str = "https://opentdb.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),
    #[error("no questions available for these settings")]
    NoResults,
    #[error("the trivia API rejected a parameter")]
    InvalidParameter,
    #[error("session token not found")]
    TokenNotFound,
    #[error("session token has returned all questions")]
    TokenEmpty,
    #[error("rate limited by the trivia API, try again in a few seconds")]
    RateLimited,
    #[error("unexpected response code {0}")]
    UnknownCode(u8),
    #[error("failed to decode text: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("decoded text is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    fn from_response_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(ApiError::NoResults),
            2 => Some(ApiError::InvalidParameter),
            3 => Some(ApiError::TokenNotFound),
            4 => Some(ApiError::TokenEmpty),
            5 => Some(ApiError::RateLimited),
            other => Some(ApiError::UnknownCode(other)),
        }
    }
}

/// Parameters for one question request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionQuery {
    pub amount: u32,
    pub category: u32,
    pub difficulty: Difficulty,
}

impl QuestionQuery {
    /// The same query with the amount clamped into [1, 50].
    pub fn sanitized(&self) -> Self {
        Self {
            amount: clamp_amount(self.amount),
            ..*self
        }
    }
}

impl From<&Settings> for QuestionQuery {
    fn from(settings: &Settings) -> Self {
        Self {
            amount: settings.amount,
            category: settings.category,
            difficulty: settings.difficulty,
        }
    }
}

/// Build the upstream question URL from sanitized parameters.
pub fn question_url(base: &str, query: &QuestionQuery) -> Result<Url, ApiError> {
    let query = query.sanitized();
    let mut url = Url::parse(base)?.join("api.php")?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("amount", &query.amount.to_string());
        if query.category != 0 {
            pairs.append_pair("category", &query.category.to_string());
        }
        if query.difficulty != Difficulty::Any {
            pairs.append_pair("difficulty", query.difficulty.name());
        }
        pairs.append_pair("type", "multiple");
        pairs.append_pair("encode", "base64");
    }
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    trivia_categories: Vec<Category>,
}

/// Parse an `api.php` body into decoded questions.
pub fn parse_questions(body: &str) -> Result<Vec<Question>, ApiError> {
    let response: QuestionsResponse = serde_json::from_str(body)?;
    if let Some(err) = ApiError::from_response_code(response.response_code) {
        return Err(err);
    }
    response
        .results
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| Question::from_raw(raw, idx))
        .collect()
}

/// Parse an `api_category.php` body.
pub fn parse_categories(body: &str) -> Result<Vec<Category>, ApiError> {
    let response: CategoriesResponse = serde_json::from_str(body)?;
    Ok(response.trivia_categories)
}

/// Remote source of questions and categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TriviaApi: Send + Sync {
    async fn fetch_questions(&self, query: QuestionQuery) -> Result<Vec<Question>, ApiError>;
    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError>;
}

/// HTTP client for the Open Trivia Database.
#[derive(Clone)]
pub struct OpenTdbClient {
    client: Client,
    base_url: String,
}

impl OpenTdbClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { client, base_url })
    }

    /// Client for `TRIVIUM_API_URL`, or the public OpenTDB host.
    pub fn from_env() -> Result<Self, ApiError> {
        let base = std::env::var("TRIVIUM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(base)
    }

    async fn get_text(&self, url: Url) -> Result<String, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl TriviaApi for OpenTdbClient {
    async fn fetch_questions(&self, query: QuestionQuery) -> Result<Vec<Question>, ApiError> {
        let url = question_url(&self.base_url, &query)?;
        let body = self.get_text(url).await?;
        let questions = parse_questions(&body)?;
        tracing::info!(count = questions.len(), "fetched questions");
        Ok(questions)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = Url::parse(&self.base_url)?.join("api_category.php")?;
        let body = self.get_text(url).await?;
        parse_categories(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(amount: u32, category: u32, difficulty: Difficulty) -> QuestionQuery {
        QuestionQuery {
            amount,
            category,
            difficulty,
        }
    }

    fn param(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_amount_is_clamped_upstream() {
        let low = question_url(DEFAULT_API_URL, &query(0, 0, Difficulty::Any)).unwrap();
        assert_eq!(param(&low, "amount").as_deref(), Some("1"));

        let high = question_url(DEFAULT_API_URL, &query(100, 0, Difficulty::Any)).unwrap();
        assert_eq!(param(&high, "amount").as_deref(), Some("50"));
    }

    #[test]
    fn test_any_category_and_difficulty_are_omitted() {
        let url = question_url(DEFAULT_API_URL, &query(10, 0, Difficulty::Any)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://opentdb.com/api.php?amount=10&type=multiple&encode=base64"
        );
    }

    #[test]
    fn test_specific_category_and_difficulty_included() {
        let url = question_url("http://localhost:8080/", &query(5, 18, Difficulty::Hard)).unwrap();
        assert_eq!(url.path(), "/api.php");
        assert_eq!(param(&url, "category").as_deref(), Some("18"));
        assert_eq!(param(&url, "difficulty").as_deref(), Some("hard"));
        assert_eq!(param(&url, "encode").as_deref(), Some("base64"));
    }

    #[test]
    fn test_parse_questions_success() {
        let body = r#"{
            "response_code": 0,
            "results": [{
                "category": "R2VuZXJhbCBLbm93bGVkZ2U=",
                "type": "bXVsdGlwbGU=",
                "difficulty": "ZWFzeQ==",
                "question": "V2hhdCBpcyAyKzI/",
                "correct_answer": "NA==",
                "incorrect_answers": ["Mw==", "NQ==", "MjI="]
            }]
        }"#;
        let questions = parse_questions(body).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].category, "General Knowledge");
        assert_eq!(questions[0].prompt, "What is 2+2?");
        assert_eq!(questions[0].correct_answer, "4");
        assert_eq!(questions[0].incorrect_answers, vec!["3", "5", "22"]);
    }

    #[test]
    fn test_parse_questions_response_codes() {
        let err = parse_questions(r#"{"response_code": 1, "results": []}"#).unwrap_err();
        assert!(matches!(err, ApiError::NoResults));

        let err = parse_questions(r#"{"response_code": 5}"#).unwrap_err();
        assert!(matches!(err, ApiError::RateLimited));

        let err = parse_questions(r#"{"response_code": 9}"#).unwrap_err();
        assert!(matches!(err, ApiError::UnknownCode(9)));
    }

    #[test]
    fn test_parse_questions_invalid_json() {
        let err = parse_questions("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_parse_categories() {
        let body = r#"{"trivia_categories":[{"id":9,"name":"General Knowledge"},{"id":18,"name":"Science: Computers"}]}"#;
        let categories = parse_categories(body).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1], Category { id: 18, name: "Science: Computers".into() });
    }

    #[test]
    fn test_client_normalizes_base_url() {
        let client = OpenTdbClient::new("http://localhost:9000").unwrap();
        assert_eq!(client.base_url, "http://localhost:9000/");
    }
}

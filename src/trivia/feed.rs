use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::api::{QuestionQuery, TriviaApi};
use super::question::{Category, Question};

/// Outcome of a background fetch, delivered to the quiz controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedUpdate {
    Loaded(Vec<Question>),
    Failed(String),
    Categories(Vec<Category>),
}

/// Supplies questions for the current settings without blocking the caller.
///
/// Every failure is reported as [`FeedUpdate::Failed`]; nothing past this
/// boundary sees a transport error.
#[cfg_attr(test, mockall::automock)]
pub trait QuestionProvider: Send {
    /// Start fetching `query`, superseding any request still in flight.
    fn request(&mut self, query: QuestionQuery);
    fn request_categories(&mut self);
    /// Next update that is still relevant, if one has arrived.
    fn poll(&mut self) -> Option<FeedUpdate>;
}

#[derive(Debug)]
enum Message {
    Questions { generation: u64, update: FeedUpdate },
    Categories(FeedUpdate),
}

/// [`QuestionProvider`] that runs fetches as tokio tasks.
///
/// Each question request gets a new generation; results tagged with an older
/// generation are dropped so the last settings always win.
pub struct QuestionFeed {
    api: Arc<dyn TriviaApi>,
    runtime: Handle,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl QuestionFeed {
    pub fn new(api: Arc<dyn TriviaApi>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            tx,
            rx,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl QuestionProvider for QuestionFeed {
    fn request(&mut self, query: QuestionQuery) {
        self.generation += 1;
        let generation = self.generation;
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }

        let query = query.sanitized();
        tracing::info!(
            generation,
            amount = query.amount,
            category = query.category,
            difficulty = %query.difficulty,
            "requesting questions"
        );

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.in_flight = Some(self.runtime.spawn(async move {
            let update = match api.fetch_questions(query).await {
                Ok(questions) if questions.is_empty() => {
                    FeedUpdate::Failed("no questions available for these settings".into())
                }
                Ok(questions) => FeedUpdate::Loaded(questions),
                Err(e) => {
                    tracing::warn!(generation, "question fetch failed: {}", e);
                    FeedUpdate::Failed(e.to_string())
                }
            };
            let _ = tx.send(Message::Questions { generation, update });
        }));
    }

    fn request_categories(&mut self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            // The category list is optional; on failure only "any" stays selectable.
            let categories = match api.fetch_categories().await {
                Ok(categories) => categories,
                Err(e) => {
                    tracing::warn!("category fetch failed: {}", e);
                    Vec::new()
                }
            };
            let _ = tx.send(Message::Categories(FeedUpdate::Categories(categories)));
        });
    }

    fn poll(&mut self) -> Option<FeedUpdate> {
        while let Ok(message) = self.rx.try_recv() {
            match message {
                Message::Questions { generation, update } if generation == self.generation => {
                    self.in_flight = None;
                    return Some(update);
                }
                Message::Questions { generation, .. } => {
                    tracing::debug!(generation, current = self.generation, "dropping stale questions");
                }
                Message::Categories(update) => return Some(update),
            }
        }
        None
    }
}

use std::sync::Arc;
use std::time::Duration;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::questions::QuestionSource;
use crate::quiz::{DEFAULT_ANSWER_DELAY, QuizLoopService};
use crate::statistics_service::StatisticsStore;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    storage: Storage,
    answer_delay: Duration,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(clock, storage))
    }

    /// Build services over volatile in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Storage::in_memory())
    }

    #[must_use]
    pub fn new(clock: Clock, storage: Storage) -> Self {
        Self {
            clock,
            storage,
            answer_delay: DEFAULT_ANSWER_DELAY,
        }
    }

    #[must_use]
    pub fn with_answer_delay(mut self, answer_delay: Duration) -> Self {
        self.answer_delay = answer_delay;
        self
    }

    #[must_use]
    pub fn statistics(&self) -> StatisticsStore {
        StatisticsStore::new(self.clock, Arc::clone(&self.storage.key_values))
    }

    /// A quiz loop playing questions from `source`.
    #[must_use]
    pub fn quiz_loop(&self, source: Box<dyn QuestionSource>) -> QuizLoopService {
        QuizLoopService::new(source, self.statistics()).with_answer_delay(self.answer_delay)
    }
}

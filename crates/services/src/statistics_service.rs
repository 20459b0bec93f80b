use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::format_summary;
use quiz_core::model::{AnswerOutcome, GameRecord, RoundResult, RoundTally, StatisticsSnapshot};
use serde::Serialize;
use serde::de::DeserializeOwned;
use storage::repository::{Entry, KeyValueStore};
use tracing::{debug, warn};

use crate::error::StatisticsError;

/// Storage keys. Private to each installation, not a wire contract.
mod keys {
    pub const CORRECT: &str = "correct";
    pub const TOTAL: &str = "total";
    pub const GAMES_COUNT: &str = "games_count";
    pub const BEST_GAME: &str = "best_game";
}

/// Durable quiz statistics on top of a key-value store.
///
/// Every read loads from the store and every write saves the full snapshot in
/// one `set_many` batch. The only in-memory state is the tally of the current
/// round's answers that were already counted by `record_answer`.
pub struct StatisticsStore {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
    round_tally: RoundTally,
}

impl StatisticsStore {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            clock,
            store,
            round_tally: RoundTally::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Load every statistics field.
    ///
    /// Values that cannot be decoded fall back to zero (the zero record for the
    /// best game) and are logged.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::Storage` if the store cannot be read.
    pub async fn snapshot(&self) -> Result<StatisticsSnapshot, StatisticsError> {
        Ok(StatisticsSnapshot {
            total_correct: self.load(keys::CORRECT).await?,
            total_answered: self.load(keys::TOTAL).await?,
            games_count: self.load(keys::GAMES_COUNT).await?,
            best_game: self.load(keys::BEST_GAME).await?,
        })
    }

    /// The best round ever recorded, or the zero record.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::Storage` if the store cannot be read.
    pub async fn best_game(&self) -> Result<GameRecord, StatisticsError> {
        self.load(keys::BEST_GAME).await
    }

    /// Number of completed rounds since the last reset.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::Storage` if the store cannot be read.
    pub async fn games_count(&self) -> Result<u32, StatisticsError> {
        self.load(keys::GAMES_COUNT).await
    }

    /// Correct answers over all answers since the last reset, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::Storage` if the store cannot be read.
    pub async fn total_accuracy(&self) -> Result<f64, StatisticsError> {
        Ok(self.snapshot().await?.total_accuracy())
    }

    /// Forget which answers of an abandoned round were already counted.
    ///
    /// Those answers stay in the totals; the next `record` adds its full round.
    pub fn begin_round(&mut self) {
        self.round_tally = RoundTally::default();
    }

    /// Count a single answer immediately.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError` if the snapshot cannot be loaded or saved.
    pub async fn record_answer(&mut self, outcome: AnswerOutcome) -> Result<(), StatisticsError> {
        let mut stats = self.snapshot().await?;
        stats.record_answer(outcome);
        self.save(&stats).await?;
        self.round_tally.add(outcome);
        Ok(())
    }

    /// Record a completed round and return the updated statistics.
    ///
    /// Answers of this round already counted by `record_answer` are not added
    /// again. The best game is replaced only by a strictly higher score.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError` if the snapshot cannot be loaded or saved.
    pub async fn record(
        &mut self,
        result: &RoundResult,
    ) -> Result<StatisticsSnapshot, StatisticsError> {
        let mut stats = self.snapshot().await?;
        let improved = stats.record_round(result, self.round_tally, self.clock.now());
        self.save(&stats).await?;
        self.round_tally = RoundTally::default();
        debug!(
            correct = result.correct(),
            total = result.total(),
            improved,
            games = stats.games_count,
            "round recorded"
        );
        Ok(stats)
    }

    /// Zero the counters. The best game is kept.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError` if the snapshot cannot be loaded or saved.
    pub async fn reset(&mut self) -> Result<(), StatisticsError> {
        let mut stats = self.snapshot().await?;
        stats.reset();
        self.save(&stats).await?;
        self.round_tally = RoundTally::default();
        Ok(())
    }

    /// The end-of-round report for `last_round` against the stored statistics.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::Storage` if the store cannot be read.
    pub async fn format_summary(
        &self,
        last_round: &RoundResult,
    ) -> Result<String, StatisticsError> {
        let stats = self.snapshot().await?;
        Ok(format_summary(last_round, &stats))
    }

    async fn load<T>(&self, key: &str) -> Result<T, StatisticsError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(bytes) = self.store.get(key).await? else {
            return Ok(T::default());
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(key, error = %err, "stored statistic is unreadable; using default");
                Ok(T::default())
            }
        }
    }

    async fn save(&self, stats: &StatisticsSnapshot) -> Result<(), StatisticsError> {
        let mut entries: Vec<Entry> = vec![
            encode(keys::CORRECT, &stats.total_correct)?,
            encode(keys::TOTAL, &stats.total_answered)?,
            encode(keys::GAMES_COUNT, &stats.games_count)?,
        ];
        match encode(keys::BEST_GAME, &stats.best_game) {
            Ok(entry) => entries.push(entry),
            Err(err) => warn!(error = %err, "best game not saved"),
        }
        self.store.set_many(&entries).await?;
        Ok(())
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Entry, StatisticsError> {
    Ok((key.to_owned(), serde_json::to_vec(value)?))
}

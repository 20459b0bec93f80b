//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `StatisticsStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatisticsError {
    #[error("could not encode statistics: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    /// The movie service answered but reported a problem.
    #[error("{message}")]
    Unavailable { message: String },
    #[error("no movies loaded")]
    EmptyPool,
    #[error("movie service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failures surfaced to the quiz driver. None of them end the game; each one
/// maps to a retry prompt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("could not load movies: {0}")]
    QuestionSourceUnavailable(#[source] QuestionSourceError),
    #[error("could not load the next question: {0}")]
    QuestionFetchFailed(#[source] QuestionSourceError),
    #[error("could not save statistics: {0}")]
    Persistence(#[from] StatisticsError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

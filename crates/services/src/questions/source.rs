use async_trait::async_trait;
use quiz_core::model::Question;

use crate::error::QuestionSourceError;

use super::{pick, rating_prompt};

/// Supplies quiz questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fill the candidate pool.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` with a readable message when the
    /// candidates cannot be loaded.
    async fn load_candidates(&mut self) -> Result<(), QuestionSourceError>;

    /// Pick a random candidate and build a question from it.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError::EmptyPool` before a successful load, or a
    /// fetch error when the question's assets cannot be retrieved.
    async fn next_question(&self) -> Result<Question, QuestionSourceError>;

    /// True once `load_candidates` has succeeded.
    fn is_loaded(&self) -> bool;
}

/// Fixed pool of questions, used offline and in tests.
#[derive(Debug, Clone)]
pub struct StaticQuestionSource {
    candidates: Vec<Question>,
    pool: Vec<Question>,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(candidates: Vec<Question>) -> Self {
        Self {
            candidates,
            pool: Vec::new(),
        }
    }

    /// Ten well-known movies asked against a rating of 6.
    #[must_use]
    pub fn builtin() -> Self {
        const THRESHOLD: f32 = 6.0;
        let movies = [
            ("The Godfather", true),
            ("The Dark Knight", true),
            ("Kill Bill", true),
            ("The Avengers", true),
            ("Deadpool", true),
            ("The Green Knight", true),
            ("Old", false),
            ("The Ice Age Adventures of Buck Wild", false),
            ("Tesla", false),
            ("Vivarium", false),
        ];
        let candidates = movies
            .into_iter()
            .map(|(title, above)| Question::new(Vec::new(), rating_prompt(title, THRESHOLD), above))
            .collect();
        Self::new(candidates)
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn load_candidates(&mut self) -> Result<(), QuestionSourceError> {
        if self.candidates.is_empty() {
            return Err(QuestionSourceError::Unavailable {
                message: "the question list is empty".into(),
            });
        }
        self.pool.clone_from(&self.candidates);
        Ok(())
    }

    async fn next_question(&self) -> Result<Question, QuestionSourceError> {
        pick(&self.pool)
            .cloned()
            .ok_or(QuestionSourceError::EmptyPool)
    }

    fn is_loaded(&self) -> bool {
        !self.pool.is_empty()
    }
}

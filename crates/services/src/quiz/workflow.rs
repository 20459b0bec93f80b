use std::time::Duration;

use quiz_core::format_summary;
use quiz_core::model::AnswerOutcome;
use quiz_core::{QuizSession, QuizState};
use tracing::{info, warn};

use super::events::{QuestionView, QuizEvent, RoundReport};
use crate::error::QuizError;
use crate::questions::QuestionSource;
use crate::statistics_service::StatisticsStore;

/// Pause between scoring an answer and showing what comes next.
pub const DEFAULT_ANSWER_DELAY: Duration = Duration::from_secs(1);

/// Drives rounds: fetches questions, scores answers, records statistics.
///
/// Every step returns the next `QuizEvent` for the driver to present, or a
/// `QuizError` the driver can answer with `retry`. Failures never discard
/// round progress.
pub struct QuizLoopService {
    session: QuizSession,
    source: Box<dyn QuestionSource>,
    statistics: StatisticsStore,
    answer_delay: Duration,
    report: Option<RoundReport>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Box<dyn QuestionSource>, statistics: StatisticsStore) -> Self {
        Self {
            session: QuizSession::new(),
            source,
            statistics,
            answer_delay: DEFAULT_ANSWER_DELAY,
            report: None,
        }
    }

    #[must_use]
    pub fn with_answer_delay(mut self, answer_delay: Duration) -> Self {
        self.answer_delay = answer_delay;
        self
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn statistics(&self) -> &StatisticsStore {
        &self.statistics
    }

    /// Start a fresh round (first launch or "play again").
    ///
    /// Loads the candidate pool if it is not loaded yet.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionSourceUnavailable` if candidates cannot be
    /// loaded, or `QuizError::QuestionFetchFailed` for the first question.
    pub async fn start_round(&mut self) -> Result<QuizEvent, QuizError> {
        self.session.reset();
        self.statistics.begin_round();
        self.report = None;
        self.ensure_loaded().await?;
        self.fetch_question().await
    }

    /// Score an answer for the shown question.
    ///
    /// Returns `None` when no question is waiting for an answer. The answer is
    /// added to the statistics right away; a storage failure there is logged
    /// and does not affect the round.
    pub async fn answer(&mut self, given: bool) -> Option<AnswerOutcome> {
        let outcome = self.session.submit_answer(given)?;
        if let Err(err) = self.statistics.record_answer(outcome).await {
            warn!(error = %err, "answer not added to statistics");
        }
        Some(outcome)
    }

    /// After the answer delay, move to the next question or finish the round.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionFetchFailed` if the next question cannot be
    /// fetched (the round stays at the new index), or `QuizError::Persistence`
    /// if the finished round cannot be recorded.
    pub async fn proceed(&mut self) -> Result<QuizEvent, QuizError> {
        let scored = matches!(
            self.session.state(),
            QuizState::Answered | QuizState::RoundComplete
        );
        if scored && self.report.is_none() && !self.answer_delay.is_zero() {
            tokio::time::sleep(self.answer_delay).await;
        }
        self.step().await
    }

    /// Retry after a `QuizError`, resuming where the round stopped.
    ///
    /// # Errors
    ///
    /// Same as `start_round` and `proceed`.
    pub async fn retry(&mut self) -> Result<QuizEvent, QuizError> {
        self.ensure_loaded().await?;
        self.step().await
    }

    async fn step(&mut self) -> Result<QuizEvent, QuizError> {
        match self.session.state() {
            QuizState::Answered => {
                self.session.advance();
                self.fetch_question().await
            }
            QuizState::AwaitingQuestion => self.fetch_question().await,
            QuizState::AwaitingAnswer => match self.session.current_question() {
                Some(question) => Ok(QuizEvent::QuestionReady(QuestionView::new(
                    self.session.progress(),
                    question,
                ))),
                None => self.fetch_question().await,
            },
            QuizState::RoundComplete => self.complete_round().await,
        }
    }

    async fn ensure_loaded(&mut self) -> Result<(), QuizError> {
        if self.source.is_loaded() {
            return Ok(());
        }
        self.source
            .load_candidates()
            .await
            .map_err(QuizError::QuestionSourceUnavailable)
    }

    async fn fetch_question(&mut self) -> Result<QuizEvent, QuizError> {
        let question = self
            .source
            .next_question()
            .await
            .map_err(QuizError::QuestionFetchFailed)?;
        let view = QuestionView::new(self.session.progress(), &question);
        self.session.load_question(question);
        Ok(QuizEvent::QuestionReady(view))
    }

    async fn complete_round(&mut self) -> Result<QuizEvent, QuizError> {
        if let Some(report) = &self.report {
            return Ok(QuizEvent::RoundComplete(report.clone()));
        }
        let Some(result) = self.session.finish_round() else {
            return self.fetch_question().await;
        };

        let stats = self.statistics.record(&result).await?;
        let report = RoundReport {
            result,
            summary: format_summary(&result, &stats),
        };
        info!(
            correct = result.correct(),
            total = result.total(),
            games = stats.games_count,
            "round complete"
        );
        self.report = Some(report.clone());
        Ok(QuizEvent::RoundComplete(report))
    }
}

use chrono::{DateTime, Utc};

use crate::model::{AnswerOutcome, GameRecord, RoundResult};

/// Answers of the round in progress that were already added to the totals.
///
/// Lets per-answer updates and the end-of-round update share the same sums
/// without counting an answer twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundTally {
    pub correct: u32,
    pub answered: u32,
}

impl RoundTally {
    pub fn add(&mut self, outcome: AnswerOutcome) {
        self.answered += 1;
        if outcome.is_correct {
            self.correct += 1;
        }
    }
}

/// Durable cross-round statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatisticsSnapshot {
    pub total_correct: u64,
    pub total_answered: u64,
    pub games_count: u32,
    pub best_game: GameRecord,
}

impl StatisticsSnapshot {
    /// Fraction of correct answers across everything answered, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_accuracy(&self) -> f64 {
        if self.total_answered == 0 {
            return 0.0;
        }
        self.total_correct as f64 / self.total_answered as f64
    }

    /// Adds a single scored answer to the running sums.
    pub fn record_answer(&mut self, outcome: AnswerOutcome) {
        self.total_answered += 1;
        if outcome.is_correct {
            self.total_correct += 1;
        }
    }

    /// Applies a completed round.
    ///
    /// `already_counted` holds the answers of this round that went through
    /// `record_answer`; only the remainder is added. Returns true when the
    /// round replaced the best game.
    pub fn record_round(
        &mut self,
        result: &RoundResult,
        already_counted: RoundTally,
        achieved_at: DateTime<Utc>,
    ) -> bool {
        let correct = result.correct().saturating_sub(already_counted.correct);
        let answered = result.total().saturating_sub(already_counted.answered);
        self.total_correct += u64::from(correct);
        self.total_answered += u64::from(answered);
        self.games_count += 1;

        let candidate = GameRecord::from_round(result, achieved_at);
        if candidate.is_better_than(&self.best_game) {
            self.best_game = candidate;
            true
        } else {
            false
        }
    }

    /// Clears the counters. The best game survives.
    pub fn reset(&mut self) {
        self.total_correct = 0;
        self.total_answered = 0;
        self.games_count = 0;
    }
}

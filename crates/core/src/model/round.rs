use thiserror::Error;

/// Number of questions in every round.
pub const QUESTIONS_PER_ROUND: u32 = 10;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundResultError {
    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

//
// ─── ANSWER OUTCOME ───────────────────────────────────────────────────────────
//

/// Result of scoring a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
}

impl AnswerOutcome {
    #[must_use]
    pub fn new(is_correct: bool) -> Self {
        Self { is_correct }
    }
}

//
// ─── ROUND RESULT ─────────────────────────────────────────────────────────────
//

/// Score of one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    correct: u32,
    total: u32,
}

impl RoundResult {
    /// Build a result from raw counts.
    ///
    /// # Errors
    ///
    /// Returns `RoundResultError::CorrectExceedsTotal` if `correct > total`.
    pub fn new(correct: u32, total: u32) -> Result<Self, RoundResultError> {
        if correct > total {
            return Err(RoundResultError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self { correct, total })
    }

    /// Result of a full-length round; `correct` is clamped to the round size.
    #[must_use]
    pub fn full_round(correct: u32) -> Self {
        Self {
            correct: correct.min(QUESTIONS_PER_ROUND),
            total: QUESTIONS_PER_ROUND,
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_more_correct_than_total() {
        let err = RoundResult::new(11, 10).unwrap_err();
        assert_eq!(
            err,
            RoundResultError::CorrectExceedsTotal {
                correct: 11,
                total: 10
            }
        );
    }

    #[test]
    fn accepts_boundaries() {
        assert_eq!(RoundResult::new(0, 10).unwrap().correct(), 0);
        assert_eq!(RoundResult::new(10, 10).unwrap().correct(), 10);
    }

    #[test]
    fn full_round_uses_round_length() {
        let result = RoundResult::full_round(7);
        assert_eq!(result.total(), QUESTIONS_PER_ROUND);
        assert_eq!(result.correct(), 7);
        assert_eq!(RoundResult::full_round(42).correct(), QUESTIONS_PER_ROUND);
    }
}

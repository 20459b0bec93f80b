use std::fmt;

use tracing::debug;

use crate::model::{AnswerOutcome, Question, QUESTIONS_PER_ROUND, RoundResult};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Observable position of a `QuizSession` in its round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// No question is active; the driver should fetch one.
    AwaitingQuestion,
    /// A question is shown and has not been answered.
    AwaitingAnswer,
    /// The active question was scored; the driver should call `advance`.
    Answered,
    /// The last question of the round was scored; only `reset` moves on.
    RoundComplete,
}

#[derive(Debug, Clone)]
enum Phase {
    AwaitingQuestion,
    AwaitingAnswer(Question),
    Answered(Question),
    RoundComplete(Question),
}

impl Phase {
    fn state(&self) -> QuizState {
        match self {
            Phase::AwaitingQuestion => QuizState::AwaitingQuestion,
            Phase::AwaitingAnswer(_) => QuizState::AwaitingAnswer,
            Phase::Answered(_) => QuizState::Answered,
            Phase::RoundComplete(_) => QuizState::RoundComplete,
        }
    }
}

/// 1-based question number within the round, e.g. `3/10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundProgress {
    pub number: u32,
    pub total: u32,
}

impl fmt::Display for RoundProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.total)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One round of the quiz.
///
/// Scoring and advancing are separate steps so the driver can pause between
/// them (answer feedback) without the session knowing about time. Calls that
/// do not fit the current state are ignored and logged at debug level.
#[derive(Debug, Clone)]
pub struct QuizSession {
    current_index: u32,
    correct_answers: u32,
    phase: Phase,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_index: 0,
            correct_answers: 0,
            phase: Phase::AwaitingQuestion,
        }
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.phase.state()
    }

    /// 0-based index of the question being played.
    #[must_use]
    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match &self.phase {
            Phase::AwaitingQuestion => None,
            Phase::AwaitingAnswer(q) | Phase::Answered(q) | Phase::RoundComplete(q) => Some(q),
        }
    }

    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        RoundProgress {
            number: self.current_index + 1,
            total: QUESTIONS_PER_ROUND,
        }
    }

    /// Make `question` the active one.
    ///
    /// `None` (the source produced nothing) is ignored, as is any question
    /// arriving after the current one was scored. Replacing an unanswered
    /// question is allowed. Returns whether the question was accepted.
    pub fn load_question(&mut self, question: impl Into<Option<Question>>) -> bool {
        let Some(question) = question.into() else {
            debug!(index = self.current_index, "no question supplied; ignoring");
            return false;
        };
        match self.phase {
            Phase::AwaitingQuestion | Phase::AwaitingAnswer(_) => {
                self.phase = Phase::AwaitingAnswer(question);
                true
            }
            Phase::Answered(_) | Phase::RoundComplete(_) => {
                debug!(state = ?self.state(), "question arrived before advance; ignoring");
                false
            }
        }
    }

    /// Score `given` against the active question.
    ///
    /// Returns `None` when there is no unanswered question. The question stays
    /// active until `advance` or `reset`.
    pub fn submit_answer(&mut self, given: bool) -> Option<AnswerOutcome> {
        let question = match std::mem::replace(&mut self.phase, Phase::AwaitingQuestion) {
            Phase::AwaitingAnswer(q) => q,
            other => {
                debug!(state = ?other.state(), "answer without an open question; ignoring");
                self.phase = other;
                return None;
            }
        };

        let outcome = AnswerOutcome::new(question.is_correct(given));
        if outcome.is_correct {
            self.correct_answers += 1;
        }

        self.phase = if self.current_index + 1 >= QUESTIONS_PER_ROUND {
            Phase::RoundComplete(question)
        } else {
            Phase::Answered(question)
        };
        Some(outcome)
    }

    /// True once the last question of the round has been scored.
    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        matches!(self.phase, Phase::RoundComplete(_))
    }

    /// Drop the scored question and move to the next index.
    ///
    /// Only valid after a non-final answer; returns whether it moved.
    pub fn advance(&mut self) -> bool {
        if !matches!(self.phase, Phase::Answered(_)) {
            debug!(state = ?self.state(), "advance outside answered state; ignoring");
            return false;
        }
        self.current_index += 1;
        self.phase = Phase::AwaitingQuestion;
        true
    }

    /// The round score, once the round is complete.
    #[must_use]
    pub fn finish_round(&self) -> Option<RoundResult> {
        if !self.is_round_complete() {
            debug!(state = ?self.state(), "round not complete; no result");
            return None;
        }
        Some(RoundResult::full_round(self.correct_answers))
    }

    /// Start over from the first question.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.correct_answers = 0;
        self.phase = Phase::AwaitingQuestion;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

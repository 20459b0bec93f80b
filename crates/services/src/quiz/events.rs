use quiz_core::RoundProgress;
use quiz_core::model::{Question, RoundResult};

/// What the driver should present next.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    QuestionReady(QuestionView),
    RoundComplete(RoundReport),
}

/// A question ready to be shown, with its position in the round.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub progress: RoundProgress,
    pub text: String,
    /// Raw poster bytes; empty for text-only questions.
    pub image: Vec<u8>,
}

impl QuestionView {
    #[must_use]
    pub fn new(progress: RoundProgress, question: &Question) -> Self {
        Self {
            progress,
            text: question.text().to_owned(),
            image: question.image().to_vec(),
        }
    }
}

/// Final score of a round plus the formatted statistics report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub result: RoundResult,
    pub summary: String,
}

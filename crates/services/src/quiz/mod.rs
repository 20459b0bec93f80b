mod events;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use events::{QuestionView, QuizEvent, RoundReport};
pub use workflow::{DEFAULT_ANSWER_DELAY, QuizLoopService};

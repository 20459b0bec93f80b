mod question;
mod record;
mod round;
mod statistics;

pub use question::Question;
pub use record::GameRecord;
pub use round::{AnswerOutcome, QUESTIONS_PER_ROUND, RoundResult, RoundResultError};
pub use statistics::{RoundTally, StatisticsSnapshot};

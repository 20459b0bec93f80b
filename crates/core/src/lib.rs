#![forbid(unsafe_code)]

pub mod model;
pub mod session;
pub mod summary;
pub mod time;

pub use session::{QuizSession, QuizState, RoundProgress};
pub use summary::format_summary;
pub use time::Clock;

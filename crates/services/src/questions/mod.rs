mod movies;
mod source;

pub use movies::{DEFAULT_LIST_URL, MovieQuestionSource, MovieSourceConfig};
pub use source::{QuestionSource, StaticQuestionSource};

use rand::seq::IndexedRandom;

/// Uniform random pick; the thread-local RNG never outlives this call.
pub(crate) fn pick<T>(pool: &[T]) -> Option<&T> {
    pool.choose(&mut rand::rng())
}

/// Prompt shown for a movie and a rating threshold.
pub(crate) fn rating_prompt(title: &str, threshold: f32) -> String {
    format!("Is \"{title}\" rated higher than {threshold}?")
}

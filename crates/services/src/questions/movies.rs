use async_trait::async_trait;
use quiz_core::model::Question;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::QuestionSourceError;

use super::source::QuestionSource;
use super::{pick, rating_prompt};

pub const DEFAULT_LIST_URL: &str = "https://tv-api.com/en/API/Top250Movies";

#[derive(Clone, Debug)]
pub struct MovieSourceConfig {
    /// Full URL of the JSON movie list, API key included.
    pub list_url: String,
    /// A question's answer is "yes" when the rating is above this value.
    pub rating_threshold: f32,
}

impl MovieSourceConfig {
    #[must_use]
    pub fn new(list_url: impl Into<String>) -> Self {
        Self {
            list_url: list_url.into(),
            rating_threshold: 7.0,
        }
    }

    /// Standard top-list endpoint for the given API key.
    #[must_use]
    pub fn with_api_key(api_key: &str) -> Self {
        Self::new(format!("{DEFAULT_LIST_URL}/{}", api_key.trim()))
    }
}

/// A candidate movie from the top list.
#[derive(Debug, Clone, PartialEq)]
struct Movie {
    title: String,
    rating: f32,
    image_url: String,
}

impl Movie {
    /// Poster URL rewritten to the 600px-wide rendition.
    fn resized_image_url(&self) -> String {
        let base = self
            .image_url
            .split("._")
            .next()
            .unwrap_or(self.image_url.as_str());
        format!("{base}._V0_UX600_.jpg")
    }
}

/// Questions built from a remote movie top list, with poster bytes attached.
#[derive(Clone)]
pub struct MovieQuestionSource {
    client: Client,
    config: MovieSourceConfig,
    movies: Vec<Movie>,
}

impl MovieQuestionSource {
    #[must_use]
    pub fn new(config: MovieSourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            movies: Vec::new(),
        }
    }

    fn question_for(&self, movie: &Movie, image: Vec<u8>) -> Question {
        let threshold = self.config.rating_threshold;
        Question::new(
            image,
            rating_prompt(&movie.title, threshold),
            movie.rating > threshold,
        )
    }
}

#[async_trait]
impl QuestionSource for MovieQuestionSource {
    async fn load_candidates(&mut self) -> Result<(), QuestionSourceError> {
        let response = self.client.get(&self.config.list_url).send().await?;
        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }
        let body: MovieList = response.json().await?;
        self.movies = parse_movie_list(body)?;
        debug!(count = self.movies.len(), "movie list loaded");
        Ok(())
    }

    async fn next_question(&self) -> Result<Question, QuestionSourceError> {
        let movie = pick(&self.movies)
            .cloned()
            .ok_or(QuestionSourceError::EmptyPool)?;

        let url = movie.resized_image_url();
        debug!(title = %movie.title, %url, "fetching poster");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }
        let image = response.bytes().await?.to_vec();

        Ok(self.question_for(&movie, image))
    }

    fn is_loaded(&self) -> bool {
        !self.movies.is_empty()
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct MovieList {
    #[serde(rename = "errorMessage", default)]
    error_message: String,
    #[serde(default)]
    items: Vec<MovieItem>,
}

#[derive(Debug, Deserialize)]
struct MovieItem {
    #[serde(rename = "fullTitle")]
    title: String,
    #[serde(rename = "imDbRating", default)]
    rating: String,
    #[serde(rename = "image")]
    image_url: String,
}

fn parse_movie_list(body: MovieList) -> Result<Vec<Movie>, QuestionSourceError> {
    if !body.error_message.trim().is_empty() {
        return Err(QuestionSourceError::Unavailable {
            message: body.error_message,
        });
    }
    if body.items.is_empty() {
        return Err(QuestionSourceError::Unavailable {
            message: "the movie list is empty".into(),
        });
    }
    Ok(body
        .items
        .into_iter()
        .map(|item| Movie {
            title: item.title,
            // Unrated entries come back as "".
            rating: item.rating.trim().parse().unwrap_or(0.0),
            image_url: item.image_url,
        })
        .collect())
}

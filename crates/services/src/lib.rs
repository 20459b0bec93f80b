#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod questions;
pub mod quiz;
pub mod statistics_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionSourceError, QuizError, StatisticsError};
pub use questions::{MovieQuestionSource, MovieSourceConfig, QuestionSource, StaticQuestionSource};
pub use quiz::{QuestionView, QuizEvent, QuizLoopService, RoundReport};
pub use statistics_service::StatisticsStore;

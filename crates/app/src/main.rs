use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use quiz_core::summary::format_record_date;
use services::{
    AppServices, Clock, MovieQuestionSource, MovieSourceConfig, QuestionSource, QuizEvent,
    StaticQuestionSource,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::Terminal;

#[derive(Parser)]
#[command(name = "movie-quiz")]
#[command(about = "Yes/no quiz about movie ratings")]
struct Cli {
    /// SQLite database holding the statistics.
    #[arg(long, env = "MOVIE_QUIZ_DB_URL", default_value = "sqlite:movie_quiz.sqlite3")]
    db: String,

    #[command(flatten)]
    play: PlayArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct PlayArgs {
    /// API key for the movie list service.
    #[arg(long, env = "MOVIE_QUIZ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Full movie list URL; overrides --api-key.
    #[arg(long, env = "MOVIE_QUIZ_API_URL")]
    api_url: Option<String>,

    /// Pause after each answer, in milliseconds.
    #[arg(long, env = "MOVIE_QUIZ_ANSWER_DELAY_MS", default_value_t = 1000)]
    answer_delay_ms: u64,

    /// Use the built-in question set instead of the movie service.
    #[arg(long)]
    offline: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Play rounds (default).
    Play,
    /// Print the stored statistics.
    Stats,
    /// Clear games played and accuracy. The best game is kept.
    ResetStats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("movie_quiz=info".parse()?)
                .add_directive("services=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let db_url = normalize_sqlite_url(&cli.db);
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, Clock::system())
        .await?
        .with_answer_delay(Duration::from_millis(cli.play.answer_delay_ms));

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(&services, &cli.play).await,
        Command::Stats => print_stats(&services).await,
        Command::ResetStats => {
            services.statistics().reset().await?;
            println!("Statistics cleared.");
            Ok(())
        }
    }
}

/// Movie service settings, or `None` to play the built-in questions.
fn movie_config(args: &PlayArgs) -> Option<MovieSourceConfig> {
    if args.offline {
        return None;
    }
    if let Some(url) = args.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        return Some(MovieSourceConfig::new(url.trim()));
    }
    args.api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .map(MovieSourceConfig::with_api_key)
}

fn question_source(args: &PlayArgs) -> Box<dyn QuestionSource> {
    match movie_config(args) {
        Some(config) => {
            info!("using movie service");
            Box::new(MovieQuestionSource::new(config))
        }
        None => {
            info!("using built-in questions");
            Box::new(StaticQuestionSource::builtin())
        }
    }
}

async fn play(services: &AppServices, args: &PlayArgs) -> Result<()> {
    let mut quiz = services.quiz_loop(question_source(args));
    let mut term = Terminal::new();

    let mut next = quiz.start_round().await;
    loop {
        let event = match next {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "quiz step failed");
                term.say(&format!("\nError: {err}")).await?;
                if term.yes_no("Try again? [y/n] ").await? == Some(true) {
                    next = quiz.retry().await;
                    continue;
                }
                return Ok(());
            }
        };

        match event {
            QuizEvent::QuestionReady(view) => {
                term.say(&format!("\nQuestion {}", view.progress)).await?;
                if !view.image.is_empty() {
                    term.say(&format!("[poster, {} bytes]", view.image.len()))
                        .await?;
                }
                term.say(&view.text).await?;

                let Some(given) = term.yes_no("Your answer [y/n]: ").await? else {
                    return Ok(());
                };
                match quiz.answer(given).await {
                    Some(outcome) if outcome.is_correct => term.say("Correct!").await?,
                    Some(_) => term.say("Wrong.").await?,
                    None => {}
                }
                next = quiz.proceed().await;
            }
            QuizEvent::RoundComplete(report) => {
                term.say(&format!("\nThis round is over!\n{}", report.summary))
                    .await?;
                if term.yes_no("Play again? [y/n] ").await? != Some(true) {
                    return Ok(());
                }
                next = quiz.start_round().await;
            }
        }
    }
}

async fn print_stats(services: &AppServices) -> Result<()> {
    let stats = services.statistics().snapshot().await?;
    let best = stats.best_game;
    println!("Quizzes played: {}", stats.games_count);
    println!(
        "Answers: {} correct of {}",
        stats.total_correct, stats.total_answered
    );
    println!("Average accuracy: {:.2}%", stats.total_accuracy() * 100.0);
    if best.total() > 0 {
        println!(
            "Record: {}/{} ({})",
            best.correct(),
            best.total(),
            format_record_date(best.achieved_at(), &Local)
        );
    } else {
        println!("Record: none yet");
    }
    Ok(())
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_sqlite_urls() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/quiz.db"),
            "sqlite:///tmp/quiz.db"
        );
    }

    #[test]
    fn turns_paths_into_absolute_urls() {
        assert_eq!(normalize_sqlite_url("/var/quiz.db"), "sqlite:///var/quiz.db");
        let relative = normalize_sqlite_url("sqlite:quiz.db");
        assert!(relative.starts_with("sqlite:///"), "{relative}");
        assert!(relative.ends_with("quiz.db"));
    }

    #[test]
    fn rejects_empty_sqlite_path() {
        assert!(prepare_sqlite_file("sqlite://").is_err());
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
    }

    fn play_args(api_key: Option<&str>, api_url: Option<&str>, offline: bool) -> PlayArgs {
        PlayArgs {
            api_key: api_key.map(str::to_owned),
            api_url: api_url.map(str::to_owned),
            answer_delay_ms: 0,
            offline,
        }
    }

    #[test]
    fn movie_source_selection() {
        assert!(movie_config(&play_args(Some("k_123"), None, true)).is_none());
        assert!(movie_config(&play_args(None, None, false)).is_none());
        assert!(movie_config(&play_args(Some("  "), None, false)).is_none());

        let keyed = movie_config(&play_args(Some("k_123"), None, false)).unwrap();
        assert!(keyed.list_url.ends_with("/k_123"));

        let url = movie_config(&play_args(Some("k_123"), Some("http://localhost/list"), false))
            .unwrap();
        assert_eq!(url.list_url, "http://localhost/list");
    }

    #[test]
    fn cli_parses_subcommands_and_flags() {
        let cli = Cli::parse_from(["movie-quiz", "--offline", "--answer-delay-ms", "0", "stats"]);
        assert!(cli.play.offline);
        assert_eq!(cli.play.answer_delay_ms, 0);
        assert!(matches!(cli.command, Some(Command::Stats)));
    }
}

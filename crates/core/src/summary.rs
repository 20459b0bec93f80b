//! End-of-round report text.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::model::{RoundResult, StatisticsSnapshot};

/// Date format used for the best-game line.
pub const RECORD_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Builds the four-line report shown after a round, with the record date in
/// local time.
///
/// ```text
/// Your result: 5/10
/// Quizzes played: 2
/// Record: 8/10 (14.11.2023 22:13)
/// Average accuracy: 65.00%
/// ```
#[must_use]
pub fn format_summary(last_round: &RoundResult, stats: &StatisticsSnapshot) -> String {
    format_summary_in(last_round, stats, &Local)
}

/// Same as [`format_summary`], rendering the record date in `tz`.
#[must_use]
pub fn format_summary_in<Tz>(
    last_round: &RoundResult,
    stats: &StatisticsSnapshot,
    tz: &Tz,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let best = &stats.best_game;
    let best_date = format_record_date(best.achieved_at(), tz);
    format!(
        "Your result: {}/{}\nQuizzes played: {}\nRecord: {}/{} ({best_date})\nAverage accuracy: {:.2}%",
        last_round.correct(),
        last_round.total(),
        stats.games_count,
        best.correct(),
        best.total(),
        stats.total_accuracy() * 100.0,
    )
}

#[must_use]
pub fn format_record_date<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format(RECORD_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameRecord;
    use crate::time::fixed_now;
    use chrono::FixedOffset;

    #[test]
    fn renders_four_lines() {
        let stats = StatisticsSnapshot {
            total_correct: 13,
            total_answered: 20,
            games_count: 2,
            best_game: GameRecord::new(8, 10, fixed_now()),
        };
        let last = RoundResult::new(5, 10).unwrap();

        let text = format_summary_in(&last, &stats, &Utc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Your result: 5/10",
                "Quizzes played: 2",
                "Record: 8/10 (14.11.2023 22:13)",
                "Average accuracy: 65.00%",
            ]
        );
    }

    #[test]
    fn record_date_follows_the_given_zone() {
        let stats = StatisticsSnapshot {
            best_game: GameRecord::new(8, 10, fixed_now()),
            ..StatisticsSnapshot::default()
        };
        let last = RoundResult::new(8, 10).unwrap();
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();

        let text = format_summary_in(&last, &stats, &plus_three);
        assert!(text.contains("Record: 8/10 (15.11.2023 01:13)"), "{text}");
    }

    #[test]
    fn default_summary_uses_local_time() {
        let stats = StatisticsSnapshot {
            best_game: GameRecord::new(8, 10, fixed_now()),
            ..StatisticsSnapshot::default()
        };
        let last = RoundResult::new(8, 10).unwrap();

        let local = format_record_date(fixed_now(), &Local);
        assert!(format_summary(&last, &stats).contains(&format!("Record: 8/10 ({local})")));
    }

    #[test]
    fn empty_stats_render_zero_record() {
        let last = RoundResult::new(0, 10).unwrap();
        let text = format_summary_in(&last, &StatisticsSnapshot::default(), &Utc);
        assert!(text.contains("Record: 0/0 (01.01.1970 00:00)"));
        assert!(text.ends_with("Average accuracy: 0.00%"));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::RoundResult;
use crate::time::epoch;

/// The best round ever played.
///
/// Records are replaced wholesale, never patched. Persisted as JSON
/// `{"correct": .., "total": .., "date": "<RFC 3339>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    correct: u32,
    total: u32,
    #[serde(rename = "date")]
    achieved_at: DateTime<Utc>,
}

impl GameRecord {
    #[must_use]
    pub fn new(correct: u32, total: u32, achieved_at: DateTime<Utc>) -> Self {
        Self {
            correct,
            total,
            achieved_at,
        }
    }

    /// Record used before any round has been stored.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0, 0, epoch())
    }

    #[must_use]
    pub fn from_round(result: &RoundResult, achieved_at: DateTime<Utc>) -> Self {
        Self::new(result.correct(), result.total(), achieved_at)
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn achieved_at(&self) -> DateTime<Utc> {
        self.achieved_at
    }

    /// Strictly more correct answers. Equal scores keep the existing record.
    #[must_use]
    pub fn is_better_than(&self, other: &GameRecord) -> bool {
        self.correct > other.correct
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn comparison_is_strict() {
        let now = fixed_now();
        let record = GameRecord::new(8, 10, now);
        assert!(!record.is_better_than(&record));

        let later_tie = GameRecord::new(8, 10, now + Duration::hours(1));
        assert!(!later_tie.is_better_than(&record));
        assert!(!record.is_better_than(&later_tie));

        let higher = GameRecord::new(9, 10, now);
        assert!(higher.is_better_than(&record));
        assert!(!record.is_better_than(&higher));
    }

    #[test]
    fn any_scored_round_beats_zero_record() {
        let one = GameRecord::new(1, 10, fixed_now());
        assert!(one.is_better_than(&GameRecord::zero()));
        assert!(!GameRecord::new(0, 10, fixed_now()).is_better_than(&GameRecord::zero()));
    }

    #[test]
    fn serializes_with_date_key() {
        let record = GameRecord::new(7, 10, fixed_now());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"correct":7,"total":10,"date":"2023-11-14T22:13:20Z"}"#
        );
        let back: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

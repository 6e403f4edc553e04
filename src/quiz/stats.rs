use chrono::{
    DateTime,
    FixedOffset,
    NaiveDate,
    NaiveTime,
    Utc,
};

use crate::core::models::{
    Outcome,
    Record,
};

/// Quiz days roll over on Japan Standard Time regardless of host locale.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset")
}

/// Reads a stored attempt timestamp: RFC 3339 with any offset, or a bare
/// date treated as midnight UTC. Anything else is ignored.
pub fn parse_attempt_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Attempt timestamp as shown in the per-record stats panel.
pub fn format_attempt_timestamp(raw: &str) -> Option<String> {
    parse_attempt_timestamp(raw).map(|parsed| parsed.format("%Y-%m-%d %H:%M").to_string())
}

/// Counters for the current UTC+9 day, kept in step with the user's answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodayStats {
    pub answered: u32,
    pub correct: u32,
}

impl TodayStats {
    /// Counts the records already answered on `now`'s UTC+9 calendar date.
    pub fn from_records(records: &[Record], now: DateTime<Utc>) -> Self {
        let today = now.with_timezone(&jst()).date_naive();

        let mut stats = TodayStats::default();
        for record in records {
            if !record.is_correct() && !record.is_incorrect() {
                continue;
            }

            let parsed = record.attempted_at.as_deref().and_then(parse_attempt_timestamp);
            let attempted = match parsed {
                Some(attempted) => attempted,
                None => continue,
            };

            if attempted.with_timezone(&jst()).date_naive() == today {
                stats.answered += 1;
                if record.is_correct() {
                    stats.correct += 1;
                }
            }
        }

        stats
    }

    /// Optimistic bump applied before the remote write.
    pub fn record(&mut self, outcome: Outcome) {
        self.answered += 1;
        if outcome == Outcome::Correct {
            self.correct += 1;
        }
    }

    /// Exact inverse of `record`, for when the remote write fails.
    pub fn roll_back(&mut self, outcome: Outcome) {
        self.answered = self.answered.saturating_sub(1);
        if outcome == Outcome::Correct {
            self.correct = self.correct.saturating_sub(1);
        }
    }

    pub fn incorrect(&self) -> u32 {
        self.answered.saturating_sub(self.correct)
    }

    pub fn correct_rate(&self) -> f64 {
        rate(self.correct as usize, self.answered as usize)
    }

    pub fn incorrect_rate(&self) -> f64 {
        rate(self.incorrect() as usize, self.answered as usize)
    }
}

/// Whole-table tallies, derived on demand rather than stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverallStats {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
}

impl OverallStats {
    pub fn of(records: &[Record]) -> Self {
        let mut stats = OverallStats { total: records.len(), ..OverallStats::default() };

        for record in records {
            if record.is_correct() {
                stats.correct += 1;
            } else if record.is_incorrect() {
                stats.incorrect += 1;
            } else if record.is_unanswered() {
                stats.unanswered += 1;
            }
        }

        stats
    }

    pub fn correct_rate(&self) -> f64 {
        rate(self.correct, self.total)
    }

    pub fn incorrect_rate(&self) -> f64 {
        rate(self.incorrect, self.total)
    }
}

fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn answered(page_id: &str, status: &str, attempted_at: &str) -> Record {
        Record {
            page_id: page_id.to_string(),
            front: String::new(),
            back: String::new(),
            note: String::new(),
            part_of_speech: String::new(),
            status: status.to_string(),
            mistake_count: 0,
            attempted_at: (!attempted_at.is_empty()).then(|| attempted_at.to_string()),
            examples: Vec::new(),
        }
    }

    #[test]
    fn test_parse_attempt_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

        assert_eq!(parse_attempt_timestamp("2024-01-15T10:30:00.000+00:00"), Some(expected));
        assert_eq!(parse_attempt_timestamp("2024-01-15T10:30:00Z"), Some(expected));
        assert_eq!(parse_attempt_timestamp("2024-01-15T19:30:00+09:00"), Some(expected));

        let midnight = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_attempt_timestamp("2024-01-15"), Some(midnight));

        assert!(parse_attempt_timestamp("").is_none());
        assert!(parse_attempt_timestamp("last tuesday").is_none());
    }

    #[test]
    fn test_format_attempt_timestamp() {
        assert_eq!(
            format_attempt_timestamp("2024-01-15T10:30:00+00:00").as_deref(),
            Some("2024-01-15 10:30")
        );
        assert!(format_attempt_timestamp("not a date").is_none());
    }

    #[test]
    fn test_today_counts_use_jst_day() {
        // 23:30 UTC on the 15th is already 08:30 on the 16th in UTC+9
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 8, 0, 0).unwrap();
        let records = vec![
            answered("boundary", "正", "2024-01-15T23:30:00+00:00"),
            answered("yesterday", "誤", "2024-01-15T12:00:00+00:00"),
            answered("tomorrow", "正", "2024-01-16T20:00:00+00:00"),
        ];

        let stats = TodayStats::from_records(&records, now);
        assert_eq!(stats.answered, 1);
        assert_eq!(stats.correct, 1);
    }

    #[test]
    fn test_today_accepts_date_only_values() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 8, 0, 0).unwrap();
        let records = vec![answered("dated", "正", "2024-01-16")];

        let stats = TodayStats::from_records(&records, now);
        assert_eq!(stats.answered, 1);
        assert_eq!(stats.correct, 1);
    }

    #[test]
    fn test_today_skips_unanswered_and_unparseable() {
        let now = Utc.with_ymd_and_hms(2024, 1, 16, 8, 0, 0).unwrap();
        let attempted_today = "2024-01-16T01:00:00+00:00";
        let records = vec![
            answered("pending", "未", attempted_today),
            answered("blank", "", attempted_today),
            answered("broken", "正", "16/01/2024"),
            answered("never", "誤", ""),
            answered("counted", "誤", attempted_today),
        ];

        let stats = TodayStats::from_records(&records, now);
        assert_eq!(stats.answered, 1);
        assert_eq!(stats.correct, 0);
    }

    #[test]
    fn test_record_and_roll_back_are_inverse() {
        let mut stats = TodayStats { answered: 4, correct: 2 };

        stats.record(Outcome::Correct);
        assert_eq!(stats, TodayStats { answered: 5, correct: 3 });
        stats.roll_back(Outcome::Correct);
        assert_eq!(stats, TodayStats { answered: 4, correct: 2 });

        stats.record(Outcome::Incorrect);
        assert_eq!(stats, TodayStats { answered: 5, correct: 2 });
        stats.roll_back(Outcome::Incorrect);
        assert_eq!(stats, TodayStats { answered: 4, correct: 2 });
    }

    #[test]
    fn test_rates_never_divide_by_zero() {
        let empty = TodayStats::default();
        assert_eq!(empty.correct_rate(), 0.0);
        assert_eq!(empty.incorrect_rate(), 0.0);

        let stats = TodayStats { answered: 4, correct: 3 };
        assert_eq!(stats.correct_rate(), 75.0);
        assert_eq!(stats.incorrect(), 1);
        assert_eq!(stats.incorrect_rate(), 25.0);
    }

    #[test]
    fn test_overall_stats_buckets() {
        let records = vec![
            answered("a", "正", ""),
            answered("b", "正", ""),
            answered("c", "誤", ""),
            answered("d", "未", ""),
            answered("e", "", ""),
            answered("f", "保留", ""), // unknown status lands in no bucket
        ];

        let stats = OverallStats::of(&records);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.unanswered, 2);
        assert_eq!(stats.correct_rate(), 2.0 / 6.0 * 100.0);
    }

    #[test]
    fn test_overall_stats_empty_table() {
        let stats = OverallStats::of(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.correct_rate(), 0.0);
        assert_eq!(stats.incorrect_rate(), 0.0);
    }
}

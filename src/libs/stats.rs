//! Break adherence statistics.
//!
//! One [`DailyStatRecord`] per local calendar date, created on the first
//! event of that date. The aggregate keeps the last [`MAX_DAYS_STORED`] dates
//! and the longest streak ever reached. Every mutation is written through the
//! key-value store immediately.

use crate::libs::clock::Clock;
use crate::libs::store::{self, KeyValueStore, PAUSE_STATS_KEY};
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of distinct dates kept in the aggregate.
pub const MAX_DAYS_STORED: usize = 90;

/// Counters for a single calendar day.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub breaks_taken: u32,
    #[serde(default)]
    pub breaks_snoozed: u32,
    #[serde(default)]
    pub breaks_dismissed: u32,
    #[serde(default)]
    pub total_rest_seconds: u64,
}

impl DailyStatRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            breaks_taken: 0,
            breaks_snoozed: 0,
            breaks_dismissed: 0,
            total_rest_seconds: 0,
        }
    }
}

/// Persisted statistics.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredStatsAggregate {
    /// Records ordered by date, oldest first.
    pub daily_stats: Vec<DailyStatRecord>,
    pub longest_streak: u32,
}

/// Rollup of the last seven days, today included.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub breaks_taken: u32,
    pub breaks_snoozed: u32,
    pub breaks_dismissed: u32,
    pub total_rest_seconds: u64,
    /// Share of prompts that ended in a taken break, 0..=100.
    pub compliance_rate: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeSummary {
    pub breaks_taken: u32,
    pub total_rest_seconds: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Earliest retained date.
    pub first_active_date: Option<NaiveDate>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub today: DailyStatRecord,
    pub week: WeekSummary,
    pub all_time: AllTimeSummary,
}

/// Statistics engine backed by a [`KeyValueStore`].
pub struct StatisticsStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    stats: StoredStatsAggregate,
}

impl StatisticsStore {
    /// Loads the aggregate from `store`; a missing or malformed value starts empty.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let mut stats: StoredStatsAggregate = store::load(store.as_ref(), PAUSE_STATS_KEY).unwrap_or_default();
        stats.daily_stats.sort_by_key(|record| record.date);
        Self { store, clock, stats }
    }

    pub fn record_break_taken(&mut self, duration_seconds: u32) -> Result<()> {
        let today = self.today_mut();
        today.breaks_taken += 1;
        today.total_rest_seconds += u64::from(duration_seconds);

        let streak = self.current_streak();
        if streak > self.stats.longest_streak {
            self.stats.longest_streak = streak;
        }
        tracing::debug!(duration_seconds, streak, "break taken");
        self.save()
    }

    pub fn record_break_snoozed(&mut self) -> Result<()> {
        self.today_mut().breaks_snoozed += 1;
        tracing::debug!("break snoozed");
        self.save()
    }

    pub fn record_break_dismissed(&mut self) -> Result<()> {
        self.today_mut().breaks_dismissed += 1;
        tracing::debug!("break dismissed");
        self.save()
    }

    /// Clears every record and the longest streak.
    pub fn reset(&mut self) -> Result<()> {
        self.stats = StoredStatsAggregate::default();
        tracing::info!("statistics reset");
        self.save()
    }

    pub fn current_streak(&self) -> u32 {
        calculate_streak(&self.stats.daily_stats, self.clock.today())
    }

    pub fn aggregate(&self) -> &StoredStatsAggregate {
        &self.stats
    }

    pub fn summary(&self) -> StatsSummary {
        let today = self.clock.today();
        let records = &self.stats.daily_stats;

        let today_record = records
            .iter()
            .find(|record| record.date == today)
            .cloned()
            .unwrap_or_else(|| DailyStatRecord::empty(today));

        let week_start = today - Duration::days(6);
        let mut week = WeekSummary::default();
        for record in records.iter().filter(|record| record.date >= week_start) {
            week.breaks_taken += record.breaks_taken;
            week.breaks_snoozed += record.breaks_snoozed;
            week.breaks_dismissed += record.breaks_dismissed;
            week.total_rest_seconds += record.total_rest_seconds;
        }
        week.compliance_rate = compliance_rate(week.breaks_taken, week.breaks_snoozed, week.breaks_dismissed);

        let all_time = AllTimeSummary {
            breaks_taken: records.iter().map(|record| record.breaks_taken).sum(),
            total_rest_seconds: records.iter().map(|record| record.total_rest_seconds).sum(),
            current_streak: self.current_streak(),
            longest_streak: self.stats.longest_streak,
            first_active_date: records.iter().map(|record| record.date).min(),
        };

        StatsSummary {
            today: today_record,
            week,
            all_time,
        }
    }

    fn today_mut(&mut self) -> &mut DailyStatRecord {
        let today = self.clock.today();
        let records = &mut self.stats.daily_stats;

        let index = match records.iter().position(|record| record.date == today) {
            Some(index) => index,
            None => {
                records.push(DailyStatRecord::empty(today));
                records.sort_by_key(|record| record.date);
                records.iter().position(|record| record.date == today).unwrap_or(records.len() - 1)
            }
        };
        &mut records[index]
    }

    fn save(&mut self) -> Result<()> {
        let records = &mut self.stats.daily_stats;
        if records.len() > MAX_DAYS_STORED {
            let excess = records.len() - MAX_DAYS_STORED;
            records.drain(..excess);
        }
        store::save(self.store.as_ref(), PAUSE_STATS_KEY, &self.stats)?;
        Ok(())
    }
}

/// `round(100 * taken / total)`, or 0 when nothing happened.
pub fn compliance_rate(taken: u32, snoozed: u32, dismissed: u32) -> u32 {
    let total = u64::from(taken) + u64::from(snoozed) + u64::from(dismissed);
    if total == 0 {
        return 0;
    }
    ((u64::from(taken) * 100) as f64 / total as f64).round() as u32
}

/// Number of consecutive days with at least one taken break, ending today or
/// yesterday. Older activity does not count as a running streak.
pub fn calculate_streak(records: &[DailyStatRecord], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = records
        .iter()
        .filter(|record| record.breaks_taken > 0)
        .map(|record| record.date)
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let Some(&latest) = dates.first() else {
        return 0;
    };
    if latest != today && latest != today - Duration::days(1) {
        return 0;
    }

    let mut streak = 1;
    for pair in dates.windows(2) {
        if pair[0] - pair[1] == Duration::days(1) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn taken(s: &str) -> DailyStatRecord {
        DailyStatRecord {
            breaks_taken: 1,
            ..DailyStatRecord::empty(date(s))
        }
    }

    #[test]
    fn streak_requires_recent_activity() {
        let records = vec![taken("2024-03-01"), taken("2024-03-02")];
        assert_eq!(calculate_streak(&records, date("2024-03-05")), 0);
        assert_eq!(calculate_streak(&records, date("2024-03-03")), 2);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let records = vec![taken("2024-03-01"), taken("2024-03-03"), taken("2024-03-04"), taken("2024-03-05")];
        assert_eq!(calculate_streak(&records, date("2024-03-05")), 3);
    }

    #[test]
    fn days_without_taken_breaks_break_the_streak() {
        let mut records = vec![taken("2024-03-03"), taken("2024-03-05")];
        records.push(DailyStatRecord {
            breaks_snoozed: 4,
            ..DailyStatRecord::empty(date("2024-03-04"))
        });
        assert_eq!(calculate_streak(&records, date("2024-03-05")), 1);
    }

    #[test]
    fn compliance_rate_rounds_to_nearest() {
        assert_eq!(compliance_rate(0, 0, 0), 0);
        assert_eq!(compliance_rate(2, 1, 0), 67);
        assert_eq!(compliance_rate(1, 1, 1), 33);
        assert_eq!(compliance_rate(5, 0, 0), 100);
    }

    #[test]
    fn stored_dates_use_iso_format() {
        let json = serde_json::to_value(taken("2024-03-01")).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["breaksTaken"], 1);
    }
}

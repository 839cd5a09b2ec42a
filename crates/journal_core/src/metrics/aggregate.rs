//! Per-day aggregation of journal entries.
//!
//! # Invariants
//! - A reversed range yields no days in either mode.
//! - Full mode yields every day of the range exactly once, ascending.
//! - Compact mode yields only in-range days that have at least one entry.
//! - Entries outside the range never contribute to any day.

use crate::metrics::range::{local_date, DateRange};
use crate::model::entry::{JournalEntry, Toggles};
use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of entries per day carrying each toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleCounts {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub w: u32,
}

impl ToggleCounts {
    fn record(&mut self, toggles: &Toggles) {
        self.x += u32::from(toggles.x);
        self.y += u32::from(toggles.y);
        self.z += u32::from(toggles.z);
        self.w += u32::from(toggles.w);
    }

    /// Stack height for the totals chart.
    pub fn total(&self) -> u32 {
        self.x + self.y + self.z + self.w
    }
}

/// Aggregated values for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    /// Latest non-zero sleep value of the day, `0.0` when none was logged.
    pub sleep_hours: f64,
    /// Mean mood rating; `None` when no entry of the day has a rating.
    pub mood: Option<f64>,
    pub toggle_counts: ToggleCounts,
}

impl DayAggregate {
    /// Aggregate of a day without entries.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            sleep_hours: 0.0,
            mood: None,
            toggle_counts: ToggleCounts::default(),
        }
    }

    fn from_entries(date: NaiveDate, entries: &[&JournalEntry]) -> Self {
        // `max_by` keeps the last of equal instants, i.e. the later-listed entry.
        let sleep_hours = entries
            .iter()
            .filter(|entry| entry.has_sleep())
            .max_by(|a, b| a.created_at.cmp(&b.created_at))
            .map_or(0.0, |entry| entry.sleep_hours);

        let (mood_sum, mood_count) = entries
            .iter()
            .filter_map(|entry| entry.mood_rating)
            .fold((0.0_f64, 0_u32), |(sum, count), rating| {
                (sum + f64::from(rating), count + 1)
            });
        let mood = (mood_count > 0).then(|| mood_sum / f64::from(mood_count));

        let mut toggle_counts = ToggleCounts::default();
        for entry in entries {
            toggle_counts.record(&entry.toggles);
        }

        Self {
            date,
            sleep_hours,
            mood,
            toggle_counts,
        }
    }
}

/// Aggregates `entries` into local days of `tz` within `[start, end]`.
///
/// `compact` drops days without entries; otherwise every day of the range is
/// emitted and empty days carry [`DayAggregate::empty`] values.
pub fn aggregate_days<T: TimeZone>(
    entries: &[JournalEntry],
    start: NaiveDate,
    end: NaiveDate,
    compact: bool,
    tz: &T,
) -> Vec<DayAggregate> {
    let range = DateRange::new(start, end);
    if range.is_empty() {
        return Vec::new();
    }

    let mut grouped: BTreeMap<NaiveDate, Vec<&JournalEntry>> = BTreeMap::new();
    for entry in entries {
        grouped
            .entry(local_date(&entry.created_at, tz))
            .or_default()
            .push(entry);
    }

    if compact {
        return grouped
            .range(start..=end)
            .map(|(date, day_entries)| DayAggregate::from_entries(*date, day_entries))
            .collect();
    }

    range
        .days()
        .map(|date| match grouped.get(&date) {
            Some(day_entries) => DayAggregate::from_entries(date, day_entries),
            None => DayAggregate::empty(date),
        })
        .collect()
}

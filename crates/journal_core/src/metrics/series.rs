//! Renderer-agnostic chart series derived from day aggregates.
//!
//! Drawing is left to the UI; this module fixes the data each chart mode
//! plots and the scales it uses, so every front-end renders the same picture.

use crate::metrics::aggregate::DayAggregate;
use serde::{Deserialize, Serialize};

/// Minimum upper bound of the sleep axis, in hours.
pub const MIN_SLEEP_CEILING: f64 = 8.0;

/// Maximum number of x-axis labels before labels are thinned.
pub const MAX_AXIS_LABELS: usize = 8;

/// Chart display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    Mood,
    #[default]
    Sleep,
    /// Stacked toggle totals with both lines de-emphasized.
    Totals,
}

/// One plotted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Mood,
    Sleep,
}

impl ChartMode {
    /// Line drawn emphasized in this mode, if any.
    pub fn dominant(self) -> Option<SeriesKind> {
        match self {
            Self::Mood => Some(SeriesKind::Mood),
            Self::Sleep => Some(SeriesKind::Sleep),
            Self::Totals => None,
        }
    }

    /// Whether toggle totals are drawn as ball stacks rather than background bars.
    pub fn stacks_totals(self) -> bool {
        matches!(self, Self::Totals)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub dates: Vec<chrono::NaiveDate>,
    pub sleep: Vec<f64>,
    pub mood: Vec<Option<f64>>,
    pub totals: Vec<u32>,
    /// Upper bound of the sleep axis; the lower bound is zero.
    pub sleep_ceiling: f64,
    /// Tallest toggle stack, at least one.
    pub max_total: u32,
    /// Draw every n-th date label.
    pub label_stride: usize,
}

impl ChartSeries {
    pub fn from_days(days: &[DayAggregate]) -> Self {
        let sleep = days.iter().map(|day| day.sleep_hours).collect::<Vec<_>>();
        let totals = days
            .iter()
            .map(|day| day.toggle_counts.total())
            .collect::<Vec<_>>();

        Self {
            dates: days.iter().map(|day| day.date).collect(),
            mood: days.iter().map(|day| day.mood).collect(),
            sleep_ceiling: sleep.iter().copied().fold(MIN_SLEEP_CEILING, f64::max),
            max_total: totals.iter().copied().max().unwrap_or(0).max(1),
            label_stride: (days.len() / MAX_AXIS_LABELS).max(1),
            sleep,
            totals,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Mood positions on a `0..=1` axis; days without mood stay `None`.
    pub fn normalized_mood(&self) -> Vec<Option<f64>> {
        self.mood
            .iter()
            .map(|mood| mood.map(|value| ((value - 1.0) / 4.0).clamp(0.0, 1.0)))
            .collect()
    }

    /// Sleep positions on a `0..=1` axis against [`Self::sleep_ceiling`].
    pub fn normalized_sleep(&self) -> Vec<f64> {
        self.sleep
            .iter()
            .map(|value| (value / self.sleep_ceiling).clamp(0.0, 1.0))
            .collect()
    }

    /// Indexes whose date label is drawn.
    pub fn label_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).step_by(self.label_stride)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartMode, ChartSeries, SeriesKind};
    use crate::metrics::aggregate::{DayAggregate, ToggleCounts};
    use chrono::NaiveDate;

    fn day(d: u32, sleep: f64, mood: Option<f64>, x: u32) -> DayAggregate {
        DayAggregate {
            date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
            sleep_hours: sleep,
            mood,
            toggle_counts: ToggleCounts {
                x,
                ..ToggleCounts::default()
            },
        }
    }

    #[test]
    fn scales_use_floor_values() {
        let series = ChartSeries::from_days(&[day(1, 6.0, None, 0), day(2, 0.0, Some(3.0), 0)]);
        assert_eq!(series.sleep_ceiling, 8.0);
        assert_eq!(series.max_total, 1);
        assert_eq!(series.label_stride, 1);
        assert_eq!(series.normalized_mood(), vec![None, Some(0.5)]);
        assert_eq!(series.normalized_sleep(), vec![0.75, 0.0]);
    }

    #[test]
    fn scales_grow_with_data_and_labels_thin_out() {
        let days = (1..=20)
            .map(|d| day(d, f64::from(d), Some(5.0), d % 4))
            .collect::<Vec<_>>();
        let series = ChartSeries::from_days(&days);

        assert_eq!(series.sleep_ceiling, 20.0);
        assert_eq!(series.max_total, 3);
        assert_eq!(series.label_stride, 2);
        assert_eq!(series.label_indexes().count(), 10);
    }

    #[test]
    fn modes_pick_dominant_series() {
        assert_eq!(ChartMode::Mood.dominant(), Some(SeriesKind::Mood));
        assert_eq!(ChartMode::Sleep.dominant(), Some(SeriesKind::Sleep));
        assert_eq!(ChartMode::Totals.dominant(), None);
        assert!(ChartMode::Totals.stacks_totals());
    }
}

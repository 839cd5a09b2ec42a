//! Calendar date ranges and time-zone bucketing helpers.

use crate::model::entry::JournalEntry;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Days shown when there are no entries to derive a range from.
pub const DEFAULT_RANGE_DAYS: u64 = 14;

/// Inclusive calendar date range.
///
/// A range whose `end` precedes `start` is allowed and simply contains no day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Number of days in the range, counting both ends.
    pub fn day_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let span = (self.end - self.start).num_days();
        usize::try_from(span).map_or(0, |days| days + 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every day of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }

    /// Range spanning the first to the last local entry date.
    ///
    /// With no entries the range ends `today` and covers [`DEFAULT_RANGE_DAYS`]
    /// days before it.
    pub fn from_entries<T: TimeZone>(entries: &[JournalEntry], tz: &T, today: NaiveDate) -> Self {
        let mut dates = entries.iter().map(|entry| local_date(&entry.created_at, tz));
        let Some(first) = dates.next() else {
            let start = today
                .checked_sub_days(Days::new(DEFAULT_RANGE_DAYS))
                .unwrap_or(today);
            return Self::new(start, today);
        };

        let (start, end) = dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        });
        Self::new(start, end)
    }

    /// Converts a date-picker selection into a range.
    ///
    /// The picker reports the start day's local midnight and an exclusive end
    /// instant (midnight after the last selected day), both in epoch millis.
    pub fn from_picker_millis<T: TimeZone>(
        start_millis: i64,
        end_millis_exclusive: i64,
        tz: &T,
    ) -> Option<Self> {
        let start = local_date(&DateTime::<Utc>::from_timestamp_millis(start_millis)?, tz);
        let end_exclusive = local_date(
            &DateTime::<Utc>::from_timestamp_millis(end_millis_exclusive)?,
            tz,
        );
        let end = end_exclusive.pred_opt()?;
        Some(Self::new(start, end))
    }

    /// Picker millis for this range: start midnight and the exclusive end midnight.
    pub fn to_picker_millis<T: TimeZone>(&self, tz: &T) -> (i64, i64) {
        let end_exclusive = self.end.succ_opt().unwrap_or(self.end);
        (
            local_midnight(self.start, tz).timestamp_millis(),
            local_midnight(end_exclusive, tz).timestamp_millis(),
        )
    }
}

/// Calendar date of `instant` on the wall clock of `tz`.
pub fn local_date<T: TimeZone>(instant: &DateTime<Utc>, tz: &T) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// First instant of `date` in `tz`.
///
/// When midnight falls into a DST gap the first valid instant after it is
/// used, so the result always maps back to `date`.
pub fn local_midnight<T: TimeZone>(date: NaiveDate, tz: &T) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    resolve_local(midnight, tz)
        .or_else(|| {
            (1..=3)
                .filter_map(|hours| midnight.checked_add_signed(chrono::Duration::hours(hours)))
                .find_map(|candidate| resolve_local(candidate, tz))
        })
        .unwrap_or_else(|| midnight.and_utc())
}

fn resolve_local<T: TimeZone>(naive: NaiveDateTime, tz: &T) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{local_date, local_midnight, DateRange};
    use crate::model::entry::JournalEntry;
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_count_is_inclusive_and_zero_when_reversed() {
        assert_eq!(DateRange::new(date(2025, 1, 1), date(2025, 1, 1)).day_count(), 1);
        assert_eq!(DateRange::new(date(2025, 1, 30), date(2025, 2, 2)).day_count(), 4);
        assert_eq!(DateRange::new(date(2025, 2, 2), date(2025, 1, 30)).day_count(), 0);
        assert_eq!(
            DateRange::new(date(2025, 2, 2), date(2025, 1, 30)).days().count(),
            0
        );
    }

    #[test]
    fn from_entries_spans_local_dates() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let early = JournalEntry::new(Utc.with_ymd_and_hms(2025, 4, 1, 16, 0, 0).unwrap());
        let late = JournalEntry::new(Utc.with_ymd_and_hms(2025, 4, 3, 1, 0, 0).unwrap());

        let range = DateRange::from_entries(&[late, early], &tz, date(2030, 1, 1));
        assert_eq!(range, DateRange::new(date(2025, 4, 2), date(2025, 4, 3)));
    }

    #[test]
    fn from_entries_falls_back_to_recent_two_weeks() {
        let range = DateRange::from_entries(&[], &Utc, date(2025, 6, 15));
        assert_eq!(range, DateRange::new(date(2025, 6, 1), date(2025, 6, 15)));
    }

    #[test]
    fn picker_millis_use_exclusive_end() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let range = DateRange::new(date(2025, 3, 10), date(2025, 3, 12));

        let (start_ms, end_ms) = range.to_picker_millis(&tz);
        assert_eq!(
            DateRange::from_picker_millis(start_ms, end_ms, &tz),
            Some(range)
        );
    }

    #[test]
    fn local_midnight_maps_back_to_same_date() {
        let tz = FixedOffset::east_opt(-3 * 3600).unwrap();
        let midnight = local_midnight(date(2025, 7, 4), &tz);
        assert_eq!(local_date(&midnight, &tz), date(2025, 7, 4));
        assert_eq!(midnight, Utc.with_ymd_and_hms(2025, 7, 4, 3, 0, 0).unwrap());
    }
}

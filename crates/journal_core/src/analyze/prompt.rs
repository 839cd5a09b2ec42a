//! Summary prompt construction.

use crate::model::entry::JournalEntry;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fmt::Write;

/// Instruction line that opens every summary prompt.
pub const PROMPT_HEADER: &str =
    "Summarize these journal entries and produce insights and 5 todos:";

/// System message sent alongside the prompt.
pub const SYSTEM_PROMPT: &str = "You are a concise journaling assistant.";

/// Body characters kept per entry.
pub const MAX_BODY_CHARS: usize = 500;

/// Look-back window offered by the analyze screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AnalyzeWindow {
    #[default]
    Week,
    Fortnight,
    Month,
}

impl AnalyzeWindow {
    pub const ALL: [Self; 3] = [Self::Week, Self::Fortnight, Self::Month];

    pub fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Fortnight => 14,
            Self::Month => 30,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|window| window.days() == i64::from(days))
    }

    /// Exclusive lower bound of the window ending at `now`.
    pub fn since(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

/// Entries created strictly after the window start.
pub fn entries_in_window<'a>(
    entries: &'a [JournalEntry],
    now: DateTime<Utc>,
    window: AnalyzeWindow,
) -> impl Iterator<Item = &'a JournalEntry> {
    let since = window.since(now);
    entries.iter().filter(move |entry| entry.created_at > since)
}

/// Builds the user prompt: header line, then one line per entry in the window.
///
/// Each line reads `- [<local timestamp>] <title>: <body prefix>`.
pub fn build_summary_prompt<T: TimeZone>(
    entries: &[JournalEntry],
    now: DateTime<Utc>,
    window: AnalyzeWindow,
    tz: &T,
) -> String
where
    T::Offset: std::fmt::Display,
{
    let mut prompt = String::from(PROMPT_HEADER);
    prompt.push('\n');
    for entry in entries_in_window(entries, now, window) {
        let stamp = entry.created_at.with_timezone(tz).to_rfc3339();
        let body = entry.body.chars().take(MAX_BODY_CHARS).collect::<String>();
        // Writing into a String cannot fail.
        let _ = writeln!(prompt, "- [{stamp}] {}: {body}", entry.title);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::{build_summary_prompt, AnalyzeWindow, MAX_BODY_CHARS, PROMPT_HEADER};
    use crate::model::entry::JournalEntry;
    use chrono::{Duration, FixedOffset, TimeZone, Utc};

    #[test]
    fn prompt_lists_only_entries_inside_window() {
        let now = Utc.with_ymd_and_hms(2025, 8, 20, 12, 0, 0).unwrap();
        let mut recent = JournalEntry::new(now - Duration::days(2));
        recent.title = "hike".to_string();
        recent.body = "x".repeat(MAX_BODY_CHARS + 50);
        let mut boundary = JournalEntry::new(now - Duration::days(7));
        boundary.title = "boundary".to_string();

        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let prompt = build_summary_prompt(&[recent, boundary], now, AnalyzeWindow::Week, &tz);

        let lines = prompt.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], PROMPT_HEADER);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("- [2025-08-18T14:00:00+02:00] hike: "));
        assert!(lines[1].ends_with(&"x".repeat(MAX_BODY_CHARS)));
        assert!(!lines[1].contains(&"x".repeat(MAX_BODY_CHARS + 1)));
    }

    #[test]
    fn window_parses_supported_day_counts() {
        assert_eq!(AnalyzeWindow::from_days(14), Some(AnalyzeWindow::Fortnight));
        assert_eq!(AnalyzeWindow::from_days(10), None);
    }
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `journal_core` linkage.
//! - Print the compact per-day aggregate of a journal database.
//!
//! Usage: `journal_cli [db_path] [days]`. Without a path only the version
//! probe runs; `days` defaults to 14 and counts back from today.

use chrono::{Days, Local};
use journal_core::db::open_db;
use journal_core::metrics::range::DEFAULT_RANGE_DAYS;
use journal_core::{aggregate_days, DayAggregate, EntryRepository, SqliteEntryRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("journal_core ping={}", journal_core::ping());
    println!("journal_core version={}", journal_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(db_path) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let days = match args.next().map(|raw| raw.parse::<u64>()) {
        None => DEFAULT_RANGE_DAYS,
        Some(Ok(days)) if days > 0 => days,
        Some(_) => {
            eprintln!("days must be a positive integer");
            return ExitCode::FAILURE;
        }
    };

    match print_summary(&db_path, days) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(db_path: &str, days: u64) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("open {db_path}: {err}"))?;
    let entries = SqliteEntryRepository::new(&conn)
        .list_entries()
        .map_err(|err| err.to_string())?;

    let end = Local::now().date_naive();
    let start = end.checked_sub_days(Days::new(days - 1)).unwrap_or(end);
    let aggregates = aggregate_days(&entries, start, end, true, &Local);

    println!("entries={} range={start}..={end}", entries.len());
    for day in &aggregates {
        println!("{}", format_day(day));
    }
    Ok(())
}

fn format_day(day: &DayAggregate) -> String {
    let mood = day
        .mood
        .map_or_else(|| "-".to_string(), |mood| format!("{mood:.2}"));
    let counts = day.toggle_counts;
    format!(
        "{} sleep={:.2} mood={mood} x={} y={} z={} w={}",
        day.date, day.sleep_hours, counts.x, counts.y, counts.z, counts.w
    )
}

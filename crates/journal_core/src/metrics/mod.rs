//! Day-level statistics over journal entries.
//!
//! # Responsibility
//! - Bucket entries into wall-clock days of a caller-supplied time zone.
//! - Derive per-day sleep, mood and toggle-count aggregates for charting.
//! - Memoize the latest aggregate per (range, compact, snapshot version).
//!
//! # Invariants
//! - Aggregation is pure: no I/O, no shared state, no errors.
//! - Output dates are strictly ascending without duplicates.

pub mod aggregate;
pub mod cache;
pub mod range;
pub mod series;

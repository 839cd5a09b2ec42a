//! Journal domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep mood derivation rules next to the entry shape they feed.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId` that is never reused.
//! - Deletion is permanent; undo re-creates an equivalent entry with a new id.

pub mod entry;
pub mod mood;
pub mod prefs;
pub mod todo;

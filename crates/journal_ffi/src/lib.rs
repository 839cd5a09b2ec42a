//! Flutter bridge surface over `journal_core`.

pub mod api;

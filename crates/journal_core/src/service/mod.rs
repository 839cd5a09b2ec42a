//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Publish entry snapshots to observers after writes.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod entry_service;
pub mod entry_store;

//! Session aliases - short names for AI coding sessions
//!
//! Maps human-chosen alias names to session paths, persisted as a single
//! JSON document that is written atomically so a crash never leaves it
//! half-written.

pub mod aliases;
pub mod config;
pub mod storage;

pub use aliases::{AliasError, AliasStore, ListOptions};

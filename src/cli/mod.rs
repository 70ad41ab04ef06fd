//! Command-line interface for session aliases.
//!
//! Thin glue over [`session_aliases::AliasStore`]: each command parses its
//! arguments, runs one store operation, and prints the result.

/// Individual CLI command implementations.
pub mod commands;

/// Output format selection and result printing.
pub mod format;

pub use format::OutputFormat;

//! CLI commands for session aliases.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Remove aliases whose sessions no longer exist.
pub mod cleanup;

/// Show resolved configuration.
pub mod config;

/// Delete an alias.
pub mod delete;

/// Reverse lookup: aliases pointing at a session path.
pub mod for_session;

/// List and search aliases.
pub mod list;

/// Rename an alias.
pub mod rename;

/// Resolve an alias (or pass a literal path through).
pub mod resolve;

/// Create or repoint an alias.
pub mod set;

/// Display a single alias.
pub mod show;

/// Set or clear an alias title.
pub mod title;

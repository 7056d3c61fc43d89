//! Common infrastructure for the SONiC configuration CLI.
//!
//! This crate provides the shared layer used by the `config` command-line
//! front-end:
//!
//! - [`db`]: CONFIG_DB client abstraction ([`ConfigDb`]) with a Redis-backed
//!   implementation and an in-memory mock for unit testing
//! - [`resolver`]: command-name resolution with unique-prefix abbreviation
//!   and optional alias-file lookup
//! - [`alias`]: bidirectional interface name/alias conversion
//! - [`predicates`]: read-only membership and validity checks over table
//!   snapshots
//! - [`shell`]: safe shell command execution with proper quoting
//! - [`error`]: error types for CLI operations
//!
//! # Architecture
//!
//! One CLI invocation follows this pattern:
//!
//! 1. Resolve the typed command tokens against the registered command tree
//! 2. Validate arguments using the predicate helpers (converting aliases to
//!    canonical names where the naming mode requires it)
//! 3. Issue a bounded sequence of CONFIG_DB writes through [`ConfigDb`]
//! 4. Exit with 0 on success, non-zero on validation or backend failure
//!
//! # Example
//!
//! ```ignore
//! use sonic_utils_common::{
//!     db::{ConfigDb, EntryKey},
//!     error::CliResult,
//! };
//!
//! async fn remove_lag(db: &dyn ConfigDb, name: &str) -> CliResult<()> {
//!     db.set_entry("PORTCHANNEL", &EntryKey::simple(name), None).await
//! }
//! ```

pub mod alias;
pub mod db;
pub mod env;
pub mod error;
pub mod predicates;
pub mod resolver;
pub mod shell;
pub mod tables;

// Re-export commonly used items at crate root
pub use alias::InterfaceAliasConverter;
pub use db::{ConfigDb, EntryKey, FieldValue, FieldValues, FieldValuesExt, MockConfigDb, Table};
pub use error::{CliError, CliResult};
pub use resolver::{CommandResolver, ResolveError};

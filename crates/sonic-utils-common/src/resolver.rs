//! Command-name resolution with unique-prefix abbreviation.
//!
//! Lets operators type unambiguous prefixes ("po" for "portchannel") while
//! refusing silent guesses when intent is genuinely ambiguous. A static
//! alias table can additionally map alternate spellings to canonical
//! command names; alias lookup is tried after exact match and before
//! prefix abbreviation.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::env;
use crate::error::{CliError, CliResult};

/// Failure to resolve a requested command token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No registered command matches the token.
    #[error("No such command '{requested}'")]
    NoMatch {
        /// The token the operator typed.
        requested: String,
    },

    /// Several registered commands match and none is a common prefix.
    #[error("Too many matches: {}", .candidates.join(", "))]
    Ambiguous {
        /// The token the operator typed.
        requested: String,
        /// All matching command names, sorted alphabetically.
        candidates: Vec<String>,
    },
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoMatch { requested } => CliError::UnknownCommand { requested },
            ResolveError::Ambiguous { candidates, .. } => CliError::AmbiguousCommand {
                candidates: candidates.join(", "),
            },
        }
    }
}

/// Resolves a requested token against the registered names at one command
/// group level.
///
/// 1. An exact name match wins immediately.
/// 2. Otherwise all names whose lowercase form starts with the lowercase
///    token are candidates.
/// 3. Zero candidates fail with [`ResolveError::NoMatch`]; exactly one
///    resolves to it.
/// 4. With several candidates, the shortest wins if it is a prefix of every
///    candidate; otherwise resolution fails with [`ResolveError::Ambiguous`].
pub fn resolve_command(requested: &str, names: &[&str]) -> Result<String, ResolveError> {
    if names.contains(&requested) {
        return Ok(requested.to_string());
    }

    let lowered = requested.to_lowercase();
    let matches: Vec<&str> = names
        .iter()
        .copied()
        .filter(|n| n.to_lowercase().starts_with(&lowered))
        .collect();

    match matches.as_slice() {
        [] => Err(ResolveError::NoMatch {
            requested: requested.to_string(),
        }),
        [only] => Ok(only.to_string()),
        _ => {
            let mut shortest = matches[0];
            for name in &matches[1..] {
                if name.len() < shortest.len() {
                    shortest = name;
                }
            }
            if matches.iter().all(|n| n.starts_with(shortest)) {
                Ok(shortest.to_string())
            } else {
                let mut candidates: Vec<String> =
                    matches.iter().map(|n| n.to_string()).collect();
                candidates.sort_unstable();
                Err(ResolveError::Ambiguous {
                    requested: requested.to_string(),
                    candidates,
                })
            }
        }
    }
}

/// Command resolver carrying an optional static alias table.
#[derive(Debug, Default)]
pub struct CommandResolver {
    aliases: HashMap<String, String>,
}

impl CommandResolver {
    /// Creates a resolver with no aliases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a resolver from an alias file of `alias=canonical` lines.
    ///
    /// Blank lines and lines starting with `#` are skipped; malformed lines
    /// (no `=`) are ignored with a debug log.
    pub fn with_alias_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::user_error(format!("Cannot read alias file {}: {}", path.display(), e))
        })?;

        let mut aliases = HashMap::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((alias, target)) => {
                    aliases.insert(alias.trim().to_string(), target.trim().to_string());
                }
                None => debug!(line, "Skipping malformed alias line"),
            }
        }
        debug!(count = aliases.len(), path = %path.display(), "Loaded command aliases");
        Ok(Self { aliases })
    }

    /// Builds a resolver from the alias file named in the environment, if
    /// set and readable; otherwise a plain resolver.
    pub fn from_env() -> Self {
        env::alias_file()
            .and_then(|path| Self::with_alias_file(path).ok())
            .unwrap_or_default()
    }

    /// Resolves a token: exact match, then alias lookup, then prefix
    /// abbreviation. An alias only resolves if its target is registered at
    /// this group level.
    pub fn resolve(&self, requested: &str, names: &[&str]) -> Result<String, ResolveError> {
        if names.contains(&requested) {
            return Ok(requested.to_string());
        }
        if let Some(target) = self.aliases.get(requested) {
            if names.contains(&target.as_str()) {
                return Ok(target.clone());
            }
        }
        resolve_command(requested, names)
    }
}

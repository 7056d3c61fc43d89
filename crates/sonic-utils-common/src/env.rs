//! Environment variables consumed by the CLI.

use std::env;

/// When set (non-zero), selects the in-memory mock store and suppresses
/// subprocess execution.
pub const UNIT_TESTING_ENV: &str = "UTILITIES_UNIT_TESTING";

/// Selects how interface names are accepted and displayed.
pub const IFACE_MODE_ENV: &str = "SONIC_CLI_IFACE_MODE";

/// Optional path to a command alias file for the resolver.
pub const ALIAS_FILE_ENV: &str = "SONIC_CLI_ALIAS_FILE";

/// Interface naming mode for the CLI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfaceMode {
    /// Canonical names (e.g., "Ethernet0").
    Default,
    /// Vendor-facing aliases (e.g., "etp1").
    Alias,
}

/// Returns true when unit-testing mode is active.
pub fn unit_testing_mode() -> bool {
    matches!(env::var(UNIT_TESTING_ENV), Ok(v) if !v.is_empty() && v != "0")
}

/// Returns the interface naming mode selected by the environment.
pub fn interface_naming_mode() -> IfaceMode {
    match env::var(IFACE_MODE_ENV) {
        Ok(v) if v.eq_ignore_ascii_case("alias") => IfaceMode::Alias,
        _ => IfaceMode::Default,
    }
}

/// Returns the configured command alias file path, if any.
pub fn alias_file() -> Option<String> {
    env::var(ALIAS_FILE_ENV).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iface_mode_default() {
        // Unset or unrecognized values fall back to canonical naming.
        std::env::remove_var(IFACE_MODE_ENV);
        assert_eq!(interface_naming_mode(), IfaceMode::Default);
    }
}

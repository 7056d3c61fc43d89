//! Bidirectional interface name/alias conversion.
//!
//! Ports carry a vendor-facing display name (the `alias` field of the PORT
//! table) alongside their canonical name. The converter captures a one-time
//! snapshot of the PORT table at construction and translates in both
//! directions, preserving any sub-interface suffix ("Ethernet0.100").

use tracing::warn;

use crate::db::{ConfigDb, EntryKey, FieldValuesExt, Table};
use crate::error::CliResult;
use crate::tables::{fields, CFG_PORT_TABLE_NAME, SUBINTF_SEPARATOR};

/// Splits a name at the sub-interface separator, if present.
fn split_subintf(name: &str) -> (&str, Option<&str>) {
    match name.split_once(SUBINTF_SEPARATOR) {
        Some((parent, suffix)) => (parent, Some(suffix)),
        None => (name, None),
    }
}

/// Re-attaches a sub-interface suffix, if one was present.
fn join_subintf(base: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{}{}{}", base, SUBINTF_SEPARATOR, suffix),
        None => base.to_string(),
    }
}

/// Name/alias converter over a PORT table snapshot.
///
/// The snapshot is never refreshed; construct a new converter to pick up
/// PORT table changes. Aliases are assumed unique within one snapshot;
/// first match wins if that is violated.
pub struct InterfaceAliasConverter {
    port_dict: Table,
    /// Longest alias observed, for display alignment by callers.
    pub alias_max_length: usize,
}

impl InterfaceAliasConverter {
    /// Builds a converter from a fresh PORT table snapshot.
    pub async fn new(db: &dyn ConfigDb) -> CliResult<Self> {
        let port_dict = db.get_table(CFG_PORT_TABLE_NAME).await?;
        Ok(Self::from_port_table(port_dict))
    }

    /// Builds a converter from a snapshot the caller already holds.
    pub fn from_port_table(port_dict: Table) -> Self {
        if port_dict.is_empty() {
            warn!("PORT table is empty; interface alias conversion is pass-through");
        }
        let alias_max_length = port_dict
            .values()
            .filter_map(|fvs| fvs.get_field(fields::ALIAS))
            .map(str::len)
            .max()
            .unwrap_or(0);
        Self {
            port_dict,
            alias_max_length,
        }
    }

    /// Converts a canonical interface name to its alias.
    ///
    /// Unknown names (and empty input) are returned unchanged; a
    /// sub-interface suffix is preserved verbatim.
    pub fn name_to_alias(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        let (parent, suffix) = split_subintf(name);
        if let Some(fvs) = self.port_dict.get(&EntryKey::simple(parent)) {
            if let Some(alias) = fvs.get_field(fields::ALIAS) {
                return join_subintf(alias, suffix);
            }
        }
        name.to_string()
    }

    /// Converts an interface alias back to its canonical name.
    ///
    /// Unknown aliases (and empty input) are returned unchanged; a
    /// sub-interface suffix is preserved verbatim.
    pub fn alias_to_name(&self, alias: &str) -> String {
        if alias.is_empty() {
            return String::new();
        }
        let (parent, suffix) = split_subintf(alias);
        for (key, fvs) in &self.port_dict {
            if fvs.get_field(fields::ALIAS) == Some(parent) {
                return join_subintf(key.first(), suffix);
            }
        }
        alias.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_values;
    use pretty_assertions::assert_eq;

    fn test_converter() -> InterfaceAliasConverter {
        let mut ports = Table::new();
        ports.insert(
            EntryKey::simple("Ethernet0"),
            field_values! { "alias" => "etp1", "speed" => "100000" },
        );
        ports.insert(
            EntryKey::simple("Ethernet4"),
            field_values! { "alias" => "etp2" },
        );
        ports.insert(
            EntryKey::simple("Ethernet8"),
            field_values! { "alias" => "fortyGigE0/8" },
        );
        InterfaceAliasConverter::from_port_table(ports)
    }

    #[test]
    fn test_name_to_alias() {
        let conv = test_converter();
        assert_eq!(conv.name_to_alias("Ethernet0"), "etp1");
        assert_eq!(conv.name_to_alias("Ethernet4"), "etp2");
    }

    #[test]
    fn test_alias_to_name() {
        let conv = test_converter();
        assert_eq!(conv.alias_to_name("etp1"), "Ethernet0");
        assert_eq!(conv.alias_to_name("fortyGigE0/8"), "Ethernet8");
    }

    #[test]
    fn test_mutual_inverses() {
        let conv = test_converter();
        for name in ["Ethernet0", "Ethernet4", "Ethernet8"] {
            assert_eq!(conv.alias_to_name(&conv.name_to_alias(name)), name);
        }
    }

    #[test]
    fn test_subinterface_suffix_preserved() {
        let conv = test_converter();
        assert_eq!(conv.name_to_alias("Ethernet0.100"), "etp1.100");
        assert_eq!(conv.alias_to_name("etp1.100"), "Ethernet0.100");
    }

    #[test]
    fn test_unknown_name_unchanged() {
        let conv = test_converter();
        assert_eq!(conv.name_to_alias("Ethernet999"), "Ethernet999");
        assert_eq!(conv.alias_to_name("nosuchalias"), "nosuchalias");
        // Suffix stays attached for unknown parents too.
        assert_eq!(conv.name_to_alias("Ethernet999.42"), "Ethernet999.42");
    }

    #[test]
    fn test_empty_input_unchanged() {
        let conv = test_converter();
        assert_eq!(conv.name_to_alias(""), "");
        assert_eq!(conv.alias_to_name(""), "");
    }

    #[test]
    fn test_empty_port_table_is_pass_through() {
        let conv = InterfaceAliasConverter::from_port_table(Table::new());
        assert_eq!(conv.name_to_alias("Ethernet0"), "Ethernet0");
        assert_eq!(conv.alias_to_name("etp1"), "etp1");
        assert_eq!(conv.alias_max_length, 0);
    }

    #[test]
    fn test_alias_max_length() {
        let conv = test_converter();
        assert_eq!(conv.alias_max_length, "fortyGigE0/8".len());
    }

    #[test]
    fn test_port_without_alias_field_unchanged() {
        let mut ports = Table::new();
        ports.insert(EntryKey::simple("Ethernet0"), field_values! { "mtu" => "9100" });
        let conv = InterfaceAliasConverter::from_port_table(ports);
        assert_eq!(conv.name_to_alias("Ethernet0"), "Ethernet0");
    }
}

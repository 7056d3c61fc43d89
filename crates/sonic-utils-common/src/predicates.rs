//! Read-only membership and validity checks over table snapshots.
//!
//! All predicates treat an empty or missing table as "no match". None of
//! them mutates the store; the async ones re-fetch their table on every
//! call rather than caching.

use crate::db::{ConfigDb, EntryKey, FieldValuesExt, Table};
use crate::error::CliResult;
use crate::tables::{
    defaults, fields, CFG_LAG_TABLE_NAME, CFG_MIRROR_SESSION_TABLE_NAME, CFG_PORT_TABLE_NAME,
};

/// Checks if an interface is a member of any VLAN.
pub fn interface_is_in_vlan(vlan_member_table: &Table, interface_name: &str) -> bool {
    vlan_member_table
        .keys()
        .any(|key| key.second() == Some(interface_name))
}

/// Checks if an interface is a member of any port channel.
pub fn interface_is_in_portchannel(portchannel_member_table: &Table, interface_name: &str) -> bool {
    portchannel_member_table
        .keys()
        .any(|key| key.second() == Some(interface_name))
}

/// Checks if an interface has router (L3) configuration.
pub fn interface_is_router_port(interface_table: &Table, interface_name: &str) -> bool {
    interface_table
        .keys()
        .any(|key| key.first() == interface_name)
}

/// Checks if a port appears in any mirror session as source or destination.
pub fn interface_has_mirror_config(mirror_table: &Table, interface_name: &str) -> bool {
    mirror_table.values().any(|fvs| {
        fvs.get_field(fields::SRC_PORT) == Some(interface_name)
            || fvs.get_field(fields::DST_PORT) == Some(interface_name)
    })
}

/// Checks if a port is already configured as a mirror destination port.
pub async fn is_interface_mirror_dst_port(
    db: &dyn ConfigDb,
    interface_name: &str,
) -> CliResult<bool> {
    let mirror_table = db.get_table(CFG_MIRROR_SESSION_TABLE_NAME).await?;
    Ok(mirror_table
        .values()
        .any(|fvs| fvs.get_field(fields::DST_PORT) == Some(interface_name)))
}

/// Checks if a port exists in the PORT table.
pub async fn is_valid_port(db: &dyn ConfigDb, port_name: &str) -> CliResult<bool> {
    let port_table = db.get_table(CFG_PORT_TABLE_NAME).await?;
    Ok(port_table.contains_key(&EntryKey::simple(port_name)))
}

/// Checks if a port channel exists in the PORTCHANNEL table.
pub async fn is_valid_portchannel(db: &dyn ConfigDb, portchannel_name: &str) -> CliResult<bool> {
    let lag_table = db.get_table(CFG_LAG_TABLE_NAME).await?;
    Ok(lag_table.contains_key(&EntryKey::simple(portchannel_name)))
}

/// Checks if a VLAN ID falls within the valid range (1..=4094).
pub fn is_vlan_id_in_range(vlan_id: u16) -> bool {
    (defaults::MIN_VLAN_ID..=defaults::MAX_VLAN_ID).contains(&vlan_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockConfigDb;
    use crate::field_values;

    fn member_table(entries: &[(&str, &str)]) -> Table {
        entries
            .iter()
            .map(|(group, member)| {
                (
                    EntryKey::composite(*group, *member),
                    field_values! { "NULL" => "NULL" },
                )
            })
            .collect()
    }

    #[test]
    fn test_interface_is_in_vlan() {
        let table = member_table(&[("Vlan100", "Ethernet0"), ("Vlan200", "Ethernet4")]);
        assert!(interface_is_in_vlan(&table, "Ethernet0"));
        assert!(interface_is_in_vlan(&table, "Ethernet4"));
        assert!(!interface_is_in_vlan(&table, "Ethernet8"));
        // Group names never match as members.
        assert!(!interface_is_in_vlan(&table, "Vlan100"));
    }

    #[test]
    fn test_interface_is_in_portchannel() {
        let table = member_table(&[("PortChannel0001", "Ethernet0")]);
        assert!(interface_is_in_portchannel(&table, "Ethernet0"));
        assert!(!interface_is_in_portchannel(&table, "Ethernet4"));
        assert!(!interface_is_in_portchannel(&Table::new(), "Ethernet0"));
    }

    #[test]
    fn test_interface_is_router_port() {
        let mut table = Table::new();
        table.insert(EntryKey::simple("Ethernet0"), vec![]);
        table.insert(
            EntryKey::composite("Ethernet4", "10.0.0.1/31"),
            vec![],
        );
        assert!(interface_is_router_port(&table, "Ethernet0"));
        assert!(interface_is_router_port(&table, "Ethernet4"));
        assert!(!interface_is_router_port(&table, "Ethernet8"));
    }

    #[test]
    fn test_interface_has_mirror_config() {
        let mut table = Table::new();
        table.insert(
            EntryKey::simple("session1"),
            field_values! { "src_port" => "Ethernet0", "dst_port" => "Ethernet4" },
        );
        assert!(interface_has_mirror_config(&table, "Ethernet0"));
        assert!(interface_has_mirror_config(&table, "Ethernet4"));
        assert!(!interface_has_mirror_config(&table, "Ethernet8"));
    }

    #[tokio::test]
    async fn test_is_interface_mirror_dst_port() {
        let db = MockConfigDb::new();
        db.seed(
            "MIRROR_SESSION",
            EntryKey::simple("everflow0"),
            field_values! { "src_port" => "Ethernet0", "dst_port" => "Ethernet24" },
        );
        assert!(is_interface_mirror_dst_port(&db, "Ethernet24")
            .await
            .unwrap());
        // Source ports are not destinations.
        assert!(!is_interface_mirror_dst_port(&db, "Ethernet0")
            .await
            .unwrap());
        assert!(!is_interface_mirror_dst_port(&db, "Ethernet8")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_is_valid_port_and_portchannel() {
        let db = MockConfigDb::new();
        db.seed(
            "PORT",
            EntryKey::simple("Ethernet0"),
            field_values! { "alias" => "etp1" },
        );
        db.seed(
            "PORTCHANNEL",
            EntryKey::simple("PortChannel0001"),
            field_values! { "admin_status" => "up" },
        );

        assert!(is_valid_port(&db, "Ethernet0").await.unwrap());
        assert!(!is_valid_port(&db, "Ethernet4").await.unwrap());
        assert!(is_valid_portchannel(&db, "PortChannel0001").await.unwrap());
        assert!(!is_valid_portchannel(&db, "PortChannel0002").await.unwrap());
    }

    #[test]
    fn test_vlan_id_range_boundaries() {
        assert!(is_vlan_id_in_range(1));
        assert!(is_vlan_id_in_range(4094));
        assert!(!is_vlan_id_in_range(0));
        assert!(!is_vlan_id_in_range(4095));
    }
}

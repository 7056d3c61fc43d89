//! CONFIG_DB table and field name constants.
//!
//! These match the schema definitions used across SONiC.

/// CONFIG_DB table for port configuration.
pub const CFG_PORT_TABLE_NAME: &str = "PORT";

/// CONFIG_DB table for port channels.
pub const CFG_LAG_TABLE_NAME: &str = "PORTCHANNEL";

/// CONFIG_DB table for port channel membership.
pub const CFG_LAG_MEMBER_TABLE_NAME: &str = "PORTCHANNEL_MEMBER";

/// CONFIG_DB table for VLANs.
pub const CFG_VLAN_TABLE_NAME: &str = "VLAN";

/// CONFIG_DB table for VLAN membership.
pub const CFG_VLAN_MEMBER_TABLE_NAME: &str = "VLAN_MEMBER";

/// CONFIG_DB table for L3 interface configuration.
pub const CFG_INTF_TABLE_NAME: &str = "INTERFACE";

/// CONFIG_DB table for mirror sessions.
pub const CFG_MIRROR_SESSION_TABLE_NAME: &str = "MIRROR_SESSION";

/// Name prefix for VLAN interfaces (e.g., "Vlan100").
pub const VLAN_PREFIX: &str = "Vlan";

/// Name prefix for port channels (e.g., "PortChannel0001").
pub const LAG_PREFIX: &str = "PortChannel";

/// Separator between a parent port and its sub-interface suffix.
pub const SUBINTF_SEPARATOR: char = '.';

/// Field names used in CONFIG_DB tables.
pub mod fields {
    /// Vendor-facing display name of a port.
    pub const ALIAS: &str = "alias";

    /// Admin status field (up/down).
    pub const ADMIN_STATUS: &str = "admin_status";

    /// MTU field.
    pub const MTU: &str = "mtu";

    /// Minimum links for a port channel to come up.
    pub const MIN_LINKS: &str = "min_links";

    /// LACP fallback flag for a port channel.
    pub const FALLBACK: &str = "fallback";

    /// Numeric VLAN identifier on a VLAN entry.
    pub const VLANID: &str = "vlanid";

    /// Tagging mode on a VLAN membership entry.
    pub const TAGGING_MODE: &str = "tagging_mode";

    /// Mirror session source port.
    pub const SRC_PORT: &str = "src_port";

    /// Mirror session destination port.
    pub const DST_PORT: &str = "dst_port";

    /// Placeholder field for presence-only entries.
    pub const NULL: &str = "NULL";
}

/// Default values written by the command handlers.
pub mod defaults {
    /// Default admin status for newly added port channels.
    pub const DEFAULT_ADMIN_STATUS: &str = "up";

    /// Default MTU for newly added port channels.
    pub const DEFAULT_MTU: &str = "9100";

    /// Smallest valid VLAN ID.
    pub const MIN_VLAN_ID: u16 = 1;

    /// Largest valid VLAN ID.
    pub const MAX_VLAN_ID: u16 = 4094;
}

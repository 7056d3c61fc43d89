//! Port channel command handlers ('config portchannel ...').

use tracing::info;

use sonic_utils_common::db::{ConfigDb, EntryKey};
use sonic_utils_common::error::{CliError, CliResult};
use sonic_utils_common::field_values;
use sonic_utils_common::predicates::is_interface_mirror_dst_port;
use sonic_utils_common::tables::{
    defaults, fields, CFG_LAG_MEMBER_TABLE_NAME, CFG_LAG_TABLE_NAME,
};

/// Adds a port channel.
///
/// Writes defaults `admin_status=up`, `mtu=9100`; `min_links` is stored
/// only when non-zero, `fallback=true` only when the flag is not "false".
/// Re-adding an existing name overwrites it.
pub async fn add_portchannel(
    db: &dyn ConfigDb,
    portchannel_name: &str,
    min_links: u16,
    fallback: &str,
) -> CliResult<()> {
    let mut fvs = field_values! {
        fields::ADMIN_STATUS => defaults::DEFAULT_ADMIN_STATUS,
        fields::MTU => defaults::DEFAULT_MTU,
    };
    if min_links != 0 {
        fvs.push((fields::MIN_LINKS.to_string(), min_links.to_string()));
    }
    if fallback != "false" {
        fvs.push((fields::FALLBACK.to_string(), "true".to_string()));
    }

    db.set_entry(
        CFG_LAG_TABLE_NAME,
        &EntryKey::simple(portchannel_name),
        Some(fvs),
    )
    .await?;
    info!(portchannel = portchannel_name, "Added port channel");
    Ok(())
}

/// Removes a port channel. Deleting a non-existent name is not an error.
pub async fn remove_portchannel(db: &dyn ConfigDb, portchannel_name: &str) -> CliResult<()> {
    db.set_entry(CFG_LAG_TABLE_NAME, &EntryKey::simple(portchannel_name), None)
        .await?;
    info!(portchannel = portchannel_name, "Removed port channel");
    Ok(())
}

/// Adds a member port to a port channel.
///
/// A port configured as a mirror destination cannot be aggregated; that
/// case fails before any write is issued.
pub async fn add_portchannel_member(
    db: &dyn ConfigDb,
    portchannel_name: &str,
    port_name: &str,
) -> CliResult<()> {
    if is_interface_mirror_dst_port(db, port_name).await? {
        return Err(CliError::user_error(format!(
            "{} is configured as mirror destination port",
            port_name
        )));
    }

    db.set_entry(
        CFG_LAG_MEMBER_TABLE_NAME,
        &EntryKey::composite(portchannel_name, port_name),
        Some(field_values! { fields::NULL => fields::NULL }),
    )
    .await?;
    info!(
        portchannel = portchannel_name,
        port = port_name,
        "Added port channel member"
    );
    Ok(())
}

/// Removes a member port from a port channel.
///
/// Membership entries have historically been keyed in two encodings: the
/// composite key and a pre-joined string key. Both deletions are issued,
/// composite first, regardless of which (if either) exists.
pub async fn del_portchannel_member(
    db: &dyn ConfigDb,
    portchannel_name: &str,
    port_name: &str,
) -> CliResult<()> {
    db.set_entry(
        CFG_LAG_MEMBER_TABLE_NAME,
        &EntryKey::composite(portchannel_name, port_name),
        None,
    )
    .await?;
    db.set_entry(
        CFG_LAG_MEMBER_TABLE_NAME,
        &EntryKey::simple(format!("{}|{}", portchannel_name, port_name)),
        None,
    )
    .await?;
    info!(
        portchannel = portchannel_name,
        port = port_name,
        "Removed port channel member"
    );
    Ok(())
}

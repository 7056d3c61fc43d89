//! VLAN command handlers ('config vlan ...').
//!
//! All validation is performed before the first write of a handler; once
//! writes begin no rollback is attempted.

use tracing::info;

use sonic_utils_common::db::{ConfigDb, EntryKey};
use sonic_utils_common::error::{CliError, CliResult};
use sonic_utils_common::field_values;
use sonic_utils_common::predicates::{
    interface_has_mirror_config, interface_is_in_portchannel, interface_is_in_vlan,
    interface_is_router_port, is_valid_port, is_vlan_id_in_range,
};
use sonic_utils_common::tables::{
    fields, CFG_INTF_TABLE_NAME, CFG_LAG_MEMBER_TABLE_NAME, CFG_MIRROR_SESSION_TABLE_NAME,
    CFG_VLAN_MEMBER_TABLE_NAME, CFG_VLAN_TABLE_NAME, VLAN_PREFIX,
};

fn vlan_name(vid: u16) -> String {
    format!("{}{}", VLAN_PREFIX, vid)
}

fn check_vid(vid: u16) -> CliResult<()> {
    if !is_vlan_id_in_range(vid) {
        return Err(CliError::user_error(format!(
            "Invalid VLAN ID {} (1-4094)",
            vid
        )));
    }
    Ok(())
}

async fn vlan_exists(db: &dyn ConfigDb, name: &str) -> CliResult<bool> {
    let vlans = db.get_table(CFG_VLAN_TABLE_NAME).await?;
    Ok(vlans.contains_key(&EntryKey::simple(name)))
}

/// Adds a VLAN.
pub async fn add_vlan(db: &dyn ConfigDb, vid: u16) -> CliResult<()> {
    check_vid(vid)?;
    let name = vlan_name(vid);
    if vlan_exists(db, &name).await? {
        return Err(CliError::user_error(format!("{} already exists", name)));
    }

    db.set_entry(
        CFG_VLAN_TABLE_NAME,
        &EntryKey::simple(&name),
        Some(field_values! { fields::VLANID => vid }),
    )
    .await?;
    info!(vlan = %name, "Added VLAN");
    Ok(())
}

/// Deletes a VLAN, removing its memberships first.
pub async fn del_vlan(db: &dyn ConfigDb, vid: u16) -> CliResult<()> {
    check_vid(vid)?;
    let name = vlan_name(vid);
    if !vlan_exists(db, &name).await? {
        return Err(CliError::user_error(format!("{} does not exist", name)));
    }

    let members = db.get_table(CFG_VLAN_MEMBER_TABLE_NAME).await?;
    for key in members.keys().filter(|k| k.first() == name) {
        db.set_entry(CFG_VLAN_MEMBER_TABLE_NAME, key, None).await?;
    }
    db.set_entry(CFG_VLAN_TABLE_NAME, &EntryKey::simple(&name), None)
        .await?;
    info!(vlan = %name, "Deleted VLAN");
    Ok(())
}

/// Adds a port to a VLAN.
///
/// Router ports, port channel members, mirror-configured ports, and
/// existing members are rejected before any write.
pub async fn add_vlan_member(
    db: &dyn ConfigDb,
    vid: u16,
    port_name: &str,
    untagged: bool,
) -> CliResult<()> {
    check_vid(vid)?;
    let name = vlan_name(vid);
    if !vlan_exists(db, &name).await? {
        return Err(CliError::user_error(format!("{} does not exist", name)));
    }
    if !is_valid_port(db, port_name).await? {
        return Err(CliError::user_error(format!("Invalid port {}", port_name)));
    }

    let vlan_members = db.get_table(CFG_VLAN_MEMBER_TABLE_NAME).await?;
    if interface_is_in_vlan(&vlan_members, port_name) {
        return Err(CliError::user_error(format!(
            "{} is already a member of a VLAN",
            port_name
        )));
    }

    let intf_table = db.get_table(CFG_INTF_TABLE_NAME).await?;
    if interface_is_router_port(&intf_table, port_name) {
        return Err(CliError::user_error(format!(
            "{} is a router interface!",
            port_name
        )));
    }

    let lag_members = db.get_table(CFG_LAG_MEMBER_TABLE_NAME).await?;
    if interface_is_in_portchannel(&lag_members, port_name) {
        return Err(CliError::user_error(format!(
            "{} is part of a port channel!",
            port_name
        )));
    }

    let mirror_table = db.get_table(CFG_MIRROR_SESSION_TABLE_NAME).await?;
    if interface_has_mirror_config(&mirror_table, port_name) {
        return Err(CliError::user_error(format!(
            "{} has mirror config!",
            port_name
        )));
    }

    let tagging_mode = if untagged { "untagged" } else { "tagged" };
    db.set_entry(
        CFG_VLAN_MEMBER_TABLE_NAME,
        &EntryKey::composite(&name, port_name),
        Some(field_values! { fields::TAGGING_MODE => tagging_mode }),
    )
    .await?;
    info!(vlan = %name, port = port_name, tagging_mode, "Added VLAN member");
    Ok(())
}

/// Removes a port from a VLAN.
pub async fn del_vlan_member(db: &dyn ConfigDb, vid: u16, port_name: &str) -> CliResult<()> {
    check_vid(vid)?;
    let name = vlan_name(vid);
    if !vlan_exists(db, &name).await? {
        return Err(CliError::user_error(format!("{} does not exist", name)));
    }

    let key = EntryKey::composite(&name, port_name);
    let members = db.get_table(CFG_VLAN_MEMBER_TABLE_NAME).await?;
    if !members.contains_key(&key) {
        return Err(CliError::user_error(format!(
            "{} is not a member of {}",
            port_name, name
        )));
    }

    db.set_entry(CFG_VLAN_MEMBER_TABLE_NAME, &key, None).await?;
    info!(vlan = %name, port = port_name, "Removed VLAN member");
    Ok(())
}

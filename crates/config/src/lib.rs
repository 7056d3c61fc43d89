//! config - SONiC configuration command-line front-end
//!
//! Translates operator-issued CLI verbs into CONFIG_DB writes. Command
//! tokens are resolved with unique-prefix abbreviation before parsing, so
//! `config po add PortChannel0001` works as long as the prefix is
//! unambiguous.

mod cli;
mod config_mgmt;
mod portchannel;
mod vlan;

pub use cli::{build_cli, resolve_argv};

use clap::error::ErrorKind;
use clap::ArgMatches;

use sonic_utils_common::db::ConfigDb;
use sonic_utils_common::env::{self, IfaceMode};
use sonic_utils_common::error::{CliError, CliResult};
use sonic_utils_common::InterfaceAliasConverter;

/// Resolves abbreviations, parses, and dispatches one command line.
///
/// `argv` is the full argument vector including the program name. Help and
/// version requests print and return success.
pub async fn run(argv: Vec<String>, db: &dyn ConfigDb) -> CliResult<()> {
    let cli = build_cli();
    let argv = resolve_argv(&cli, &argv)?;

    let matches = match cli.try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return Ok(());
        }
        Err(e) => return Err(CliError::user_error(e.to_string())),
    };

    dispatch(&matches, db).await
}

/// Returns the canonical form of an operator-supplied port name, honoring
/// the interface naming mode.
async fn canonical_port_name(db: &dyn ConfigDb, input: &str) -> CliResult<String> {
    match env::interface_naming_mode() {
        IfaceMode::Default => Ok(input.to_string()),
        IfaceMode::Alias => {
            let converter = InterfaceAliasConverter::new(db).await?;
            Ok(converter.alias_to_name(input))
        }
    }
}

fn arg_str<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

async fn dispatch(matches: &ArgMatches, db: &dyn ConfigDb) -> CliResult<()> {
    match matches.subcommand() {
        Some(("portchannel", m)) => match m.subcommand() {
            Some(("add", m)) => {
                let min_links = m.get_one::<u16>("min_links").copied().unwrap_or(0);
                portchannel::add_portchannel(
                    db,
                    arg_str(m, "portchannel_name"),
                    min_links,
                    arg_str(m, "fallback"),
                )
                .await
            }
            Some(("del", m)) => {
                portchannel::remove_portchannel(db, arg_str(m, "portchannel_name")).await
            }
            Some(("member", m)) => match m.subcommand() {
                Some(("add", m)) => {
                    let port = canonical_port_name(db, arg_str(m, "port_name")).await?;
                    portchannel::add_portchannel_member(
                        db,
                        arg_str(m, "portchannel_name"),
                        &port,
                    )
                    .await
                }
                Some(("del", m)) => {
                    let port = canonical_port_name(db, arg_str(m, "port_name")).await?;
                    portchannel::del_portchannel_member(
                        db,
                        arg_str(m, "portchannel_name"),
                        &port,
                    )
                    .await
                }
                _ => unreachable!("subcommand required"),
            },
            _ => unreachable!("subcommand required"),
        },
        Some(("vlan", m)) => match m.subcommand() {
            Some(("add", m)) => {
                let vid = m.get_one::<u16>("vid").copied().unwrap_or(0);
                vlan::add_vlan(db, vid).await
            }
            Some(("del", m)) => {
                let vid = m.get_one::<u16>("vid").copied().unwrap_or(0);
                vlan::del_vlan(db, vid).await
            }
            Some(("member", m)) => match m.subcommand() {
                Some(("add", m)) => {
                    let vid = m.get_one::<u16>("vid").copied().unwrap_or(0);
                    let port = canonical_port_name(db, arg_str(m, "port_name")).await?;
                    let untagged = m.get_flag("untagged");
                    vlan::add_vlan_member(db, vid, &port, untagged).await
                }
                Some(("del", m)) => {
                    let vid = m.get_one::<u16>("vid").copied().unwrap_or(0);
                    let port = canonical_port_name(db, arg_str(m, "port_name")).await?;
                    vlan::del_vlan_member(db, vid, &port).await
                }
                _ => unreachable!("subcommand required"),
            },
            _ => unreachable!("subcommand required"),
        },
        Some(("save", m)) => {
            config_mgmt::save(
                m.get_flag("yes"),
                m.get_one::<String>("filename").map(String::as_str),
            )
            .await
        }
        Some(("reload", m)) => {
            config_mgmt::reload(
                m.get_flag("yes"),
                m.get_one::<String>("filename").map(String::as_str),
            )
            .await
        }
        _ => unreachable!("subcommand required"),
    }
}

//! Command tree definition and abbreviation preprocessing.
//!
//! The clap command tree is the registry; before parsing, every group and
//! command token in argv is rewritten to its canonical name through the
//! resolver, so operators can type unambiguous prefixes or aliases from the
//! alias file.

use clap::{value_parser, Arg, ArgAction, Command};

use sonic_utils_common::error::CliResult;
use sonic_utils_common::resolver::CommandResolver;

/// Builds the `config` command tree.
pub fn build_cli() -> Command {
    Command::new("config")
        .about("SONiC command line - 'config' command")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(portchannel_cli())
        .subcommand(vlan_cli())
        .subcommand(
            Command::new("save")
                .about("Save current configuration to a file")
                .arg(yes_arg())
                .arg(Arg::new("filename").value_name("filename")),
        )
        .subcommand(
            Command::new("reload")
                .about("Clear current configuration and import a previous saved config DB dump file")
                .arg(yes_arg())
                .arg(Arg::new("filename").value_name("filename")),
        )
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .short('y')
        .long("yes")
        .action(ArgAction::SetTrue)
}

fn portchannel_cli() -> Command {
    Command::new("portchannel")
        .about("Configure port channel")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("add")
                .about("Add port channel")
                .arg(
                    Arg::new("portchannel_name")
                        .value_name("portchannel_name")
                        .required(true),
                )
                .arg(
                    Arg::new("min_links")
                        .long("min-links")
                        .value_parser(value_parser!(u16))
                        .default_value("0"),
                )
                .arg(Arg::new("fallback").long("fallback").default_value("false")),
        )
        .subcommand(
            Command::new("del").about("Remove port channel").arg(
                Arg::new("portchannel_name")
                    .value_name("portchannel_name")
                    .required(true),
            ),
        )
        .subcommand(
            Command::new("member")
                .about("Configure port channel member")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("add")
                        .about("Add member to port channel")
                        .arg(
                            Arg::new("portchannel_name")
                                .value_name("portchannel_name")
                                .required(true),
                        )
                        .arg(Arg::new("port_name").value_name("port_name").required(true)),
                )
                .subcommand(
                    Command::new("del")
                        .about("Remove member from portchannel")
                        .arg(
                            Arg::new("portchannel_name")
                                .value_name("portchannel_name")
                                .required(true),
                        )
                        .arg(Arg::new("port_name").value_name("port_name").required(true)),
                ),
        )
}

fn vlan_cli() -> Command {
    Command::new("vlan")
        .about("Configure VLAN")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("add").about("Add VLAN").arg(
                Arg::new("vid")
                    .value_name("vid")
                    .required(true)
                    .value_parser(value_parser!(u16)),
            ),
        )
        .subcommand(
            Command::new("del").about("Delete VLAN").arg(
                Arg::new("vid")
                    .value_name("vid")
                    .required(true)
                    .value_parser(value_parser!(u16)),
            ),
        )
        .subcommand(
            Command::new("member")
                .about("Configure VLAN membership")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("add")
                        .about("Add VLAN member")
                        .arg(
                            Arg::new("vid")
                                .value_name("vid")
                                .required(true)
                                .value_parser(value_parser!(u16)),
                        )
                        .arg(Arg::new("port_name").value_name("port_name").required(true))
                        .arg(
                            Arg::new("untagged")
                                .short('u')
                                .long("untagged")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("del")
                        .about("Delete VLAN member")
                        .arg(
                            Arg::new("vid")
                                .value_name("vid")
                                .required(true)
                                .value_parser(value_parser!(u16)),
                        )
                        .arg(Arg::new("port_name").value_name("port_name").required(true)),
                ),
        )
}

/// Rewrites group/command tokens in argv to their canonical names.
///
/// Walks the command tree level by level: each non-option token is resolved
/// against the subcommand names registered at the current level, then the
/// walk descends into the matched subcommand. Rewriting stops at the first
/// leaf command so positional arguments are never touched; option tokens
/// are passed through unchanged.
pub fn resolve_argv(root: &Command, argv: &[String]) -> CliResult<Vec<String>> {
    let resolver = CommandResolver::from_env();
    let mut out = Vec::with_capacity(argv.len());
    let mut iter = argv.iter();

    if let Some(bin) = iter.next() {
        out.push(bin.clone());
    }

    let mut current = Some(root);
    for token in iter {
        match current {
            Some(group) if group.has_subcommands() && !token.starts_with('-') => {
                let names: Vec<&str> = group.get_subcommands().map(Command::get_name).collect();
                let resolved = resolver.resolve(token, &names)?;
                current = group.find_subcommand(&resolved);
                out.push(resolved);
            }
            _ => out.push(token.clone()),
        }
    }
    Ok(out)
}

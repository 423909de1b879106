// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for smbcn using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! smbcn [global options] <command>
//! connect <COMP> [-S share] [-D domain] [-U user] [-P pwd] [-T] [-H]
//! disconnect [COMP] [-S share] [-H]
//! schema-connect [KEY:VALUE...] [-t query] [-f file] [-N prop] [-d dir] [-E enc] [-T] [-H]
//! tasks [-t query] [-f file] [-N prop] [-d dir] [-E enc]
//! sessions
//! options | configs | version
//! ```

pub mod connect;
pub mod global;
pub mod schema;

#[cfg(test)]
mod tests;

use crate::cli::connect::{ConnectArgs, DisconnectArgs};
use crate::cli::global::GlobalOptions;
use crate::cli::schema::{SchemaConnectArgs, TasksArgs};
use clap::{Parser, Subcommand};

/// SMB connection helper driving `net use`.
#[derive(Debug, Parser)]
#[command(
    name = "smbcn",
    author,
    version,
    about = "SMB connection helper driving `net use`",
    long_about = "smbcn Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Connects to and disconnects from SMB resources with `net use`.\n\n\
                  `smbcn schema-connect` connects every task of a connection\n\
                  schema stored in a JSON settings file. See\n\
                  `smbcn <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  smbcn reads `smbcn.toml` from the current directory when present,\n\
                  then every file given with --config, then SMBCN_* environment\n\
                  variables such as SMBCN_NET__TIMEOUT_SECS=30. Command-line\n\
                  options override all of them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used by smbcn.
    Configs,

    /// Connects to one resource.
    Connect(ConnectArgs),

    /// Disconnects from one resource, or from all of them.
    Disconnect(DisconnectArgs),

    /// Connects the tasks of a connection schema.
    #[command(name = "schema-connect", visible_alias = "schemaConnect")]
    SchemaConnect(SchemaConnectArgs),

    /// Lists the schema tasks a query selects.
    Tasks(TasksArgs),

    /// Shows the current `net use` sessions.
    Sessions,
}

impl Command {
    /// `section/key=value` overrides contributed by the command's own options.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        match self {
            Self::SchemaConnect(args) => args.schema.to_config_overrides(),
            Self::Tasks(args) => args.schema.to_config_overrides(),
            _ => Vec::new(),
        }
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `connect`, `disconnect` and `sessions`.

use crate::cli::connect::{ConnectArgs, DisconnectArgs};
use crate::config::Config;
use crate::error::Result;
use crate::smb::{ConnectOptions, Connector, NetUse, connect_logged, current_sessions};

use super::print_lines;

/// Run the connect command.
///
/// # Errors
///
/// Returns the connection failure when `--throws` is given.
pub async fn run_connect_command(args: &ConnectArgs, config: &Config) -> Result<()> {
    let net = NetUse::from_config(&config.net);
    print_lines(&connect(&net, args, config.global.dry).await?);
    Ok(())
}

/// Connects the resource named by `args`; returns the lines to print.
///
/// # Errors
///
/// Returns the connection failure when `args.throws` is set.
pub async fn connect(
    connector: &dyn Connector,
    args: &ConnectArgs,
    dry_run: bool,
) -> Result<Vec<String>> {
    let options = ConnectOptions {
        throws: args.throws,
        show_result: args.show_result,
        dry_run,
    };
    let outcome = connect_logged(connector, &args.request(), options).await?;
    Ok(outcome.trace.into_iter().chain(outcome.sessions).collect())
}

/// Run the disconnect command.
///
/// # Errors
///
/// Returns an error if `net use /delete` fails.
pub async fn run_disconnect_command(args: &DisconnectArgs, config: &Config) -> Result<()> {
    let net = NetUse::from_config(&config.net);
    print_lines(&disconnect(&net, args, config.global.dry).await?);
    Ok(())
}

/// Disconnects the resource named by `args`, or every session.
///
/// # Errors
///
/// Returns an error if the connector fails to disconnect.
pub async fn disconnect(
    connector: &dyn Connector,
    args: &DisconnectArgs,
    dry_run: bool,
) -> Result<Vec<String>> {
    let trace = connector.disconnect(&args.target(), dry_run).await?;
    let sessions = if args.show_result && !dry_run {
        current_sessions(connector).await
    } else {
        None
    };
    Ok(trace.into_iter().chain(sessions).collect())
}

/// Run the sessions command.
///
/// # Errors
///
/// Returns an error if `net use` cannot be run.
pub async fn run_sessions_command(config: &Config) -> Result<()> {
    let net = NetUse::from_config(&config.net);
    println!("{}", net.sessions().await?);
    Ok(())
}

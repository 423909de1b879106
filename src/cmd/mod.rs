// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   connect, disconnect, sessions, schema-connect, tasks, options, configs
//! ```
//!
//! Handlers that talk to `net` build a [`NetUse`](crate::smb::NetUse) from
//! the configuration and delegate to a function taking any
//! [`Connector`](crate::smb::Connector), which returns the lines to print.

pub mod config;
pub mod connect;
pub mod schema;


fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

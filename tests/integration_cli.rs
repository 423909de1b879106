// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use smbcn::cli::global::GlobalOptions;
use smbcn::cli::{Cli, Command};

// =============================================================================
// Simple Commands
// =============================================================================

#[test]
fn cli_simple_commands() {
    for (arg, expected) in [
        ("version", "Version"),
        ("options", "Options"),
        ("configs", "Configs"),
        ("sessions", "Sessions"),
    ] {
        let cli = Cli::try_parse_from(["smbcn", arg]).unwrap();
        assert_eq!(format!("{:?}", cli.command.unwrap()), expected);
    }
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["smbcn"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_unknown_command() {
    assert!(Cli::try_parse_from(["smbcn", "mount"]).is_err());
}

// =============================================================================
// Connect / Disconnect
// =============================================================================

#[test]
fn cli_connect_defaults() {
    let cli = Cli::try_parse_from(["smbcn", "connect", "files"]).unwrap();
    let Some(Command::Connect(args)) = cli.command else {
        panic!("expected connect");
    };

    assert_eq!(args.share, "IPC$");
    assert!(!args.throws);
    assert!(!args.show_result);
    assert_eq!(format!("{:?}", args.request()), r#"ConnectRequest { comp: "files", share: "IPC$", domain: "", user: "", pwd: "****" }"#);
}

#[test]
fn cli_connect_long_options() {
    let cli = Cli::try_parse_from([
        "smbcn",
        "connect",
        "files",
        "--share",
        "public",
        "--domain",
        "CORP",
        "--user",
        "tuckn",
        "--pwd",
        "p@ss word",
        "--throws",
        "--show-result",
    ])
    .unwrap();
    let Some(Command::Connect(args)) = cli.command else {
        panic!("expected connect");
    };

    let request = args.request();
    assert_eq!(request.unc_path(), r"\\files\public");
    assert_eq!(request.user_spec().as_deref(), Some(r"CORP\tuckn"));
    assert_eq!(request.pwd(), "p@ss word");
    assert!(args.throws && args.show_result);
}

#[test]
fn cli_disconnect_share_without_comp_drops_everything() {
    let cli = Cli::try_parse_from(["smbcn", "disconnect", "-S", "public"]).unwrap();
    let Some(Command::Disconnect(args)) = cli.command else {
        panic!("expected disconnect");
    };
    assert_eq!(args.target().unc_path(), "*");
}

// =============================================================================
// Schema Commands
// =============================================================================

#[test]
fn cli_schema_connect_both_spellings() {
    for name in ["schema-connect", "schemaConnect"] {
        let cli = Cli::try_parse_from(["smbcn", name, "a:1"]).unwrap();
        assert!(matches!(cli.command, Some(Command::SchemaConnect(_))), "{name}");
    }
}

#[test]
fn cli_schema_connect_overwrites_split_at_first_colon() {
    let cli = Cli::try_parse_from(["smbcn", "schema-connect", "pwd:a:b:c", "empty:"]).unwrap();
    let Some(Command::SchemaConnect(args)) = cli.command else {
        panic!("expected schema-connect");
    };

    let overwrites = args.overwrite_map();
    assert_eq!(overwrites["pwd"], "a:b:c");
    assert_eq!(overwrites["empty"], "");
    assert!(args.task.is_none());
}

#[test]
fn cli_schema_connect_file_options() {
    let cli = Cli::try_parse_from([
        "smbcn",
        "schema-connect",
        "--file",
        "net.json",
        "--prop-name",
        "smb",
        "--dir",
        "/etc/smbcn",
        "--encoding",
        "cp1252",
    ])
    .unwrap();

    assert_eq!(
        cli.command.unwrap().to_config_overrides(),
        [
            "schema/file=net.json",
            "schema/property=smb",
            "schema/dir=/etc/smbcn",
            "schema/encoding=cp1252",
        ]
    );
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_defaults() {
    let cli = Cli::try_parse_from(["smbcn", "sessions"]).unwrap();
    assert!(cli.global.to_config_overrides().is_empty());
}

#[test]
fn cli_global_overrides() {
    let global = GlobalOptions {
        log_level: Some(2),
        log_file: Some("logs/smbcn.log".into()),
        options: vec!["net/persistent=true".to_string()],
        ..GlobalOptions::default()
    };

    assert_eq!(
        global.to_config_overrides(),
        [
            "net/persistent=true",
            "global/output_log_level=2",
            "global/file_log_level=2",
            "global/log_file=logs/smbcn.log",
        ]
    );
}

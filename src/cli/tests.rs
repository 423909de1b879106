// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use crate::utility::encoding::Encoding;
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("smbcn").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_version() {
    let cli = parse(&["version"]);
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = parse(&["-l", "4", "-R", "-c", "a.toml", "--config", "b.toml", "sessions"]);

    assert!(cli.global.dry_run);
    assert_eq!(cli.global.configs.len(), 2);
    assert_eq!(
        cli.global.to_config_overrides(),
        [
            "global/output_log_level=4",
            "global/file_log_level=4",
            "global/dry=true",
        ]
    );
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = parse(&["sessions", "--dry-run", "--file-log-level", "6"]);
    assert!(cli.global.dry_run);
    assert_eq!(
        cli.global.to_config_overrides(),
        ["global/file_log_level=6", "global/dry=true"]
    );
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["smbcn", "-l", "7", "sessions"]).is_err());
}

#[test]
fn test_parse_connect() {
    let cli = parse(&[
        "connect", "11.22.33.44", "-U", "tuckn", "-P", "pass", "-D", "CORP", "-T", "-H",
    ]);
    let Some(Command::Connect(args)) = cli.command else {
        panic!("expected connect");
    };

    assert!(args.throws);
    assert!(args.show_result);
    let request = args.request();
    assert_eq!(request.unc_path(), r"\\11.22.33.44\IPC$");
    assert_eq!(request.user_spec().as_deref(), Some(r"CORP\tuckn"));
    assert_eq!(request.pwd(), "pass");
}

#[test]
fn test_parse_connect_requires_comp() {
    assert!(Cli::try_parse_from(["smbcn", "connect"]).is_err());
}

#[test]
fn test_parse_disconnect() {
    let Some(Command::Disconnect(args)) = parse(&["disconnect"]).command else {
        panic!("expected disconnect");
    };
    assert_eq!(args.target().unc_path(), "*");

    let Some(Command::Disconnect(args)) = parse(&["disconnect", "nas", "-S", "media"]).command
    else {
        panic!("expected disconnect");
    };
    assert_eq!(args.target().unc_path(), r"\\nas\media");
}

#[test]
fn test_parse_schema_connect() {
    let cli = parse(&[
        "schemaConnect",
        "anyVal1:secret",
        "url:http://host:8080",
        "noColon",
        "anyVal1:second",
        "-t",
        "work:*",
        "-d",
        "userProfile",
        "-E",
        "utf-16le",
        "-N",
        "mySchema",
    ]);
    let command = cli.command.unwrap();
    assert_eq!(
        command.to_config_overrides(),
        [
            "schema/property=mySchema",
            "schema/dir=userProfile",
            "schema/encoding=utf-16le",
        ]
    );

    let Command::SchemaConnect(args) = command else {
        panic!("expected schema-connect");
    };
    assert_eq!(args.task.as_deref(), Some("work:*"));
    assert_eq!(args.schema.encoding, Some(Encoding::Utf16Le));

    let overwrites = args.overwrite_map();
    assert_eq!(overwrites.len(), 2);
    assert_eq!(overwrites["anyVal1"], "secret");
    assert_eq!(overwrites["url"], "http://host:8080");
}

#[test]
fn test_overwrite_map_ignores_malformed_pairs() {
    let Some(Command::SchemaConnect(args)) = parse(&[
        "schema-connect",
        ":secret",
        "noColon",
        "user:first",
        "user:second",
    ])
    .command
    else {
        panic!("expected schema-connect");
    };

    let overwrites = args.overwrite_map();
    assert_eq!(overwrites.len(), 1);
    assert_eq!(overwrites["user"], "first");
    assert!(!overwrites.contains_key(""));
}

#[test]
fn test_parse_schema_connect_rejects_unknown_encoding() {
    assert!(Cli::try_parse_from(["smbcn", "schema-connect", "-E", "ebcdic"]).is_err());
}

#[test]
fn test_parse_tasks() {
    let Some(Command::Tasks(args)) = parse(&["tasks", "-t", "home", "-f", "other.json"]).command
    else {
        panic!("expected tasks");
    };
    assert_eq!(args.task.as_deref(), Some("home"));
    assert_eq!(args.schema.to_config_overrides(), ["schema/file=other.json"]);
}

// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    ConfigError, ConnectionError, ProcessError, SchemaError, SmbError, SmbResult, invalid_argument,
};

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "net".to_string(),
        key: "timeout_secs".to_string(),
        message: "must be positive".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'timeout_secs' in section '[net]': must be positive");
}

#[test]
fn test_connection_error_wraps_into_smb_error() {
    let err: SmbError = ConnectionError::TaskFailed {
        task: "work:office".to_string(),
        reason: "System error 53 has occurred.".to_string(),
    }
    .into();

    insta::assert_snapshot!(err.to_string(), @"connection error: task 'work:office' failed: System error 53 has occurred.");
}

#[test]
fn test_missing_property_display() {
    let err = SchemaError::MissingProperty {
        path: ".wsh/settings.json".to_string(),
        property: "connectSchema".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"property 'connectSchema' not found in '.wsh/settings.json'");
}

#[test]
fn test_non_zero_exit_includes_trimmed_stderr() {
    let err = ProcessError::NonZeroExit {
        command: "net".to_string(),
        code: 2,
        stderr: "System error 67 has occurred.\r\n".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "process 'net' exited with code 2: System error 67 has occurred."
    );

    let silent = ProcessError::NonZeroExit {
        command: "net".to_string(),
        code: 1,
        stderr: "  ".to_string(),
    };
    assert_eq!(silent.to_string(), "process 'net' exited with code 1");
}

#[test]
fn test_invalid_argument_helper() {
    let err = invalid_argument("query must not be empty");
    assert!(err.is_invalid_argument());
    assert_eq!(err.to_string(), "invalid argument: query must not be empty");
}

#[test]
fn test_io_error_is_boxed() {
    let err: SmbError = std::io::Error::other("disk gone").into();
    assert!(matches!(err, SmbError::Io(_)));
    assert!(!err.is_invalid_argument());
}

#[test]
fn test_smb_error_size() {
    // Box<str> variants (InvalidArgument, Other) are 16 bytes (fat pointer)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<SmbError>();
    assert!(size <= 24, "SmbError is {size} bytes, expected <= 24");
}

#[test]
fn test_smb_result_size() {
    let size = std::mem::size_of::<SmbResult<()>>();
    assert!(size <= 24, "SmbResult<()> is {size} bytes, expected <= 24");
}

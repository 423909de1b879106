// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! [global]  dry, output_log_level, file_log_level, log_file
//! [net]     executable, persistent, timeout_secs
//! [schema]  file, dir, property, encoding, default_query
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::schema::load::{DEFAULT_PROPERTY, DEFAULT_SETTINGS_FILE, SchemaDir};
use crate::utility::encoding::Encoding;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Print the `net use` commands instead of running them.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; no file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// How `net` is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetConfig {
    /// Executable name or path, resolved through PATH.
    pub executable: String,
    /// Value of `/persistent:` on connect.
    pub persistent: bool,
    /// Upper bound for a single `net` invocation.
    pub timeout_secs: u64,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            executable: "net".to_string(),
            persistent: false,
            timeout_secs: 60,
        }
    }
}

/// Where the connection schema lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Settings file name, relative to `dir` unless absolute.
    pub file: String,
    /// `portable`, `userProfile` or a directory path.
    pub dir: SchemaDir,
    /// Property of the settings file holding the schema.
    pub property: String,
    /// Encoding of the settings file.
    pub encoding: Encoding,
    /// Task query used when none is given.
    pub default_query: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_SETTINGS_FILE.to_string(),
            dir: SchemaDir::Portable,
            property: DEFAULT_PROPERTY.to_string(),
            encoding: Encoding::Utf8,
            default_query: "*".to_string(),
        }
    }
}

// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 SmbError (~24 bytes)
//!                        |
//!   +---------+------+---+----+--------+------+-------+
//!   |         |      |        |        |      |       |
//!   v         v      v        v        v      v       v
//! Invalid   Conn   Schema   Config   Proc    Io    Other
//! Box<str>  Box    Box      Box      Box     Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Connection ConnectFailed, DisconnectFailed, TaskFailed
//!   Schema     Read, Decode, Parse, MissingProperty
//!   Config     ParseError, InvalidValue, NotFound
//!   Process    ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout
//!
//! All variants boxed => SmbError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SmbError`].
pub type SmbResult<T> = std::result::Result<T, SmbError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum SmbError {
    /// Caller supplied an unusable value (empty query, malformed schema, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(Box<str>),

    /// A `net use` connection or disconnection failed.
    #[error("connection error: {0}")]
    Connection(#[from] Box<ConnectionError>),

    /// The connection schema could not be loaded.
    #[error("schema error: {0}")]
    Schema(#[from] Box<SchemaError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create an [`SmbError::InvalidArgument`].
pub fn invalid_argument(message: impl Into<String>) -> SmbError {
    SmbError::InvalidArgument(message.into().into_boxed_str())
}

impl SmbError {
    /// Whether this is an [`SmbError::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SmbError {
                fn from(err: $error) -> Self {
                    SmbError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConnectionError => Connection,
    SchemaError => Schema,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Connection Errors ---

/// Errors raised at the `net use` boundary.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Connecting to a share failed.
    #[error("failed to connect to {target}: {message}")]
    ConnectFailed { target: String, message: String },

    /// Disconnecting from a share failed.
    #[error("failed to disconnect from {target}: {message}")]
    DisconnectFailed { target: String, message: String },

    /// A schema task failed while `throws` was requested.
    #[error("task '{task}' failed: {reason}")]
    TaskFailed { task: String, reason: String },
}

// --- Schema Errors ---

/// Errors raised while loading a connection schema from disk.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Failed to read the settings file.
    #[error("failed to read schema file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file bytes are not valid in the requested encoding.
    #[error("failed to decode schema file '{path}' as {encoding}")]
    Decode { path: String, encoding: String },

    /// The file is not valid JSON.
    #[error("failed to parse schema file '{path}': {message}")]
    Parse { path: String, message: String },

    /// The settings file has no schema under the requested property.
    #[error("property '{property}' not found in '{path}'")]
    MissingProperty { path: String, property: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a code outside the accepted set.
    #[error("process '{command}' exited with code {code}{}", format_stderr(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

#[cfg(test)]
mod tests;

// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Application configuration.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. smbcn.toml (cwd, optional)
//! 3. --config FILE...
//! 4. SMBCN_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SMBCN_GLOBAL__DRY=true        → global.dry = true
//! SMBCN_NET__TIMEOUT_SECS=30    → net.timeout_secs = 30
//! SMBCN_SCHEMA__DIR=userProfile → schema.dir = "userProfile"
//! ```
//!
//! The connection schema itself is not part of this configuration; it is
//! read from the JSON settings file that `[schema]` points at.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, NetConfig, SchemaConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub net: NetConfig,
    pub schema: SchemaConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use smbcn::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("smbcn.toml")
    ///     .with_env_prefix("SMBCN")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Rejects values that deserialize but cannot work.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty `net.executable`,
    /// a zero `net.timeout_secs`, or empty schema file, property or query.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |section: &str, key: &str, message: &str| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.net.executable.trim().is_empty() {
            return Err(invalid("net", "executable", "must not be empty"));
        }
        if self.net.timeout_secs == 0 {
            return Err(invalid("net", "timeout_secs", "must be at least 1"));
        }
        if self.schema.file.is_empty() {
            return Err(invalid("schema", "file", "must not be empty"));
        }
        if self.schema.property.is_empty() {
            return Err(invalid("schema", "property", "must not be empty"));
        }
        if self.schema.default_query.is_empty() {
            return Err(invalid("schema", "default_query", "must not be empty"));
        }
        Ok(())
    }

    /// Format configuration options for display, one aligned `key = value`
    /// per line in key order.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_net_options(&mut options);
        self.format_schema_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_net_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("net.executable".into(), self.net.executable.clone());
        options.insert("net.persistent".into(), self.net.persistent.to_string());
        options.insert(
            "net.timeout_secs".into(),
            self.net.timeout_secs.to_string(),
        );
    }

    fn format_schema_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("schema.file".into(), self.schema.file.clone());
        options.insert("schema.dir".into(), self.schema.dir.to_string());
        options.insert("schema.property".into(), self.schema.property.clone());
        options.insert("schema.encoding".into(), self.schema.encoding.to_string());
        options.insert(
            "schema.default_query".into(),
            self.schema.default_query.clone(),
        );
    }
}

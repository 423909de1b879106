// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reading a connection schema out of a JSON settings file.
//!
//! ```text
//! SchemaDir::resolve()    portable    -> <cwd>/.wsh
//!                         userProfile -> %USERPROFILE%/.wsh  ($HOME/.wsh)
//!                         <path>      -> <path>
//!        |
//!        v
//! <dir>/settings.json --decode_text(encoding)--> { "connectSchema": {...}, ... }
//!        |
//!        v
//! parse_schema(property) --> ConnectionSchema
//! ```

use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use super::ConnectionSchema;
use crate::config::types::SchemaConfig;
use crate::error::{SchemaError, SmbError, SmbResult, invalid_argument};
use crate::utility::encoding::{Encoding, decode_text};

/// Directory name holding the settings file.
pub const SETTINGS_DIR: &str = ".wsh";
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_PROPERTY: &str = "connectSchema";

/// Directory the settings file is looked up in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SchemaDir {
    /// `.wsh` under the current directory.
    #[default]
    Portable,
    /// `.wsh` under the user's profile directory.
    UserProfile,
    /// An explicit directory.
    Path(PathBuf),
}

impl SchemaDir {
    /// The concrete directory for this choice.
    ///
    /// # Errors
    ///
    /// `Io` when the current directory is unavailable, `InvalidArgument` when
    /// neither `USERPROFILE` nor `HOME` is set.
    pub fn resolve(&self) -> SmbResult<PathBuf> {
        match self {
            Self::Portable => Ok(std::env::current_dir()?.join(SETTINGS_DIR)),
            Self::UserProfile => profile_dir()
                .map(|dir| dir.join(SETTINGS_DIR))
                .ok_or_else(|| invalid_argument("neither USERPROFILE nor HOME is set")),
            Self::Path(path) => Ok(path.clone()),
        }
    }
}

fn profile_dir() -> Option<PathBuf> {
    ["USERPROFILE", "HOME"]
        .into_iter()
        .filter_map(std::env::var_os)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

impl fmt::Display for SchemaDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portable => f.write_str("portable"),
            Self::UserProfile => f.write_str("userProfile"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for SchemaDir {
    type Err = SmbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(invalid_argument("schema directory must not be empty")),
            s if s.eq_ignore_ascii_case("portable") => Ok(Self::Portable),
            s if s.eq_ignore_ascii_case("userProfile") => Ok(Self::UserProfile),
            path => Ok(Self::Path(PathBuf::from(path))),
        }
    }
}

impl Serialize for SchemaDir {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaDir {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Where and how to read a schema.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct SchemaLocation {
    #[builder(default)]
    dir: SchemaDir,
    #[builder(default = DEFAULT_SETTINGS_FILE.to_string())]
    file: String,
    #[builder(default = DEFAULT_PROPERTY.to_string())]
    property: String,
    #[builder(default = Encoding::Utf8)]
    encoding: Encoding,
}

impl SchemaLocation {
    #[must_use]
    pub fn from_config(config: &SchemaConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            file: config.file.clone(),
            property: config.property.clone(),
            encoding: config.encoding,
        }
    }

    /// The settings file; an absolute `file` ignores `dir`.
    ///
    /// # Errors
    ///
    /// See [`SchemaDir::resolve`].
    pub fn path(&self) -> SmbResult<PathBuf> {
        let file = Path::new(&self.file);
        if file.is_absolute() {
            return Ok(file.to_path_buf());
        }
        Ok(self.dir.resolve()?.join(file))
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }
}

/// Reads the settings file and extracts the schema stored under the
/// location's property.
///
/// # Errors
///
/// - `SchemaError::Read` / `Decode` / `Parse` for an unreadable file
/// - `SchemaError::MissingProperty` when the property is absent or `null`
/// - `InvalidArgument` when the property does not hold a valid schema
pub fn load_schema(location: &SchemaLocation) -> SmbResult<ConnectionSchema> {
    let path = location.path()?;
    let origin = path.display().to_string();

    let bytes = std::fs::read(&path).map_err(|source| SchemaError::Read {
        path: origin.clone(),
        source,
    })?;
    let text = decode_text(location.encoding, &bytes).ok_or_else(|| SchemaError::Decode {
        path: origin.clone(),
        encoding: location.encoding.to_string(),
    })?;

    debug!(path = %origin, encoding = %location.encoding, "Read settings file");
    parse_schema(&text, &location.property, &origin)
}

/// Extracts the schema under `property` from settings JSON text. `origin`
/// names the source in error messages.
///
/// # Errors
///
/// As [`load_schema`], minus the I/O failures.
pub fn parse_schema(text: &str, property: &str, origin: &str) -> SmbResult<ConnectionSchema> {
    // Raw values keep the schema text intact, so task order survives.
    let settings: BTreeMap<String, Box<RawValue>> =
        serde_json::from_str(text).map_err(|e| SchemaError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

    let raw = settings
        .get(property)
        .filter(|raw| raw.get() != "null")
        .ok_or_else(|| SchemaError::MissingProperty {
            path: origin.to_string(),
            property: property.to_string(),
        })?;

    serde_json::from_str(raw.get()).map_err(|e| {
        invalid_argument(format!(
            "malformed connection schema '{property}' in '{origin}': {e}"
        ))
    })
}

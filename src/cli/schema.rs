// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `schema-connect` and `tasks` arguments.
//!
//! ```text
//! smbcn schema-connect anyVal1:secret -t "work:*" -d userProfile
//!                      └─ KEY:VALUE ─┘ └ query ┘ └─ schema file ─┘
//! ```

use clap::Args;
use std::collections::BTreeMap;
use tracing::warn;

use crate::utility::encoding::Encoding;

/// Which settings file holds the schema. Unset values come from `[schema]`.
#[derive(Debug, Clone, Default, Args)]
pub struct SchemaFileArgs {
    /// Settings file name.
    #[arg(short = 'f', long, value_name = "NAME")]
    pub file: Option<String>,

    /// Property holding the schema.
    #[arg(short = 'N', long = "prop-name", value_name = "NAME")]
    pub prop_name: Option<String>,

    /// Directory of the settings file: portable, userProfile or a path.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Encoding of the settings file (utf-8, utf-16le, cp1252, oem).
    #[arg(short = 'E', long, value_name = "ENCODING")]
    pub encoding: Option<Encoding>,
}

impl SchemaFileArgs {
    /// Converts the given options to `section/key=value` overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if let Some(ref file) = self.file {
            overrides.push(format!("schema/file={file}"));
        }
        if let Some(ref property) = self.prop_name {
            overrides.push(format!("schema/property={property}"));
        }
        if let Some(ref dir) = self.dir {
            overrides.push(format!("schema/dir={dir}"));
        }
        if let Some(encoding) = self.encoding {
            overrides.push(format!("schema/encoding={encoding}"));
        }
        overrides
    }
}

/// Arguments for the `schema-connect` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SchemaConnectArgs {
    /// Values for components the schema leaves null, as KEY:VALUE.
    #[arg(value_name = "KEY:VALUE")]
    pub overwrites: Vec<String>,

    /// Task name query; `*` matches any text.
    #[arg(short = 't', long = "task", value_name = "QUERY")]
    pub task: Option<String>,

    #[command(flatten)]
    pub schema: SchemaFileArgs,

    /// Stops at the first failed task.
    #[arg(short = 'T', long)]
    pub throws: bool,

    /// Lists the current sessions afterwards.
    #[arg(short = 'H', long = "show-result")]
    pub show_result: bool,
}

impl SchemaConnectArgs {
    /// Overwrites keyed by component name.
    ///
    /// Pairs split at the first `:`. A pair without `:` or with an empty name
    /// is ignored with a warning; a repeated name keeps its first value.
    #[must_use]
    pub fn overwrite_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for pair in &self.overwrites {
            match pair.split_once(':') {
                Some(("", _)) => warn!(pair = %pair, "Ignoring overwrite without a name"),
                Some((key, value)) => {
                    map.entry(key.to_string())
                        .or_insert_with(|| value.to_string());
                }
                None => warn!(pair = %pair, "Ignoring overwrite without ':'"),
            }
        }
        map
    }
}

/// Arguments for the `tasks` command.
#[derive(Debug, Clone, Default, Args)]
pub struct TasksArgs {
    /// Task name query; `*` matches any text.
    #[arg(short = 't', long = "task", value_name = "QUERY")]
    pub task: Option<String>,

    #[command(flatten)]
    pub schema: SchemaFileArgs,
}

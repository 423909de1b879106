// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Connection schemas: templated descriptions of many SMB resources.
//!
//! ```text
//! settings.json
//!   connectSchema
//!     components { name: string|null }
//!     tasks      { "work:office": Task, ... }   (declaration order kept)
//!          |
//!          v
//!   load::load_schema()
//!          |
//!          v
//!   resolver::resolve_and_connect(schema, query, options, connector)
//!     overwrites --> filter::filter_tasks --> template::substitute
//!          |
//!          v
//!     Connector::connect_surely (one task at a time)
//! ```

pub mod filter;
pub mod load;
pub mod resolver;
pub mod template;

#[cfg(test)]
mod tests;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::logging::PASSWORD_MASK;

/// Component values keyed by name; `None` is a JSON `null` awaiting an overwrite.
pub type Components = BTreeMap<String, Option<String>>;

/// A connection schema as stored in the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionSchema {
    /// Template values shared by every task.
    #[serde(deserialize_with = "deserialize_components")]
    pub components: Components,
    /// Tasks in declaration order.
    #[serde(alias = "resources")]
    pub tasks: TaskTable,
}

/// One connectable resource. Every text field may contain `${name}`
/// placeholders referring to [`ConnectionSchema::components`].
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Task {
    pub description: Option<String>,
    /// Unavailable tasks are skipped without building a request.
    #[serde(deserialize_with = "deserialize_available")]
    pub available: bool,
    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub comp: String,
    /// `None` means the `IPC$` share.
    pub share: Option<String>,
    pub domain: Option<String>,
    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub user: String,
    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub pwd: String,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            description: None,
            available: true,
            comp: String::new(),
            share: None,
            domain: None,
            user: String::new(),
            pwd: String::new(),
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("description", &self.description)
            .field("available", &self.available)
            .field("comp", &self.comp)
            .field("share", &self.share)
            .field("domain", &self.domain)
            .field("user", &self.user)
            .field("pwd", &PASSWORD_MASK)
            .finish()
    }
}

/// Tasks keyed by name, iterated in the order the file declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    entries: Vec<(String, Task)>,
}

impl TaskTable {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a task; a name seen before keeps its position and takes the new task.
    pub fn insert(&mut self, name: impl Into<String>, task: Task) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = task,
            None => self.entries.push((name, task)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.entries
            .iter()
            .find_map(|(existing, task)| (existing == name).then_some(task))
    }

    /// Task names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Task)> {
        self.entries.iter().map(|(name, task)| (name.as_str(), task))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Task)> for TaskTable {
    fn from_iter<I: IntoIterator<Item = (S, Task)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, task) in iter {
            table.insert(name, task);
        }
        table
    }
}

impl<'de> Deserialize<'de> for TaskTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TaskTableVisitor;

        impl<'de> Visitor<'de> for TaskTableVisitor {
            type Value = TaskTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of task names to tasks")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = TaskTable::new();
                while let Some((name, task)) = map.next_entry::<String, Task>()? {
                    table.insert(name, task);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TaskTableVisitor)
    }
}

/// Accepts strings, numbers, booleans and `null` as component values.
fn deserialize_components<'de, D>(deserializer: D) -> Result<Components, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(name, value)| {
            let value = match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                serde_json::Value::Bool(b) => Some(b.to_string()),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(de::Error::custom(format!(
                        "component '{name}' must be a string, number, boolean or null"
                    )));
                }
            };
            Ok((name, value))
        })
        .collect()
}

/// Only an explicit `false` marks a task unavailable.
fn deserialize_available<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value != serde_json::Value::Bool(false))
}

/// Reads a string field where `null` means empty.
fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

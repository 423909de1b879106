// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task selection by wildcard query.
//!
//! ```text
//! "work:*"  --wildcard_to_pattern-->  "work:.*"  --Regex-->  is_match (unanchored)
//! ```
//!
//! Apart from `*`, the query is a regular expression: `home|work` selects
//! both groups, and a plain name matches every task containing it.


use regex::Regex;

use super::TaskTable;
use crate::error::{SmbResult, invalid_argument};

/// Turns each `*` into `.*`; any other text is kept as written.
#[must_use]
pub fn wildcard_to_pattern(query: &str) -> String {
    query.replace('*', ".*")
}

/// Compiles a task query.
///
/// # Errors
///
/// `InvalidArgument` when the query is empty or is not a valid pattern.
pub fn compile_query(query: &str) -> SmbResult<Regex> {
    if query.is_empty() {
        return Err(invalid_argument("task query must not be empty"));
    }
    Regex::new(&wildcard_to_pattern(query))
        .map_err(|e| invalid_argument(format!("invalid task query '{query}': {e}")))
}

/// Names of the tasks matching `query`, in declaration order.
///
/// # Errors
///
/// `InvalidArgument` when the query is empty or is not a valid pattern.
pub fn filter_tasks(tasks: &TaskTable, query: &str) -> SmbResult<Vec<String>> {
    let matcher = compile_query(query)?;
    Ok(tasks
        .names()
        .filter(|name| matcher.is_match(name))
        .map(String::from)
        .collect())
}

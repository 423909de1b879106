// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolving a schema into connection requests and running them.
//!
//! # Per-task states
//!
//! ```text
//! pending --available: false--> Skipped
//!    |
//!    v
//! resolving --ok--> Succeeded
//!    |
//!    +--error--> Failed --throws--> remaining tasks NotAttempted
//! ```
//!
//! Tasks run strictly one after another. Overwrites are applied to a copy of
//! the components owned by the call, so the schema itself is never modified.


use std::collections::BTreeMap;
use tracing::{error, info, warn};

use super::filter::filter_tasks;
use super::template::{placeholders, substitute};
use super::{Components, ConnectionSchema, Task};
use crate::error::{ConnectionError, SmbResult, invalid_argument};
use crate::smb::{
    ConnectOptions, ConnectRequest, Connector, DEFAULT_SHARE, DryRunOp, connect_logged,
    current_sessions,
};

/// Options for one [`resolve_and_connect`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Values for components that the schema leaves `null`.
    pub overwrites: BTreeMap<String, String>,
    /// List the current sessions once all tasks ran.
    pub show_result: bool,
    /// Stop at the first failed task and return it as an error.
    pub throws: bool,
    /// Trace the would-be commands instead of running them.
    pub dry_run: bool,
}

impl ResolveOptions {
    fn validate(&self) -> SmbResult<()> {
        if self.overwrites.keys().any(String::is_empty) {
            return Err(invalid_argument("overwrite names must not be empty"));
        }
        Ok(())
    }
}

/// What happened to one matched task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// `available: false`; nothing was built or run.
    Skipped,
    Succeeded { request: ConnectRequest },
    Failed { request: ConnectRequest, reason: String },
    /// An earlier failure stopped the run.
    NotAttempted,
}

impl TaskOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
            Self::NotAttempted => "not_attempted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub name: String,
    pub outcome: TaskOutcome,
}

/// Ordered outcome of a schema connection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub query: String,
    /// One entry per matched task, in declaration order.
    pub tasks: Vec<TaskReport>,
    /// Dry-run trace of every would-be command.
    pub trace: Option<String>,
    /// The session table, when requested.
    pub sessions: Option<String>,
}

impl ResolveReport {
    fn count(&self, outcome: &str) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.outcome.as_str() == outcome)
            .count()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.count("succeeded")
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count("skipped")
    }

    /// Names of the matched tasks.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|task| task.name.as_str())
    }
}

/// Fills components whose value is `null`; anything else, `""` included,
/// stays as stored. Names the schema does not declare are ignored.
pub fn apply_overwrites(components: &mut Components, overwrites: &BTreeMap<String, String>) {
    for (name, value) in overwrites {
        if let Some(slot @ None) = components.get_mut(name) {
            *slot = Some(value.clone());
        }
    }
}

/// Builds the request for one task by substituting every field.
///
/// A missing share becomes `IPC$` and a missing domain the empty string.
/// Placeholders naming no component are kept verbatim and warned about.
#[must_use]
pub fn resolve_task(name: &str, task: &Task, components: &Components) -> ConnectRequest {
    let fields = [
        ("comp", Some(task.comp.as_str())),
        ("share", task.share.as_deref()),
        ("domain", task.domain.as_deref()),
        ("user", Some(task.user.as_str())),
        ("pwd", Some(task.pwd.as_str())),
    ];
    for (field, template) in fields {
        for placeholder in template.map(placeholders).unwrap_or_default() {
            if !components.contains_key(placeholder) {
                warn!(task = name, field, placeholder, "Unknown component in template");
            }
        }
    }

    ConnectRequest::builder()
        .comp(substitute(&task.comp, components))
        .share(substitute(
            task.share.as_deref().unwrap_or(DEFAULT_SHARE),
            components,
        ))
        .domain(substitute(task.domain.as_deref().unwrap_or_default(), components))
        .user(substitute(&task.user, components))
        .pwd(substitute(&task.pwd, components))
        .build()
}

/// Connects every task of `schema` whose name matches `query`.
///
/// Failed tasks are logged and recorded; the run continues unless
/// `options.throws` is set.
///
/// # Errors
///
/// - `InvalidArgument` for an empty or invalid query or overwrite map,
///   before any task runs
/// - `ConnectionError::TaskFailed` for the first failed task under `throws`
pub async fn resolve_and_connect(
    schema: &ConnectionSchema,
    query: &str,
    options: &ResolveOptions,
    connector: &dyn Connector,
) -> SmbResult<ResolveReport> {
    options.validate()?;
    let names = filter_tasks(&schema.tasks, query)?;

    info!(
        query,
        overwrites = options.overwrites.len(),
        dry_run = options.dry_run,
        "Start connecting using schema"
    );

    let mut components = schema.components.clone();
    apply_overwrites(&mut components, &options.overwrites);

    info!(query, matched = names.len(), "Matched tasks: {}", names.join(", "));

    let mut report = ResolveReport {
        query: query.to_string(),
        ..ResolveReport::default()
    };
    let mut traces = Vec::new();
    let mut escalated = None;

    for (index, name) in names.iter().enumerate() {
        let Some(task) = schema.tasks.get(name) else {
            continue;
        };

        let outcome = if escalated.is_some() {
            warn!(task = %name, outcome = "not_attempted", "Not attempted after an earlier failure");
            TaskOutcome::NotAttempted
        } else {
            info!(task = %name, "[{}/{}] Start the task", index + 1, names.len());
            run_task(name, task, &components, options, connector, &mut traces).await
        };

        if options.throws
            && escalated.is_none()
            && let TaskOutcome::Failed { reason, .. } = &outcome
        {
            escalated = Some(ConnectionError::TaskFailed {
                task: name.clone(),
                reason: reason.clone(),
            });
        }

        report.tasks.push(TaskReport {
            name: name.clone(),
            outcome,
        });
    }

    info!(
        query,
        succeeded = report.succeeded(),
        failed = report.failed(),
        skipped = report.skipped(),
        "Finished connecting using schema"
    );

    if let Some(err) = escalated {
        return Err(err.into());
    }

    if options.dry_run {
        report.trace = Some(DryRunOp::ConnectUsingSchema.block(traces));
    } else if options.show_result {
        report.sessions = current_sessions(connector).await;
    }

    Ok(report)
}

async fn run_task(
    name: &str,
    task: &Task,
    components: &Components,
    options: &ResolveOptions,
    connector: &dyn Connector,
    traces: &mut Vec<String>,
) -> TaskOutcome {
    if let Some(description) = task.description.as_deref() {
        info!(task = name, "{description}");
    }

    if !task.available {
        info!(task = name, outcome = "skipped", "available: false => Skip this task");
        return TaskOutcome::Skipped;
    }

    let request = resolve_task(name, task, components);
    let per_task = ConnectOptions {
        throws: true,
        show_result: false,
        dry_run: options.dry_run,
    };

    match connect_logged(connector, &request, per_task).await {
        Ok(outcome) => {
            traces.extend(outcome.trace);
            TaskOutcome::Succeeded { request }
        }
        Err(e) => {
            error!(task = name, outcome = "failed", error = %e, "Failed the task");
            TaskOutcome::Failed {
                request,
                reason: e.to_string(),
            }
        }
    }
}

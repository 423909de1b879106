// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `schema-connect` and `tasks`.

use anyhow::Context;
use tracing::warn;

use crate::cli::schema::{SchemaConnectArgs, TasksArgs};
use crate::config::Config;
use crate::config::types::SchemaConfig;
use crate::error::Result;
use crate::schema::ConnectionSchema;
use crate::schema::filter::filter_tasks;
use crate::schema::load::{SchemaLocation, load_schema};
use crate::schema::resolver::{ResolveOptions, resolve_and_connect};
use crate::smb::{Connector, NetUse};

use super::print_lines;

/// Run the schema-connect command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded, the query is invalid, or
/// a task fails while `--throws` is given.
pub async fn run_schema_connect_command(args: &SchemaConnectArgs, config: &Config) -> Result<()> {
    let schema = load(&config.schema)?;
    let net = NetUse::from_config(&config.net);
    print_lines(&schema_connect(&net, &schema, args, config).await?);
    Ok(())
}

/// Reads the schema `[schema]` points at.
///
/// # Errors
///
/// Returns an error if the settings file or the schema in it is unusable.
pub fn load(config: &SchemaConfig) -> Result<ConnectionSchema> {
    let location = SchemaLocation::from_config(config);
    load_schema(&location)
        .with_context(|| format!("failed to load connection schema '{}'", location.property()))
}

/// Connects the tasks of `schema` selected by `args`; returns the lines to print.
///
/// # Errors
///
/// Returns an error if the query or overwrites are invalid, or a task fails
/// while `args.throws` is set.
pub async fn schema_connect(
    connector: &dyn Connector,
    schema: &ConnectionSchema,
    args: &SchemaConnectArgs,
    config: &Config,
) -> Result<Vec<String>> {
    let query = args
        .task
        .as_deref()
        .unwrap_or(config.schema.default_query.as_str());
    let options = ResolveOptions {
        overwrites: args.overwrite_map(),
        show_result: args.show_result,
        throws: args.throws,
        dry_run: config.global.dry,
    };

    let report = resolve_and_connect(schema, query, &options, connector).await?;
    if report.tasks.is_empty() {
        warn!(query, "No task matches the query");
    }
    Ok(report.trace.into_iter().chain(report.sessions).collect())
}

/// Run the tasks command.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the query is invalid.
pub fn run_tasks_command(args: &TasksArgs, config: &Config) -> Result<()> {
    let schema = load(&config.schema)?;
    let query = args
        .task
        .as_deref()
        .unwrap_or(config.schema.default_query.as_str());

    let lines = list_tasks(&schema, query)?;
    if lines.is_empty() {
        println!("No task matches '{query}'");
    } else {
        print_lines(&lines);
    }
    Ok(())
}

/// One line per matched task: name, availability and description.
///
/// # Errors
///
/// Returns an error if the query is empty or invalid.
pub fn list_tasks(schema: &ConnectionSchema, query: &str) -> Result<Vec<String>> {
    let names = filter_tasks(&schema.tasks, query)?;
    let width = names.iter().map(String::len).max().unwrap_or(0);

    Ok(names
        .iter()
        .filter_map(|name| {
            let task = schema.tasks.get(name)?;
            let state = if task.available {
                "available"
            } else {
                "unavailable"
            };
            Some(match task.description.as_deref() {
                Some(description) => format!("{name:<width$}  {state:<11}  {description}"),
                None => format!("{name:<width$}  {state}"),
            })
        })
        .collect())
}

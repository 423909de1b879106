// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Connecting to and disconnecting from SMB resources.
//!
//! ```text
//! connect_logged(connector, request, options)
//!   log request (password ****)
//!        |
//!        v
//! Connector::connect_surely          <- trait seam (NetUse, test fakes)
//!   net use \\comp\share /delete /yes      (failure ignored)
//!   net use \\comp\share pwd /user:d\u /persistent:no
//!        |
//!        v
//! ConnectOutcome { trace (dry-run), sessions (show_result) }
//! ```
//!
//! Dry-run traces nest one `dry-run [<operation>]:` prefix per layer:
//!
//! ```text
//! dry-run [connect_logged]: dry-run [connect_surely]:
//! dry-run [disconnect]: dry-run [exec]: net use \\host\IPC$ /delete /yes
//! dry-run [connect]: dry-run [exec]: net use \\host\IPC$ pw /user:tuckn /persistent:no
//! ```

pub mod net_use;
#[cfg(test)]
pub(crate) mod testing;

pub use net_use::NetUse;

use bon::Builder;
use futures_util::future::BoxFuture;
use std::fmt;
use tracing::{error, info, warn};

use crate::error::SmbResult;
use crate::logging::PASSWORD_MASK;

/// Share used when a request names none.
pub const DEFAULT_SHARE: &str = "IPC$";

/// A fully resolved connection request; plain strings, no placeholders.
#[derive(Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct ConnectRequest {
    comp: String,
    #[builder(default = DEFAULT_SHARE.to_string())]
    share: String,
    #[builder(default)]
    domain: String,
    #[builder(default)]
    user: String,
    #[builder(default)]
    pwd: String,
}

impl ConnectRequest {
    /// Computer name or address.
    #[must_use]
    pub fn comp(&self) -> &str {
        &self.comp
    }

    /// Share name; an empty share means [`DEFAULT_SHARE`].
    #[must_use]
    pub fn share(&self) -> &str {
        if self.share.is_empty() {
            DEFAULT_SHARE
        } else {
            &self.share
        }
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The password in clear text. Never log this.
    #[must_use]
    pub fn pwd(&self) -> &str {
        &self.pwd
    }

    /// `\\comp\share`
    #[must_use]
    pub fn unc_path(&self) -> String {
        format!(r"\\{}\{}", self.comp, self.share())
    }

    /// `domain\user`, the bare user without a domain, or `None` without a user.
    #[must_use]
    pub fn user_spec(&self) -> Option<String> {
        match (self.domain.as_str(), self.user.as_str()) {
            (_, "") => None,
            ("", user) => Some(user.to_string()),
            (domain, user) => Some(format!(r"{domain}\{user}")),
        }
    }
}

impl fmt::Debug for ConnectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectRequest")
            .field("comp", &self.comp)
            .field("share", &self.share())
            .field("domain", &self.domain)
            .field("user", &self.user)
            .field("pwd", &PASSWORD_MASK)
            .finish()
    }
}

/// What to disconnect: one share of one computer, or every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectTarget {
    comp: Option<String>,
    share: String,
}

impl DisconnectTarget {
    /// Empty or missing parts fall back to "every session" and [`DEFAULT_SHARE`].
    #[must_use]
    pub fn new(comp: Option<String>, share: Option<String>) -> Self {
        Self {
            comp: comp.filter(|c| !c.is_empty()),
            share: share
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SHARE.to_string()),
        }
    }

    /// Every connected resource (`net use * /delete`).
    #[must_use]
    pub fn all() -> Self {
        Self::new(None, None)
    }

    /// `\\comp\share`, or `*` when no computer is named.
    #[must_use]
    pub fn unc_path(&self) -> String {
        self.comp
            .as_ref()
            .map_or_else(|| "*".to_string(), |comp| format!(r"\\{comp}\{}", self.share))
    }
}

impl From<&ConnectRequest> for DisconnectTarget {
    fn from(request: &ConnectRequest) -> Self {
        Self::new(
            Some(request.comp().to_string()),
            Some(request.share().to_string()),
        )
    }
}

/// Per-call options for [`connect_logged`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Return connection failures instead of logging and swallowing them.
    pub throws: bool,
    /// List the current sessions afterwards (skipped in dry-run).
    pub show_result: bool,
    /// Describe the commands instead of running them.
    pub dry_run: bool,
}

/// What a logged connection produced besides success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOutcome {
    /// The would-be commands, in dry-run mode.
    pub trace: Option<String>,
    /// The `net use` table, when requested.
    pub sessions: Option<String>,
}

/// Layers that label a dry-run trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DryRunOp {
    Exec,
    Connect,
    Disconnect,
    ConnectSurely,
    ConnectLogged,
    ConnectUsingSchema,
}

impl DryRunOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exec => "exec",
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::ConnectSurely => "connect_surely",
            Self::ConnectLogged => "connect_logged",
            Self::ConnectUsingSchema => "connect_using_schema",
        }
    }

    /// `dry-run [op]: <body>`
    #[must_use]
    pub fn line(self, body: &str) -> String {
        format!("dry-run [{}]: {body}", self.as_str())
    }

    /// `dry-run [op]:` followed by one entry per line.
    #[must_use]
    pub fn block<I, S>(self, entries: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut block = format!("dry-run [{}]:", self.as_str());
        for entry in entries {
            block.push('\n');
            block.push_str(entry.as_ref());
        }
        block
    }
}

impl fmt::Display for DryRunOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `net use` boundary.
///
/// Implementations return `Some(trace)` in dry-run mode and `None` after a
/// real invocation.
pub trait Connector: Send + Sync {
    /// Drops any existing session to the share, then connects to it.
    fn connect_surely<'a>(
        &'a self,
        request: &'a ConnectRequest,
        dry_run: bool,
    ) -> BoxFuture<'a, SmbResult<Option<String>>>;

    /// Disconnects one share, or every session for [`DisconnectTarget::all`].
    fn disconnect<'a>(
        &'a self,
        target: &'a DisconnectTarget,
        dry_run: bool,
    ) -> BoxFuture<'a, SmbResult<Option<String>>>;

    /// The current connection table as printed by `net use`.
    fn sessions(&self) -> BoxFuture<'_, SmbResult<String>>;
}

/// Connects one resource, logging the request and its outcome.
///
/// Without `throws` a failure is logged and swallowed; with it the error is
/// returned and left for the caller to log.
///
/// # Errors
///
/// The connector's error, only when `options.throws` is set.
pub async fn connect_logged(
    connector: &dyn Connector,
    request: &ConnectRequest,
    options: ConnectOptions,
) -> SmbResult<ConnectOutcome> {
    info!(
        share = ?request.share(),
        domain = ?request.domain(),
        user = ?request.user(),
        password = PASSWORD_MASK,
        throws = options.throws,
        "Connecting to \"{}\"",
        request.comp()
    );

    let trace = match connector.connect_surely(request, options.dry_run).await {
        Ok(trace) => {
            info!(comp = %request.comp(), outcome = "succeeded", "Succeeded the connecting");
            trace
        }
        Err(e) if options.throws => return Err(e),
        Err(e) => {
            error!(outcome = "failed", error = %e, "Failed to connect to {}", request.unc_path());
            None
        }
    };

    let sessions = if options.show_result && !options.dry_run {
        current_sessions(connector).await
    } else {
        None
    };

    Ok(ConnectOutcome {
        trace: trace.map(|trace| DryRunOp::ConnectLogged.line(&trace)),
        sessions,
    })
}

/// The session table, or `None` (with a warning) when listing fails.
pub async fn current_sessions(connector: &dyn Connector) -> Option<String> {
    match connector.sessions().await {
        Ok(table) => Some(table),
        Err(e) => {
            warn!(error = %e, "Failed to list the current sessions");
            None
        }
    }
}

// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! [`Connector`] backed by the Windows `net` tool.
//!
//! ```text
//! connect     net use \\comp\share [pwd] [/user:[domain\]user] /persistent:no
//! disconnect  net use \\comp\share /delete /yes     (or: net use * /delete /yes)
//! sessions    net use
//! ```
//!
//! Output is decoded from the OEM code page. The password argument is
//! masked in every logged command line.

use futures_util::future::BoxFuture;
use std::time::Duration;
use tracing::{debug, info};

use super::{ConnectRequest, Connector, DisconnectTarget, DryRunOp};
use crate::config::types::NetConfig;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{ConnectionError, SmbResult};
use crate::utility::encoding::Encoding;

/// Runs `net use` through [`ProcessBuilder`].
#[derive(Debug, Clone)]
pub struct NetUse {
    executable: String,
    persistent: bool,
    timeout: Duration,
}

impl Default for NetUse {
    fn default() -> Self {
        Self::from_config(&NetConfig::default())
    }
}

impl NetUse {
    #[must_use]
    pub fn from_config(config: &NetConfig) -> Self {
        Self {
            executable: config.executable.clone(),
            persistent: config.persistent,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// `net use \\comp\share [pwd] [/user:...] /persistent:yes|no`
    #[must_use]
    pub fn connect_command(&self, request: &ConnectRequest) -> ProcessBuilder {
        let mut command = self.command().arg("use").arg(request.unc_path());
        if !request.pwd().is_empty() {
            command = command.secret_arg(request.pwd());
        }
        if let Some(user) = request.user_spec() {
            command = command.arg(format!("/user:{user}"));
        }
        let persistent = if self.persistent { "yes" } else { "no" };
        command.arg(format!("/persistent:{persistent}"))
    }

    /// `net use <\\comp\share | *> /delete /yes`
    #[must_use]
    pub fn disconnect_command(&self, target: &DisconnectTarget) -> ProcessBuilder {
        let unc_path = target.unc_path();
        self.command()
            .args(["use", unc_path.as_str(), "/delete", "/yes"])
    }

    /// `net use`
    #[must_use]
    pub fn sessions_command(&self) -> ProcessBuilder {
        self.command().arg("use")
    }

    fn command(&self) -> ProcessBuilder {
        ProcessBuilder::new(&self.executable)
            .name("net")
            .stdout_encoding(Encoding::Oem)
            .stderr_encoding(Encoding::Oem)
            .capture_output()
            .timeout(self.timeout)
    }

    async fn exec(command: ProcessBuilder) -> SmbResult<ProcessOutput> {
        command.resolved()?.run().await
    }

    fn exec_trace(op: DryRunOp, command: &ProcessBuilder) -> String {
        op.line(&DryRunOp::Exec.line(&command.command_line()))
    }

    async fn connect_surely_impl(
        &self,
        request: &ConnectRequest,
        dry_run: bool,
    ) -> SmbResult<Option<String>> {
        let disconnect = self.disconnect_command(&DisconnectTarget::from(request));
        let connect = self.connect_command(request);

        if dry_run {
            return Ok(Some(DryRunOp::ConnectSurely.block([
                Self::exec_trace(DryRunOp::Disconnect, &disconnect),
                Self::exec_trace(DryRunOp::Connect, &connect),
            ])));
        }

        // A stale session to the same share makes net refuse new credentials
        match Self::exec(disconnect.quiet().flag(ProcessFlags::ALLOW_FAILURE)).await {
            Ok(output) if output.success() => {
                debug!(resource = %request.unc_path(), "Dropped the existing session");
            }
            Ok(output) => {
                debug!(exit_code = output.exit_code(), "No existing session to drop");
            }
            Err(e) => debug!(error = %e, "Ignoring the failed pre-connect disconnect"),
        }

        Self::exec(connect)
            .await
            .map_err(|e| ConnectionError::ConnectFailed {
                target: request.unc_path(),
                message: e.to_string(),
            })?;
        Ok(None)
    }

    async fn disconnect_impl(
        &self,
        target: &DisconnectTarget,
        dry_run: bool,
    ) -> SmbResult<Option<String>> {
        let command = self.disconnect_command(target);
        if dry_run {
            return Ok(Some(Self::exec_trace(DryRunOp::Disconnect, &command)));
        }

        info!(resource = %target.unc_path(), "Disconnecting");
        Self::exec(command)
            .await
            .map_err(|e| ConnectionError::DisconnectFailed {
                target: target.unc_path(),
                message: e.to_string(),
            })?;
        info!(resource = %target.unc_path(), "Disconnected");
        Ok(None)
    }
}

impl Connector for NetUse {
    fn connect_surely<'a>(
        &'a self,
        request: &'a ConnectRequest,
        dry_run: bool,
    ) -> BoxFuture<'a, SmbResult<Option<String>>> {
        Box::pin(self.connect_surely_impl(request, dry_run))
    }

    fn disconnect<'a>(
        &'a self,
        target: &'a DisconnectTarget,
        dry_run: bool,
    ) -> BoxFuture<'a, SmbResult<Option<String>>> {
        Box::pin(self.disconnect_impl(target, dry_run))
    }

    fn sessions(&self) -> BoxFuture<'_, SmbResult<String>> {
        Box::pin(async move {
            let output = Self::exec(self.sessions_command()).await?;
            Ok(output.stdout().to_string())
        })
    }
}

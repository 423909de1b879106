// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and exit-code validation.
//!
//! ```text
//! run()
//!   |
//!   v
//! build_command()  args, stdio, kill_on_drop
//!   |
//!   v
//! spawn() --> run_child()  (readers + optional timeout)
//!   |
//!   v
//! validate exit_code (skip if ALLOW_FAILURE)
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::error::{ProcessError, SmbResult};
use crate::logging::PASSWORD_MASK;

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line, secrets included.
    ///
    /// Arguments that are empty or contain whitespace are double-quoted.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.render_command_line(|_, arg| arg)
    }

    /// Returns the command line with secret arguments masked, for logging.
    #[must_use]
    pub fn masked_command_line(&self) -> String {
        self.render_command_line(|index, arg| {
            if self.is_secret(index) {
                PASSWORD_MASK
            } else {
                arg
            }
        })
    }

    fn render_command_line<'a>(&'a self, show: impl Fn(usize, &'a str) -> &'a str) -> String {
        let mut cmd = self.program().display().to_string();
        for (index, arg) in self.arguments().iter().enumerate() {
            let arg = show(index, arg);
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if spawning fails, the process times out, or
    /// the exit code is not a success code (unless `ALLOW_FAILURE` is set).
    pub async fn run(self) -> SmbResult<ProcessOutput> {
        let name = self.display_name();
        debug!(cmd = %self.masked_command_line(), "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: name.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child).await?;

        if !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
            && output.exit_code() != 0
        {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
                stderr: output.stderr().to_string(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command
            .args(self.arguments())
            .stdin(Stdio::null())
            .stdout(Self::stdio_from_flags(self.stdout_config().flags))
            .stderr(Self::stdio_from_flags(self.stderr_config().flags))
            .kill_on_drop(true);
        command
    }

    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.contains(StreamFlags::BIT_BUCKET) {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}

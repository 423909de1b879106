// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming and capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks --> String (when KEEP_IN_STRING)
//!   wait (or timeout --> kill --> ProcessError::Timeout)
//!   --> ProcessOutput
//!
//! read_stream()
//!   raw chunks --> EncodedBuffer --> trace! per line
//! ```

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamConfig, StreamFlags};
use crate::error::{ProcessError, SmbResult};
use crate::utility::encoding::EncodedBuffer;

fn spawn_reader<R>(
    stream: Option<R>,
    config: StreamConfig,
    process: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if config.flags.contains(StreamFlags::BIT_BUCKET) {
        return None;
    }
    let process = process.to_string();
    stream.map(|stream| {
        tokio::spawn(async move { read_stream(stream, config, &process, stream_name).await })
    })
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Drives the child to completion, collecting its output.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> SmbResult<ProcessOutput> {
        let stdout = spawn_reader(child.stdout.take(), self.stdout_config(), name, "stdout");
        let stderr = spawn_reader(child.stderr.take(), self.stderr_config(), name, "stderr");

        let status = match self.timeout_duration() {
            Some(limit) => tokio::select! {
                status = child.wait() => status?,
                () = tokio::time::sleep(limit) => {
                    warn!(process = %name, timeout = ?limit, "process timed out");
                    child.kill().await?;
                    return Err(ProcessError::Timeout {
                        command: name.to_string(),
                        timeout_secs: limit.as_secs(),
                    }
                    .into());
                }
            },
            None => child.wait().await?,
        };

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            join_reader(stdout).await,
            join_reader(stderr).await,
        ))
    }
}

/// Reads a stream to its end, decoding it with the configured encoding.
///
/// Lines are traced as they complete; the whole decoded text is returned
/// when `KEEP_IN_STRING` is set.
async fn read_stream<R>(mut reader: R, config: StreamConfig, process: &str, stream: &str) -> String
where
    R: AsyncRead + Unpin,
{
    let mut buffer = EncodedBuffer::new(config.encoding);
    let mut chunk = [0u8; 4096];
    let forward = config.flags.contains(StreamFlags::FORWARD_TO_LOG);

    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                buffer.add(&chunk[..n]);
                if forward {
                    for line in buffer.take_lines(false) {
                        trace!(process = %process, stream = %stream, line = %line, "output");
                    }
                }
            }
            Err(e) => {
                warn!(process = %process, stream = %stream, error = %e, "error reading stream");
                break;
            }
        }
    }

    if forward {
        for line in buffer.take_lines(true) {
            trace!(process = %process, stream = %stream, line = %line, "output");
        }
    }

    if config.flags.contains(StreamFlags::KEEP_IN_STRING) {
        buffer.utf8_string()
    } else {
        String::new()
    }
}

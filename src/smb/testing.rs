// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory [`Connector`] that records requests instead of running `net`.

use futures_util::future::BoxFuture;
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use super::{ConnectRequest, Connector, DisconnectTarget};
use crate::error::{ConnectionError, SmbResult};

#[derive(Default)]
pub(crate) struct RecordingConnector {
    connects: Mutex<Vec<ConnectRequest>>,
    disconnects: Mutex<Vec<DisconnectTarget>>,
    session_queries: Mutex<usize>,
    failing_comps: BTreeSet<String>,
}

impl RecordingConnector {
    /// Connections to any of `comps` fail with a `net`-style error.
    pub(crate) fn failing_on<'a>(comps: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            failing_comps: comps.into_iter().map(String::from).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn connects(&self) -> Vec<ConnectRequest> {
        self.connects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn disconnects(&self) -> Vec<DisconnectTarget> {
        self.disconnects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn session_queries(&self) -> usize {
        *self
            .session_queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Connector for RecordingConnector {
    fn connect_surely<'a>(
        &'a self,
        request: &'a ConnectRequest,
        dry_run: bool,
    ) -> BoxFuture<'a, SmbResult<Option<String>>> {
        Box::pin(async move {
            self.connects
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request.clone());

            if self.failing_comps.contains(request.comp()) {
                return Err(ConnectionError::ConnectFailed {
                    target: request.unc_path(),
                    message: "System error 53 has occurred.".to_string(),
                }
                .into());
            }
            Ok(dry_run.then(|| format!("would connect {}", request.unc_path())))
        })
    }

    fn disconnect<'a>(
        &'a self,
        target: &'a DisconnectTarget,
        dry_run: bool,
    ) -> BoxFuture<'a, SmbResult<Option<String>>> {
        Box::pin(async move {
            self.disconnects
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(target.clone());
            Ok(dry_run.then(|| format!("would disconnect {}", target.unc_path())))
        })
    }

    fn sessions(&self) -> BoxFuture<'_, SmbResult<String>> {
        Box::pin(async move {
            *self
                .session_queries
                .lock()
                .unwrap_or_else(PoisonError::into_inner) += 1;
            Ok("New connections will not be remembered.".to_string())
        })
    }
}

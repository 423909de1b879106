// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `connect` and `disconnect` arguments.

use clap::Args;

use crate::smb::{ConnectRequest, DEFAULT_SHARE, DisconnectTarget};

/// Arguments for the `connect` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectArgs {
    /// Computer name or IP address.
    #[arg(value_name = "COMP")]
    pub comp: String,

    /// Share name.
    #[arg(short = 'S', long, value_name = "NAME", default_value = DEFAULT_SHARE)]
    pub share: String,

    /// Domain of the user.
    #[arg(short = 'D', long, value_name = "NAME")]
    pub domain: Option<String>,

    /// User name.
    #[arg(short = 'U', long, value_name = "NAME")]
    pub user: Option<String>,

    /// Password.
    #[arg(short = 'P', long, value_name = "PASSWORD")]
    pub pwd: Option<String>,

    /// Fails with an error when the connection fails.
    #[arg(short = 'T', long)]
    pub throws: bool,

    /// Lists the current sessions afterwards.
    #[arg(short = 'H', long = "show-result")]
    pub show_result: bool,
}

impl ConnectArgs {
    #[must_use]
    pub fn request(&self) -> ConnectRequest {
        ConnectRequest::builder()
            .comp(self.comp.clone())
            .share(self.share.clone())
            .maybe_domain(self.domain.clone())
            .maybe_user(self.user.clone())
            .maybe_pwd(self.pwd.clone())
            .build()
    }
}

/// Arguments for the `disconnect` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DisconnectArgs {
    /// Computer name or IP address. Every session is dropped when omitted.
    #[arg(value_name = "COMP")]
    pub comp: Option<String>,

    /// Share name.
    #[arg(short = 'S', long, value_name = "NAME")]
    pub share: Option<String>,

    /// Lists the current sessions afterwards.
    #[arg(short = 'H', long = "show-result")]
    pub show_result: bool,
}

impl DisconnectArgs {
    #[must_use]
    pub fn target(&self) -> DisconnectTarget {
        DisconnectTarget::new(self.comp.clone(), self.share.clone())
    }
}

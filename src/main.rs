// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Connect | Disconnect | SchemaConnect | Tasks | Sessions | Options
//! ```

use std::process::ExitCode;

use smbcn::cli::{self, Cli, Command};
use smbcn::cmd::config::{run_configs_command, run_options_command};
use smbcn::cmd::connect::{run_connect_command, run_disconnect_command, run_sessions_command};
use smbcn::cmd::schema::{run_schema_connect_command, run_tasks_command};
use smbcn::config::Config;
use smbcn::config::loader::ConfigLoader;
use smbcn::config::types::GlobalConfig;
use smbcn::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const CONFIG_FILE: &str = "smbcn.toml";
const ENV_PREFIX: &str = "SMBCN";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Configs) => {
            build_config_loader(cli).map(|loader| run_configs_command(&loader.format_loaded_files()))
        }
        Some(Command::Connect(args)) => run_connect_command(args, config).await,
        Some(Command::Disconnect(args)) => run_disconnect_command(args, config).await,
        Some(Command::SchemaConnect(args)) => run_schema_connect_command(args, config).await,
        Some(Command::Tasks(args)) => run_tasks_command(args, config),
        Some(Command::Sessions) => run_sessions_command(config).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(cli: &Cli) -> smbcn::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(CONFIG_FILE);
    for config_path in &cli.global.configs {
        loader = loader.add_toml_file(config_path);
    }

    let mut overrides = cli.global.to_config_overrides();
    if let Some(command) = &cli.command {
        overrides.extend(command.to_config_overrides());
    }
    loader.with_env_prefix(ENV_PREFIX).apply_overrides(&overrides)
}

fn load_config(cli: &Cli) -> smbcn::error::Result<Config> {
    build_config_loader(cli)?.build()
}

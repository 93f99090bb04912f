/*
[INPUT]:  CLI arguments, optional YAML configuration file
[OUTPUT]: Interactive task dashboard, or a one-shot scripting command
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or mode selection
*/

mod cli;
mod tui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use taskpanel::logging::{self, LOG_BUFFER_CAPACITY, LogBuffer};
use taskpanel::{Controller, DashboardConfig, NotificationCenter};
use taskpanel_client::TaskClient;

#[derive(Parser, Debug)]
#[command(name = "taskpanel", version, about = "Dashboard for a remote task execution API")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    /// Overrides api.base_url from the config file
    #[arg(long = "base-url", value_name = "URL")]
    base_url: Option<String>,
    /// Overrides log.level from the config file
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<cli::Command>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    let mut config =
        DashboardConfig::load(args.config_path.as_deref()).context("load configuration")?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    if let Some(level) = args.log_level {
        config.log.level = level;
    }

    let client = TaskClient::with_base_url(config.api.client_config(), &config.api.base_url)
        .context("create task API client")?;
    let notifications = NotificationCenter::default();
    let controller = Controller::new(client, notifications.clone());

    match args.command {
        Some(command) => {
            logging::init_stderr(&config.log.level)?;
            info!(base_url = %config.api.base_url, "running command");
            let succeeded = cli::run_command(command, &controller).await?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
            let _guard = logging::init_buffered(
                &config.log.level,
                log_buffer.clone(),
                config.log.file.as_deref(),
            )?;
            info!(base_url = %config.api.base_url, "starting taskpanel dashboard");
            tui::run_dashboard(controller, notifications, log_buffer, &config.ui).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

mod cli;
pub mod commands;
pub mod core;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, VersionCommand};
use crate::commands::{LaunchOptions, LauncherContext};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::{Endpoints, HttpTransport};
use crate::core::platform::Platform;
use crate::core::state::{default_game_dir, expand_home};

/// Command-line entry point.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if cli::is_help(&e) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    // Logs go to stderr so `launch --show-cmd` output stays clean.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(execute(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> LauncherResult<()> {
    let platform = Platform::current()?;
    let game_dir = cli
        .game_dir
        .map(|dir| expand_home(&dir))
        .unwrap_or_else(default_game_dir);

    let endpoints = Endpoints::default();
    let transport = HttpTransport::new().map_err(|e| LauncherError::ManifestUnavailable {
        url: endpoints.catalog_url.clone(),
        source: e.into(),
    })?;
    let ctx = LauncherContext::new(game_dir, endpoints, platform, Box::new(transport));

    match cli.command {
        Command::Launch {
            username,
            fullscreen,
            show_cmd,
        } => {
            let options = LaunchOptions {
                username,
                fullscreen,
                show_cmd,
                verbose: cli.verbose,
            };
            commands::launch(&ctx, &options).await?;
        }
        Command::Version { action } => match action {
            VersionCommand::Switch { version, download } => {
                commands::switch_version(&ctx, &version, download).await?;
            }
            VersionCommand::Download { version } => {
                commands::download_version(&ctx, &version).await?;
            }
        },
    }

    Ok(())
}

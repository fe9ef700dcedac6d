// ─── Launch Task ───
// Runs a composed invocation and waits for the game to exit.

use std::path::Path;

use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};

use super::classpath::LaunchCommand;

/// Spawn `command` from `game_dir` and wait for it.
pub async fn run(command: &LaunchCommand, game_dir: &Path) -> LauncherResult<()> {
    info!("Launching {}", command.program);
    debug!("Command (copy/paste): {}", command);

    let status = tokio::process::Command::new(&command.program)
        .args(&command.args)
        .current_dir(game_dir)
        .status()
        .await
        .map_err(|e| LauncherError::LaunchFailed {
            code: e.to_string(),
        })?;

    if !status.success() {
        return Err(LauncherError::LaunchFailed {
            code: status.to_string(),
        });
    }

    info!("Game exited normally");
    Ok(())
}

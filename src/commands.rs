use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::{Endpoints, Transport};
use crate::core::install::{Acquirer, InstallReport};
use crate::core::launch::{self, LaunchCommand, LaunchRequest, Session};
use crate::core::libraries::PathStore;
use crate::core::platform::Platform;
use crate::core::state::{InstallationConfig, ResolvedPaths};
use crate::core::version::{LibraryArtifact, VersionManifest};

/// Everything an operation needs, resolved once per process.
pub struct LauncherContext {
    pub paths: ResolvedPaths,
    pub endpoints: Endpoints,
    pub platform: Platform,
    transport: Box<dyn Transport>,
}

impl LauncherContext {
    pub fn new(
        game_dir: impl Into<PathBuf>,
        endpoints: Endpoints,
        platform: Platform,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            paths: ResolvedPaths::build(game_dir),
            endpoints,
            platform,
            transport,
        }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn acquirer(&self) -> Acquirer<'_> {
        Acquirer::new(self.transport(), &self.endpoints, &self.paths, self.platform)
    }
}

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub username: String,
    pub fullscreen: bool,
    /// Print the command instead of running it.
    pub show_cmd: bool,
    pub verbose: bool,
}

pub async fn download_version(ctx: &LauncherContext, version: &str) -> LauncherResult<InstallReport> {
    ctx.acquirer().download_version(version).await
}

pub async fn switch_version(
    ctx: &LauncherContext,
    version: &str,
    download: bool,
) -> LauncherResult<String> {
    ctx.acquirer().switch_version(version, download).await
}

/// Compose the invocation for the current version from what is on disk.
pub async fn prepare_launch(
    ctx: &LauncherContext,
    username: &str,
    fullscreen: bool,
) -> LauncherResult<LaunchCommand> {
    let paths = &ctx.paths;

    let version = InstallationConfig::load(&paths.config_file)
        .await?
        .and_then(|config| config.version)
        .ok_or(LauncherError::NoCurrentVersion)?;

    let manifest_path = paths.version_manifest(&version);
    if !manifest_path.exists() {
        return Err(LauncherError::VersionNotInstalled { version });
    }
    let manifest = VersionManifest::load(&manifest_path).await?;

    let lib_paths = local_paths(&paths.libs_dir, ctx, &manifest.select_libraries()?);
    let native_paths = local_paths(
        &paths.natives_dir,
        ctx,
        &manifest.select_natives(ctx.platform)?,
    );

    let client_jar = paths.client_jar(&version);
    let session = Session::offline(username);

    Ok(launch::compose(&LaunchRequest {
        platform: ctx.platform,
        client_jar: &client_jar,
        main_class: &manifest.main_class,
        lib_paths: &lib_paths,
        native_paths: &native_paths,
        session: &session,
        version: &version,
        version_type: &manifest.release_type,
        game_dir: &paths.game_dir,
        assets_dir: &paths.assets_dir,
        asset_index: &manifest.assets,
        fullscreen,
    }))
}

/// Launch the current version, or only print its command with `show_cmd`.
pub async fn launch(ctx: &LauncherContext, options: &LaunchOptions) -> LauncherResult<LaunchCommand> {
    let command = prepare_launch(ctx, &options.username, options.fullscreen).await?;

    if options.show_cmd {
        println!("{}", shown_command(&command, options.verbose));
        return Ok(command);
    }

    info!("Starting game for {}", options.username);
    launch::run(&command, &ctx.paths.game_dir).await?;
    Ok(command)
}

fn shown_command(command: &LaunchCommand, verbose: bool) -> String {
    if verbose {
        format!("Command: {}", command)
    } else {
        command.to_string()
    }
}

fn local_paths(
    root: &Path,
    ctx: &LauncherContext,
    artifacts: &[&LibraryArtifact],
) -> Vec<PathBuf> {
    let store = PathStore::new(root, ctx.transport());
    artifacts.iter().map(|a| store.local_path(a)).collect()
}

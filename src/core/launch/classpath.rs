// ─── Launch Composer ───
// Builds the classpath and the full game invocation from local paths only.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::platform::Platform;

/// Player identity passed to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub access_token: String,
    pub uuid: String,
    pub user_type: String,
}

impl Session {
    /// Unauthenticated session: token and uuid are placeholders.
    pub fn offline(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            access_token: "0".into(),
            uuid: "0".into(),
            user_type: "mojang".into(),
        }
    }
}

/// Everything needed to compose an invocation. All paths must already be resolved.
#[derive(Debug, Clone)]
pub struct LaunchRequest<'a> {
    pub platform: Platform,
    pub client_jar: &'a Path,
    pub main_class: &'a str,
    pub lib_paths: &'a [PathBuf],
    pub native_paths: &'a [PathBuf],
    pub session: &'a Session,
    pub version: &'a str,
    pub version_type: &'a str,
    pub game_dir: &'a Path,
    pub assets_dir: &'a Path,
    pub asset_index: &'a str,
    pub fullscreen: bool,
}

/// A fully formed command: executable plus JVM and game arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

pub fn safe_path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Libraries then natives, joined with the platform separator.
pub fn build_classpath(platform: Platform, lib_paths: &[PathBuf], native_paths: &[PathBuf]) -> String {
    lib_paths
        .iter()
        .chain(native_paths)
        .map(|p| safe_path_str(p))
        .collect::<Vec<_>>()
        .join(platform.classpath_separator())
}

/// Compose the invocation. Never fails and performs no I/O.
pub fn compose(request: &LaunchRequest<'_>) -> LaunchCommand {
    let platform = request.platform;
    let separator = platform.classpath_separator();

    let mut classpath = build_classpath(platform, request.lib_paths, request.native_paths);
    if !classpath.is_empty() {
        classpath.push_str(separator);
    }
    classpath.push_str(&safe_path_str(request.client_jar));

    let session = request.session;
    let mut args = vec![
        "-cp".to_string(),
        classpath,
        request.main_class.to_string(),
        "--username".to_string(),
        session.username.clone(),
        "--version".to_string(),
        request.version.to_string(),
        "--gameDir".to_string(),
        safe_path_str(request.game_dir),
        "--assetsDir".to_string(),
        safe_path_str(request.assets_dir),
        "--assetIndex".to_string(),
        request.asset_index.to_string(),
        "--accessToken".to_string(),
        session.access_token.clone(),
        "--uuid".to_string(),
        session.uuid.clone(),
        "--userType".to_string(),
        session.user_type.clone(),
        "--versionType".to_string(),
        request.version_type.to_string(),
    ];

    if request.fullscreen {
        args.push("--fullscreen".to_string());
    }

    LaunchCommand {
        program: platform.java_executable().to_string(),
        args,
    }
}

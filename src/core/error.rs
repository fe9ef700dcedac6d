use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single HTTP exchange, before it is given a domain meaning.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Central error type for the launcher pipeline.
/// Every module returns `Result<T, LauncherError>`.
///
/// None of these are retried internally: each one ends the operation in progress.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── Manifests ───────────────────────────────────────
    #[error("Manifest unavailable at {url}: {source}")]
    ManifestUnavailable {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("Malformed manifest from {origin}: {reason}")]
    ManifestMalformed { origin: String, reason: String },

    #[error("Version {0} does not exist")]
    VersionNotFound(String),

    // ── Platform ────────────────────────────────────────
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Library {name} has no artifact download")]
    LibraryDescriptorMissing { name: String },

    // ── Downloads ───────────────────────────────────────
    #[error("Asset download failed for {hash}: {reason}")]
    AssetDownloadFailed { hash: String, reason: String },

    #[error("Library download failed for {path}: {reason}")]
    LibraryDownloadFailed { path: String, reason: String },

    #[error("Client download failed for version {version}: {reason}")]
    ClientDownloadFailed { version: String, reason: String },

    #[error("Failed to create directory {path:?}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Local state ─────────────────────────────────────
    #[error("Config I/O failed at {path:?}: {reason}")]
    ConfigIOFailed { path: PathBuf, reason: String },

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Launch ──────────────────────────────────────────
    #[error("No current version, switch to or download one first")]
    NoCurrentVersion,

    #[error("Version {version} is not installed locally")]
    VersionNotInstalled { version: String },

    #[error("Game exited with failure ({code})")]
    LaunchFailed { code: String },
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl LauncherError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| LauncherError::Io { path, source }
    }

    pub(crate) fn malformed(origin: &str, reason: impl ToString) -> Self {
        LauncherError::ManifestMalformed {
            origin: origin.to_string(),
            reason: reason.to_string(),
        }
    }
}

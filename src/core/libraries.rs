// ─── Path Store ───
// Libraries and natives, stored at the relative path their manifest declares.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::core::downloader::{Downloader, SyncSummary};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::Transport;
use crate::core::version::LibraryArtifact;

pub struct PathStore<'a> {
    root: PathBuf,
    downloader: Downloader<'a>,
}

impl<'a> PathStore<'a> {
    pub fn new(root: impl Into<PathBuf>, transport: &'a dyn Transport) -> Self {
        Self {
            root: root.into(),
            downloader: Downloader::new(transport),
        }
    }

    /// `<root>/<declared path>`.
    pub fn local_path(&self, artifact: &LibraryArtifact) -> PathBuf {
        self.root.join(&artifact.path)
    }

    /// Make sure `artifact` is on disk. An existing file counts as done.
    ///
    /// A directory that cannot be created aborts before any request is made.
    /// Returns `true` when a download actually happened.
    pub async fn ensure_library(&self, artifact: &LibraryArtifact) -> LauncherResult<bool> {
        if !is_contained(&artifact.path) {
            return Err(LauncherError::LibraryDownloadFailed {
                path: artifact.path.clone(),
                reason: "declared path leaves the store root".into(),
            });
        }

        let dest = self.local_path(artifact);
        if dest.exists() {
            debug!("Already downloaded: {}", artifact.url);
            return Ok(false);
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                LauncherError::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }

        debug!("Downloading: {}", artifact.url);
        self.downloader
            .download_file(&artifact.url, &dest)
            .await
            .map_err(|e| LauncherError::LibraryDownloadFailed {
                path: artifact.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(true)
    }

    /// Ensure each artifact in order; the first failure aborts the rest.
    pub async fn ensure_all_libraries(
        &self,
        artifacts: &[&LibraryArtifact],
    ) -> LauncherResult<SyncSummary> {
        let mut summary = SyncSummary::default();

        for artifact in artifacts {
            if self.ensure_library(artifact).await? {
                summary.downloaded += 1;
            } else {
                summary.present += 1;
            }
        }

        info!(
            "{:?}: {} downloaded, {} already present",
            self.root, summary.downloaded, summary.present
        );
        Ok(summary)
    }
}

/// Relative, and never climbing above its starting point.
fn is_contained(path: &str) -> bool {
    let path = Path::new(path);
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

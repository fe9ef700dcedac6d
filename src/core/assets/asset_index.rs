use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::downloader::{Downloader, SyncSummary};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::{Endpoints, Transport};
use crate::core::version::fetch_document;

/// Top-level asset index JSON structure: logical name → object.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetIndex {
    pub objects: BTreeMap<String, AssetObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetObject {
    pub hash: String,
    #[serde(default)]
    pub size: u64,
}

impl AssetIndex {
    /// Fetch and parse an asset index, keeping the raw document.
    pub async fn fetch(transport: &dyn Transport, url: &str) -> LauncherResult<(Self, String)> {
        fetch_document(transport, url).await
    }
}

/// Content-addressed asset layout under an assets root:
/// `indexes/<id>.json` and `objects/<hash[0:2]>/<hash>`.
///
/// Objects are keyed only by hash, so logical names sharing a hash share a file.
pub struct ContentStore<'a> {
    root: PathBuf,
    endpoints: &'a Endpoints,
    downloader: Downloader<'a>,
}

impl<'a> ContentStore<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        endpoints: &'a Endpoints,
        transport: &'a dyn Transport,
    ) -> Self {
        Self {
            root: root.into(),
            endpoints,
            downloader: Downloader::new(transport),
        }
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.root.join("objects")
    }

    pub fn indexes_dir(&self) -> PathBuf {
        self.root.join("indexes")
    }

    pub fn index_path(&self, index_id: &str) -> PathBuf {
        self.indexes_dir().join(format!("{}.json", index_id))
    }

    /// `objects/<hash[0:2]>/<hash>` under the root.
    pub fn object_path(&self, hash: &str) -> LauncherResult<PathBuf> {
        let prefix = hash_prefix(hash)?;
        Ok(self.objects_dir().join(prefix).join(hash))
    }

    pub fn object_url(&self, hash: &str) -> LauncherResult<String> {
        let prefix = hash_prefix(hash)?;
        Ok(self.endpoints.asset_url(prefix, hash))
    }

    /// Make sure the object for `hash` is on disk.
    ///
    /// An existing file counts as done without looking at its content.
    /// Returns `true` when a download actually happened.
    pub async fn ensure_asset(&self, hash: &str) -> LauncherResult<bool> {
        let dest = self.object_path(hash)?;
        let url = self.object_url(hash)?;

        if dest.exists() {
            debug!("Already downloaded: {}", url);
            return Ok(false);
        }

        let failed = |reason: String| LauncherError::AssetDownloadFailed {
            hash: hash.to_string(),
            reason,
        };

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| failed(format!("cannot create {:?}: {}", parent, e)))?;
        }

        debug!("Downloading: {}", url);
        self.downloader
            .download_file(&url, &dest)
            .await
            .map_err(|e| failed(e.to_string()))?;

        Ok(true)
    }

    /// Persist the index document as `indexes/<id>.json`, always overwriting.
    pub async fn write_index(&self, index_id: &str, raw_index: &str) -> LauncherResult<PathBuf> {
        let indexes_dir = self.indexes_dir();
        create_dir(&indexes_dir).await?;

        let index_path = self.index_path(index_id);
        debug!("Writing asset index to {:?}", index_path);
        tokio::fs::write(&index_path, raw_index)
            .await
            .map_err(LauncherError::io(&index_path))?;

        Ok(index_path)
    }

    /// Ensure every object of `index`, stopping at the first failure.
    pub async fn ensure_all_assets(&self, index: &AssetIndex) -> LauncherResult<SyncSummary> {
        create_dir(&self.objects_dir()).await?;

        let mut summary = SyncSummary::default();
        for object in index.objects.values() {
            if self.ensure_asset(&object.hash).await? {
                summary.downloaded += 1;
            } else {
                summary.present += 1;
            }
        }

        info!(
            "Assets: {} downloaded, {} already present",
            summary.downloaded, summary.present
        );
        Ok(summary)
    }
}

/// First two characters of `hash`. Anything usable as a single path
/// component is accepted; separators and dots are not.
fn hash_prefix(hash: &str) -> LauncherResult<&str> {
    let unsafe_char = |c: char| !c.is_ascii() || matches!(c, '/' | '\\' | '.');
    if hash.len() < 2 || hash.chars().any(unsafe_char) {
        return Err(LauncherError::malformed(
            "asset index",
            format!("invalid asset hash {:?}", hash),
        ));
    }
    Ok(&hash[..2])
}

async fn create_dir(path: &Path) -> LauncherResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| LauncherError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source,
        })
}

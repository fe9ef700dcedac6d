// ─── Version File ───
// Typed view of a per-version manifest and the platform-conditional
// selection of what it depends on.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::Transport;
use crate::core::platform::{substitute_arch, Platform};

use super::manifest::fetch_document;

/// A fully parsed version manifest.
///
/// Every field the pipeline relies on is required, so a document missing one
/// fails at decode time rather than at the point of use.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionManifest {
    pub id: String,
    pub main_class: String,
    #[serde(rename = "type")]
    pub release_type: String,
    pub asset_index: AssetIndexRef,
    /// Asset index id, used as `--assetIndex` and as the index file name.
    pub assets: String,
    pub downloads: VersionDownloads,
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetIndexRef {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionDownloads {
    pub client: DownloadArtifact,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadArtifact {
    pub url: String,
}

// ─── Library Entry ───

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub downloads: LibraryDownloads,
    /// Platform name → classifier key.
    #[serde(default)]
    pub natives: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<LibraryArtifact>,
    #[serde(default)]
    pub classifiers: BTreeMap<String, LibraryArtifact>,
}

/// A path-addressed download: `path` is relative to the libraries or natives root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibraryArtifact {
    pub path: String,
    pub url: String,
}

impl LibraryEntry {
    /// Classifier key this library declares for `platform`, if any.
    pub fn native_classifier(&self, platform: Platform) -> Option<String> {
        self.natives
            .get(platform.manifest_key())
            .map(|key| substitute_arch(key))
    }
}

impl VersionManifest {
    /// Fetch and parse a version manifest, keeping the raw document.
    pub async fn fetch(transport: &dyn Transport, url: &str) -> LauncherResult<(Self, String)> {
        fetch_document(transport, url).await
    }

    /// Read a manifest previously persisted next to the client archive.
    pub async fn load(path: &Path) -> LauncherResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(LauncherError::io(path))?;
        serde_json::from_str(&raw)
            .map_err(|e| LauncherError::malformed(&path.display().to_string(), e))
    }

    /// Write the raw manifest document, replacing any previous copy.
    pub async fn save_raw(raw_json: &str, path: &Path) -> LauncherResult<()> {
        tokio::fs::write(path, raw_json)
            .await
            .map_err(LauncherError::io(path))
    }

    pub fn is_release(&self) -> bool {
        self.release_type == "release"
    }

    pub fn select_client(&self) -> &DownloadArtifact {
        &self.downloads.client
    }

    /// Every library's main artifact, in manifest order.
    pub fn select_libraries(&self) -> LauncherResult<Vec<&LibraryArtifact>> {
        self.libraries
            .iter()
            .map(|lib| {
                lib.downloads
                    .artifact
                    .as_ref()
                    .ok_or_else(|| LauncherError::LibraryDescriptorMissing {
                        name: lib.name.clone(),
                    })
            })
            .collect()
    }

    /// Native classifiers declared for `platform`, in manifest order.
    ///
    /// Libraries without a `natives` entry for the platform are skipped.
    pub fn select_natives(&self, platform: Platform) -> LauncherResult<Vec<&LibraryArtifact>> {
        let mut natives = Vec::new();

        for lib in &self.libraries {
            let Some(classifier) = lib.native_classifier(platform) else {
                continue;
            };

            let artifact = lib.downloads.classifiers.get(&classifier).ok_or_else(|| {
                LauncherError::LibraryDescriptorMissing {
                    name: format!("{} ({})", lib.name, classifier),
                }
            })?;

            debug!("Native for {}: {}", platform, artifact.path);
            natives.push(artifact);
        }

        Ok(natives)
    }
}

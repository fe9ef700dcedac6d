// ─── Release Catalog ───
// Fetching and decoding of remote JSON documents, and the Mojang version catalog.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::Transport;

/// Pseudo version id that follows the catalog's latest release.
pub const LATEST: &str = "latest";

/// GET `url` and decode it as `T`, keeping the raw body for persistence.
///
/// Transport failures become `ManifestUnavailable`; a body that does not
/// decode (including missing required fields) becomes `ManifestMalformed`.
pub async fn fetch_document<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
) -> LauncherResult<(T, String)> {
    debug!("Fetching {}", url);

    let raw = transport
        .get_text(url)
        .await
        .map_err(|source| LauncherError::ManifestUnavailable {
            url: url.to_string(),
            source,
        })?;

    let document = serde_json::from_str(&raw).map_err(|e| LauncherError::malformed(url, e))?;
    Ok((document, raw))
}

/// Top-level release catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseCatalog {
    pub latest: Latest,
    pub versions: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Latest {
    pub release: String,
    pub snapshot: String,
}

/// A single entry in the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub version_type: Option<String>,
}

impl ReleaseCatalog {
    pub async fn fetch(transport: &dyn Transport, url: &str) -> LauncherResult<Self> {
        info!("Fetching release catalog...");
        let (catalog, _) = fetch_document::<Self>(transport, url).await?;
        info!("Catalog lists {} versions", catalog.versions.len());
        Ok(catalog)
    }

    /// Find a specific version entry by ID (e.g. "1.20.4").
    pub fn find_version(&self, id: &str) -> Option<&CatalogEntry> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Resolve a requested id, mapping `latest` to the current release.
    pub fn resolve(&self, requested: &str) -> LauncherResult<&CatalogEntry> {
        let id = if requested == LATEST {
            self.latest.release.as_str()
        } else {
            requested
        };

        self.find_version(id)
            .ok_or_else(|| LauncherError::VersionNotFound(id.to_string()))
    }
}

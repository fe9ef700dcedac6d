// ─── Acquirer ───
// Realizes a full version installation on disk: assets, client archive,
// libraries, natives, the persisted version manifest and the launcher config.

use std::fmt;

use tracing::{debug, info, warn};

use crate::core::assets::{AssetIndex, ContentStore};
use crate::core::downloader::{Downloader, SyncSummary};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::{Endpoints, Transport};
use crate::core::libraries::PathStore;
use crate::core::platform::Platform;
use crate::core::state::{InstallationConfig, ResolvedPaths};
use crate::core::version::{ReleaseCatalog, VersionManifest};

/// Steps of a version download, run strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveCatalog,
    ResolveVersion,
    FetchVersionManifest,
    FetchAssetIndex,
    SyncAssets,
    SyncClientArtifact,
    SyncLibraries,
    SyncNatives,
    PersistInstallationConfig,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolveCatalog => "resolve catalog",
            Stage::ResolveVersion => "resolve version",
            Stage::FetchVersionManifest => "fetch version manifest",
            Stage::FetchAssetIndex => "fetch asset index",
            Stage::SyncAssets => "sync assets",
            Stage::SyncClientArtifact => "sync client",
            Stage::SyncLibraries => "sync libraries",
            Stage::SyncNatives => "sync natives",
            Stage::PersistInstallationConfig => "persist config",
        };
        f.write_str(name)
    }
}

/// What a completed download did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Concrete version id (never `latest`).
    pub version: String,
    pub assets: SyncSummary,
    pub client_downloaded: bool,
    pub libraries: SyncSummary,
    pub natives: SyncSummary,
    pub config_created: bool,
}

pub struct Acquirer<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a Endpoints,
    paths: &'a ResolvedPaths,
    platform: Platform,
}

impl<'a> Acquirer<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        endpoints: &'a Endpoints,
        paths: &'a ResolvedPaths,
        platform: Platform,
    ) -> Self {
        Self {
            transport,
            endpoints,
            paths,
            platform,
        }
    }

    /// Download everything `requested` needs. Any failing stage ends the
    /// operation; files already written stay on disk for the next run.
    pub async fn download_version(&self, requested: &str) -> LauncherResult<InstallReport> {
        enter(Stage::ResolveCatalog);
        let catalog = ReleaseCatalog::fetch(self.transport, &self.endpoints.catalog_url).await?;

        enter(Stage::ResolveVersion);
        let entry = catalog.resolve(requested)?;
        let version = entry.id.clone();
        info!("Installing version {}", version);

        enter(Stage::FetchVersionManifest);
        let (manifest, raw_manifest) = VersionManifest::fetch(self.transport, &entry.url).await?;

        enter(Stage::FetchAssetIndex);
        let (asset_index, raw_index) =
            AssetIndex::fetch(self.transport, &manifest.asset_index.url).await?;

        enter(Stage::SyncAssets);
        let assets = ContentStore::new(&self.paths.assets_dir, self.endpoints, self.transport);
        assets.write_index(&manifest.assets, &raw_index).await?;
        let assets_summary = assets.ensure_all_assets(&asset_index).await?;

        enter(Stage::SyncClientArtifact);
        let client_downloaded = self.sync_client(&version, &manifest, &raw_manifest).await?;

        enter(Stage::SyncLibraries);
        let libraries = PathStore::new(&self.paths.libs_dir, self.transport)
            .ensure_all_libraries(&manifest.select_libraries()?)
            .await?;

        enter(Stage::SyncNatives);
        let natives = PathStore::new(&self.paths.natives_dir, self.transport)
            .ensure_all_libraries(&manifest.select_natives(self.platform)?)
            .await?;

        enter(Stage::PersistInstallationConfig);
        let config_created = match InstallationConfig::load(&self.paths.config_file).await? {
            Some(_) => false,
            None => {
                info!("No mc_launcher.json config found, one has been generated.");
                InstallationConfig::with_version(&version)
                    .save(&self.paths.config_file)
                    .await?;
                true
            }
        };

        info!("Version {} installed", version);
        Ok(InstallReport {
            version,
            assets: assets_summary,
            client_downloaded,
            libraries,
            natives,
            config_created,
        })
    }

    /// Make `version` the one `launch` uses, downloading it first when asked
    /// and its manifest is not on disk.
    pub async fn switch_version(&self, version: &str, download: bool) -> LauncherResult<String> {
        let mut target = version.to_string();

        if !self.paths.version_manifest(version).exists() {
            warn!("{} manifest not found locally.", version);
            if download {
                info!("Downloading {} files from servers.", version);
                target = self.download_version(version).await?.version;
            }
        }

        let mut config = InstallationConfig::load(&self.paths.config_file)
            .await?
            .unwrap_or_else(|| {
                info!("No mc_launcher.json config found, one has been generated.");
                InstallationConfig::default()
            });

        config.version = Some(target.clone());
        config.save(&self.paths.config_file).await?;

        info!("Current version is now {}", target);
        Ok(target)
    }

    /// Download the client archive if absent, then always rewrite the manifest next to it.
    async fn sync_client(
        &self,
        version: &str,
        manifest: &VersionManifest,
        raw_manifest: &str,
    ) -> LauncherResult<bool> {
        let version_dir = self.paths.version_dir(version);
        tokio::fs::create_dir_all(&version_dir)
            .await
            .map_err(|source| LauncherError::DirectoryCreationFailed {
                path: version_dir.clone(),
                source,
            })?;

        let client_jar = self.paths.client_jar(version);
        let downloaded = if client_jar.exists() {
            debug!("Client executable already downloaded.");
            false
        } else {
            let url = &manifest.select_client().url;
            debug!("Downloading: {}", url);
            Downloader::new(self.transport)
                .download_file(url, &client_jar)
                .await
                .map_err(|e| LauncherError::ClientDownloadFailed {
                    version: version.to_string(),
                    reason: e.to_string(),
                })?;
            true
        };

        VersionManifest::save_raw(raw_manifest, &self.paths.version_manifest(version)).await?;
        Ok(downloaded)
    }
}

fn enter(stage: Stage) {
    info!(%stage, "Stage");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::fake::FakeTransport;

    const CATALOG: &str = "http://meta/catalog.json";
    const HASH: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9011223344";

    fn endpoints() -> Endpoints {
        Endpoints {
            catalog_url: CATALOG.into(),
            resources_url: "http://res".into(),
        }
    }

    fn asset_url() -> String {
        format!("http://res/a1/{}", HASH)
    }

    /// A catalog with one release `1.2` and everything it points at.
    fn serve_release(transport: &FakeTransport) {
        transport.serve_json(
            CATALOG,
            &serde_json::json!({
                "latest": {"release": "1.2", "snapshot": "1.2"},
                "versions": [{"id": "1.2", "type": "release", "url": "http://meta/1.2.json"}]
            }),
        );
        transport.serve_json(
            "http://meta/1.2.json",
            &serde_json::json!({
                "id": "1.2",
                "mainClass": "net.minecraft.client.main.Main",
                "type": "release",
                "assetIndex": {"id": "1.2", "url": "http://meta/assets-1.2.json"},
                "assets": "1.2",
                "downloads": {"client": {"url": "http://meta/client-1.2.jar"}},
                "libraries": [
                    {
                        "name": "org.lwjgl:lwjgl:2.9",
                        "downloads": {
                            "artifact": {"path": "org/lwjgl/lwjgl.jar", "url": "http://lib/lwjgl.jar"},
                            "classifiers": {
                                "natives-linux": {"path": "org/lwjgl/natives-linux.jar", "url": "http://lib/nl.jar"},
                                "natives-osx": {"path": "org/lwjgl/natives-osx.jar", "url": "http://lib/no.jar"},
                                "natives-windows": {"path": "org/lwjgl/natives-windows.jar", "url": "http://lib/nw.jar"}
                            }
                        },
                        "natives": {"linux": "natives-linux", "osx": "natives-osx", "windows": "natives-windows"}
                    }
                ]
            }),
        );
        transport.serve_json(
            "http://meta/assets-1.2.json",
            &serde_json::json!({
                "objects": {
                    "sounds/a.ogg": {"hash": HASH, "size": 5},
                    "sounds/b.ogg": {"hash": HASH, "size": 5}
                }
            }),
        );
        transport.serve(&asset_url(), b"sound".to_vec());
        transport.serve("http://meta/client-1.2.jar", b"client".to_vec());
        transport.serve("http://lib/lwjgl.jar", b"lwjgl".to_vec());
        transport.serve("http://lib/nl.jar", b"nl".to_vec());
    }

    #[tokio::test]
    async fn full_install_lays_out_game_dir() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());

        let report = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .download_version("1.2")
            .await
            .unwrap();

        assert_eq!(report.version, "1.2");
        assert!(report.client_downloaded);
        assert!(report.config_created);
        assert_eq!(report.assets.downloaded, 1);
        assert_eq!(report.libraries.downloaded, 1);
        assert_eq!(report.natives.downloaded, 1);

        assert!(paths.assets_dir.join("indexes/1.2.json").is_file());
        assert!(paths.assets_dir.join("objects/a1").join(HASH).is_file());
        assert_eq!(std::fs::read(paths.client_jar("1.2")).unwrap(), b"client");
        assert!(paths.version_manifest("1.2").is_file());
        assert!(paths.libs_dir.join("org/lwjgl/lwjgl.jar").is_file());
        assert!(paths.natives_dir.join("org/lwjgl/natives-linux.jar").is_file());
        assert!(!paths.natives_dir.join("org/lwjgl/natives-osx.jar").exists());

        let config = InstallationConfig::load(&paths.config_file).await.unwrap().unwrap();
        assert_eq!(config.version.as_deref(), Some("1.2"));
    }

    #[tokio::test]
    async fn rerun_fetches_no_binaries_again() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());
        let acquirer = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux);

        acquirer.download_version("1.2").await.unwrap();
        let report = acquirer.download_version("latest").await.unwrap();

        assert_eq!(report.version, "1.2");
        assert!(!report.client_downloaded);
        assert_eq!(report.assets.downloaded, 0);
        assert_eq!(report.libraries.downloaded, 0);
        for url in [
            asset_url().as_str(),
            "http://meta/client-1.2.jar",
            "http://lib/lwjgl.jar",
            "http://lib/nl.jar",
        ] {
            assert_eq!(transport.request_count(url), 1, "{url}");
        }
    }

    #[tokio::test]
    async fn download_leaves_existing_config_alone() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());
        InstallationConfig::with_version("1.0")
            .save(&paths.config_file)
            .await
            .unwrap();

        let report = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .download_version("1.2")
            .await
            .unwrap();

        assert!(!report.config_created);
        let config = InstallationConfig::load(&paths.config_file).await.unwrap().unwrap();
        assert_eq!(config.version.as_deref(), Some("1.0"));
    }

    #[tokio::test]
    async fn unknown_version_stops_before_any_download() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());

        let err = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .download_version("9.9")
            .await
            .unwrap_err();

        assert!(matches!(err, LauncherError::VersionNotFound(ref v) if v == "9.9"));
        assert_eq!(transport.requests(), vec![CATALOG.to_string()]);
    }

    #[tokio::test]
    async fn library_failure_keeps_earlier_stages_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        transport.fail("http://lib/lwjgl.jar");
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());

        let err = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .download_version("1.2")
            .await
            .unwrap_err();

        assert!(matches!(err, LauncherError::LibraryDownloadFailed { .. }));
        assert!(paths.assets_dir.join("objects/a1").join(HASH).is_file());
        assert!(paths.client_jar("1.2").is_file());
        assert!(!paths.config_file.exists());
        assert_eq!(transport.request_count("http://lib/nl.jar"), 0);
    }

    #[tokio::test]
    async fn client_failure_stops_before_libraries() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        transport.fail("http://meta/client-1.2.jar");
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());

        let err = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .download_version("1.2")
            .await
            .unwrap_err();

        assert!(matches!(err, LauncherError::ClientDownloadFailed { ref version, .. } if version == "1.2"));
        assert!(paths.assets_dir.join("objects/a1").join(HASH).is_file());
        assert!(!paths.client_jar("1.2").exists());
        assert!(!paths.version_manifest("1.2").exists());
        assert_eq!(transport.request_count("http://lib/lwjgl.jar"), 0);
        assert_eq!(transport.request_count("http://lib/nl.jar"), 0);
        assert!(!paths.config_file.exists());
    }

    #[tokio::test]
    async fn version_manifest_failure_is_manifest_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        transport.fail("http://meta/1.2.json");
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());

        let err = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .download_version("1.2")
            .await
            .unwrap_err();

        assert!(matches!(err, LauncherError::ManifestUnavailable { ref url, .. } if url == "http://meta/1.2.json"));
        assert_eq!(
            transport.requests(),
            vec![CATALOG.to_string(), "http://meta/1.2.json".to_string()]
        );
        assert!(!paths.assets_dir.exists());
    }

    #[tokio::test]
    async fn asset_index_failure_halts_before_assets() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        transport.fail("http://meta/assets-1.2.json");
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());

        let err = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .download_version("1.2")
            .await
            .unwrap_err();

        assert!(matches!(err, LauncherError::ManifestUnavailable { ref url, .. } if url == "http://meta/assets-1.2.json"));
        assert_eq!(transport.request_count(&asset_url()), 0);
        assert_eq!(transport.request_count("http://meta/client-1.2.jar"), 0);
        assert!(!paths.assets_dir.join("indexes/1.2.json").exists());
    }

    #[tokio::test]
    async fn switch_with_download_records_resolved_id() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        serve_release(&transport);
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());
        InstallationConfig::with_version("1.0")
            .save(&paths.config_file)
            .await
            .unwrap();

        let switched = Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .switch_version("latest", true)
            .await
            .unwrap();

        assert_eq!(switched, "1.2");
        let config = InstallationConfig::load(&paths.config_file).await.unwrap().unwrap();
        assert_eq!(config.version.as_deref(), Some("1.2"));
    }

    #[tokio::test]
    async fn switch_without_download_only_touches_config() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::new();
        let endpoints = endpoints();
        let paths = ResolvedPaths::build(dir.path());

        Acquirer::new(&transport, &endpoints, &paths, Platform::Linux)
            .switch_version("1.8", false)
            .await
            .unwrap();

        assert!(transport.requests().is_empty());
        let config = InstallationConfig::load(&paths.config_file).await.unwrap().unwrap();
        assert_eq!(config.version.as_deref(), Some("1.8"));
    }
}

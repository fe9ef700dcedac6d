use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{LauncherError, LauncherResult};

const CONFIG_COMMENT: &str = "Minecraft Launcher CLI config";

/// Per-game-directory launcher state, persisted as `mc_launcher.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationConfig {
    #[serde(rename = "__comment", default = "default_comment")]
    pub comment: String,
    /// Version used by `launch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Keys this launcher does not know, kept across rewrites.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_comment() -> String {
    CONFIG_COMMENT.to_string()
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            comment: default_comment(),
            version: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl InstallationConfig {
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::default()
        }
    }

    /// `Ok(None)` when no config exists yet.
    pub async fn load(path: &Path) -> LauncherResult<Option<Self>> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(config_failed(path, e)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| config_failed(path, e))
    }

    pub async fn save(&self, path: &Path) -> LauncherResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| config_failed(path, e))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| config_failed(path, e))?;
        }

        tokio::fs::write(path, json)
            .await
            .map_err(|e| config_failed(path, e))
    }
}

fn config_failed(path: &Path, reason: impl ToString) -> LauncherError {
    LauncherError::ConfigIOFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mc_launcher.json");

        let config = InstallationConfig::with_version("1.2");
        config.save(&path).await.unwrap();

        let loaded = InstallationConfig::load(&path).await.unwrap().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.version.as_deref(), Some("1.2"));
    }

    #[tokio::test]
    async fn absent_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = InstallationConfig::load(&dir.path().join("mc_launcher.json"))
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn garbage_is_config_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mc_launcher.json");
        std::fs::write(&path, "not json").unwrap();

        let err = InstallationConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, LauncherError::ConfigIOFailed { .. }));
    }

    #[test]
    fn unknown_keys_survive() {
        let config: InstallationConfig =
            serde_json::from_str(r#"{"__comment":"c","version":"1.8","theme":"dark"}"#).unwrap();
        assert_eq!(config.extra["theme"], "dark");

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["version"], "1.8");
    }
}

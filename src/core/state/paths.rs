use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "mc_launcher.json";

/// On-disk layout of a game directory. Pure derivation, no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub game_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub libs_dir: PathBuf,
    pub natives_dir: PathBuf,
    pub versions_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ResolvedPaths {
    pub fn build(game_dir: impl Into<PathBuf>) -> Self {
        let game_dir = game_dir.into();

        Self {
            assets_dir: game_dir.join("assets"),
            libs_dir: game_dir.join("libraries"),
            natives_dir: game_dir.join("natives"),
            versions_dir: game_dir.join("versions"),
            config_file: game_dir.join(CONFIG_FILE),
            game_dir,
        }
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.versions_dir.join(version)
    }

    /// `versions/<v>/<v>.jar`
    pub fn client_jar(&self, version: &str) -> PathBuf {
        self.version_dir(version).join(format!("{}.jar", version))
    }

    /// `versions/<v>/<v>.json`
    pub fn version_manifest(&self, version: &str) -> PathBuf {
        self.version_dir(version).join(format!("{}.json", version))
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// `~/.minecraft`, falling back to the working directory.
pub fn default_game_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".minecraft")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_hangs_off_game_dir() {
        let paths = ResolvedPaths::build("/g");
        assert_eq!(paths.assets_dir, PathBuf::from("/g/assets"));
        assert_eq!(paths.libs_dir, PathBuf::from("/g/libraries"));
        assert_eq!(paths.natives_dir, PathBuf::from("/g/natives"));
        assert_eq!(paths.config_file, PathBuf::from("/g/mc_launcher.json"));
        assert_eq!(paths.client_jar("1.2"), PathBuf::from("/g/versions/1.2/1.2.jar"));
        assert_eq!(
            paths.version_manifest("1.2"),
            PathBuf::from("/g/versions/1.2/1.2.json")
        );
    }

    #[test]
    fn tilde_is_expanded_only_at_the_start() {
        assert_eq!(expand_home(Path::new("/a/~/b")), PathBuf::from("/a/~/b"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/.minecraft")), home.join(".minecraft"));
        }
    }
}

// ─── Platform ───
// The three operating systems the release manifests know about.

use std::fmt;
use std::str::FromStr;

use crate::core::error::{LauncherError, LauncherResult};

/// Target platform, resolved once at startup and passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Osx,
    Windows,
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> LauncherResult<Self> {
        if cfg!(target_os = "windows") {
            Ok(Platform::Windows)
        } else if cfg!(target_os = "macos") {
            Ok(Platform::Osx)
        } else if cfg!(target_os = "linux") {
            Ok(Platform::Linux)
        } else {
            Err(LauncherError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            ))
        }
    }

    /// Key used by version manifests in a library's `natives` map.
    pub fn manifest_key(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Osx => "osx",
            Platform::Windows => "windows",
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    /// `;` on Windows, `:` on Linux/macOS.
    pub fn classpath_separator(self) -> &'static str {
        if self.is_windows() { ";" } else { ":" }
    }

    pub fn java_executable(self) -> &'static str {
        if self.is_windows() { "javaw" } else { "java" }
    }
}

impl FromStr for Platform {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Platform::Linux),
            "osx" => Ok(Platform::Osx),
            "windows" => Ok(Platform::Windows),
            other => Err(LauncherError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_key())
    }
}

/// Fill the `${arch}` placeholder some older native classifiers carry.
pub fn substitute_arch(classifier: &str) -> String {
    let arch = if cfg!(target_pointer_width = "64") {
        "64"
    } else {
        "32"
    };
    classifier.replace("${arch}", arch)
}

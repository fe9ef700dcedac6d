// ─── Launcher Core ───
// Version resolution and content-addressed acquisition pipeline.
//
// Architecture:
//   core/
//     http        : transport seam + endpoints
//     platform    : linux / osx / windows
//     version/    : release catalog + typed version manifest + dependency selection
//     downloader/ : sequential streaming downloads
//     assets/     : asset index + content-addressed object store
//     libraries   : path-addressed store for libraries and natives
//     install     : staged version download (the acquirer)
//     launch/     : invocation composer + process runner
//     state/      : game directory layout + mc_launcher.json

pub mod assets;
pub mod downloader;
pub mod error;
pub mod http;
pub mod install;
pub mod launch;
pub mod libraries;
pub mod platform;
pub mod state;
pub mod version;

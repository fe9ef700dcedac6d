pub mod config;
pub mod paths;

pub use config::InstallationConfig;
pub use paths::{default_game_dir, expand_home, ResolvedPaths};

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mc-launcher")]
#[command(about = "Minecraft version downloader and launcher")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Game directory, defaults to ~/.minecraft
    #[arg(short = 'd', long = "game-dir", value_name = "PATH", global = true)]
    pub game_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the game
    Launch {
        /// Player name
        username: String,

        /// Launch the game in fullscreen mode
        #[arg(long)]
        fullscreen: bool,

        /// Only print the launch command
        #[arg(long)]
        show_cmd: bool,
    },

    /// Game version utilities
    #[command(arg_required_else_help = true)]
    Version {
        #[command(subcommand)]
        action: VersionCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum VersionCommand {
    /// Switch the version used by launch
    Switch {
        version: String,

        /// Download the version first if it is not installed
        #[arg(long)]
        download: bool,
    },

    /// Download a game version ("latest" for the newest release)
    Download { version: String },
}

/// Help requested explicitly or shown for missing arguments; not a failure.
pub fn is_help(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// What the binary was asked to do. At most one mode flag is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Select folders on first run, then play.
    Play,
    Configure,
    Preview,
    Screensaver,
    Install,
}

#[derive(Debug, Parser)]
#[command(
    name = "slideshow",
    version,
    about = "Fullscreen image slideshow and screensaver"
)]
pub struct Cli {
    /// Edit the saved folder list and exit
    #[arg(short, long, group = "mode")]
    pub configure: bool,

    /// Screensaver preview request; does nothing
    #[arg(short, long, group = "mode")]
    pub preview: bool,

    /// Play the saved folders, exiting on any input
    #[arg(short, long, group = "mode")]
    pub screensaver: bool,

    /// Print screensaver installation instructions
    #[arg(long, group = "mode")]
    pub install: bool,

    /// YAML file with timing, scanning and label settings
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Folder list location (defaults to the per-platform file)
    #[arg(long, value_name = "FILE")]
    pub folders_file: Option<PathBuf>,

    /// Deterministic shuffle seed
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.configure {
            Mode::Configure
        } else if self.preview {
            Mode::Preview
        } else if self.screensaver {
            Mode::Screensaver
        } else if self.install {
            Mode::Install
        } else {
            Mode::Play
        }
    }
}

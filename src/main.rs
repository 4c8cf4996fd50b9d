//! Binary entrypoint for the slideshow.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_slideshow::buffer::PlaybackSequence;
use rust_slideshow::cli::{Cli, Mode};
use rust_slideshow::config::Settings;
use rust_slideshow::dialogs::{Dialogs, NativeDialogs};
use rust_slideshow::error::Error;
use rust_slideshow::folders::FolderStore;
use rust_slideshow::logging;
use rust_slideshow::platform::{self, Platform};
use rust_slideshow::render::window::{SlideshowRequest, ViewMode, run_windowed};
use rust_slideshow::scan::discover;
use rust_slideshow::setup::{edit_folder_list, select_folders_interactively};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let platform = platform::current();
    let settings = load_settings(&cli)?;
    let store = match cli.folders_file.clone() {
        Some(path) => FolderStore::new(path),
        None => FolderStore::new(
            platform
                .folders_file()
                .context("cannot determine where to keep the folder list")?,
        ),
    };
    let dialogs = NativeDialogs;

    match cli.mode() {
        Mode::Preview => {
            info!("preview requested; nothing to show");
            Ok(())
        }
        Mode::Install => {
            print!("{}", platform.install_instructions());
            Ok(())
        }
        Mode::Configure => configure(&store, &dialogs, platform),
        Mode::Screensaver => {
            let folders = store.load()?;
            if folders.is_empty() {
                info!("no saved folders; opening the folder editor");
                return configure(&store, &dialogs, platform);
            }
            play(folders, settings, ViewMode::Screensaver, cli.seed, platform, &dialogs)
        }
        Mode::Play => {
            let mut folders = store.load()?;
            if folders.is_empty() {
                folders =
                    select_folders_interactively(&dialogs, platform.pictures_dir().as_deref());
                if folders.is_empty() {
                    println!("No folders selected.");
                    return Ok(());
                }
                store.save(&folders)?;
            }
            play(folders, settings, ViewMode::Interactive, cli.seed, platform, &dialogs)
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let Some(path) = cli.settings.as_ref() else {
        return Ok(Settings::default());
    };
    let settings = Settings::from_yaml_file(path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?
        .validated()
        .context("invalid settings values")?;
    info!("Loaded settings from {}:\n{:#?}", path.display(), settings);
    Ok(settings)
}

fn configure(store: &FolderStore, dialogs: &dyn Dialogs, platform: &dyn Platform) -> Result<()> {
    let current = store.load()?;
    let pictures = platform.pictures_dir();
    match edit_folder_list(dialogs, &current, pictures.as_deref()) {
        Some(folders) if folders != current => store.save(&folders),
        Some(_) => {
            info!("folder list unchanged");
            Ok(())
        }
        None => {
            info!("folder changes discarded");
            Ok(())
        }
    }
}

fn play(
    folders: Vec<PathBuf>,
    settings: Settings,
    mode: ViewMode,
    seed: Option<u64>,
    platform: &'static dyn Platform,
    dialogs: &dyn Dialogs,
) -> Result<()> {
    let options = settings.scan_options(platform.default_extensions());
    let files = match discover(&folders, &options) {
        Ok(files) => files,
        Err(Error::EmptyScan) => {
            warn!(folders = folders.len(), "no images found");
            dialogs.alert(
                "No Images Found",
                "No images found in the selected folders.",
            );
            return Ok(());
        }
        Err(err) => return Err(err).context("failed to scan image folders"),
    };
    info!(count = files.len(), "discovered images");

    let sequence = PlaybackSequence::shuffled(files, seed.or(settings.shuffle_seed))
        .context("failed to build the playback sequence")?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let request = SlideshowRequest {
        sequence,
        roots: folders,
        settings,
        mode,
    };
    run_windowed(request, platform, cancel)
}

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::scan::ScanOptions;

/// Tunable slideshow behavior, read from an optional YAML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Time an image stays on screen during unattended playback.
    #[serde(with = "humantime_serde")]
    pub auto_advance: Duration,
    /// Longer pause used after navigation, deletion, or an error skip.
    #[serde(with = "humantime_serde")]
    pub resume_delay: Duration,
    /// Delay before skipping past a file that failed to decode.
    #[serde(with = "humantime_serde")]
    pub error_skip_delay: Duration,
    /// Allowed extensions; `None` uses the platform default set.
    pub extensions: Option<Vec<String>>,
    /// Follow symbolic links while scanning.
    pub follow_links: bool,
    /// Ignore dot-directories below each folder.
    pub skip_hidden_dirs: bool,
    /// Optional deterministic seed for the startup shuffle.
    pub shuffle_seed: Option<u64>,
    /// Appearance of the file label.
    pub label: LabelOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LabelOptions {
    pub visible: bool,
    /// Font size in logical pixels.
    pub font_size: f32,
    /// Distance from the bottom-left corner in logical pixels.
    pub margin: f32,
    pub color: [u8; 3],
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            visible: true,
            font_size: 16.0,
            margin: 10.0,
            color: [255, 255, 255],
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_advance: Duration::from_millis(1500),
            resume_delay: Duration::from_millis(2500),
            error_skip_delay: Duration::from_millis(100),
            extensions: None,
            follow_links: false,
            skip_hidden_dirs: false,
            shuffle_seed: None,
            label: LabelOptions::default(),
        }
    }
}

impl Settings {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_yaml_str(&s)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        // An empty document means "all defaults".
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.auto_advance.is_zero(),
            "auto-advance must be greater than zero"
        );
        ensure!(
            !self.resume_delay.is_zero(),
            "resume-delay must be greater than zero"
        );
        ensure!(
            !self.error_skip_delay.is_zero(),
            "error-skip-delay must be greater than zero"
        );
        if let Some(exts) = &self.extensions {
            ensure!(!exts.is_empty(), "extensions must not be empty");
            ensure!(
                exts.iter().all(|e| !e.trim_start_matches('.').is_empty()),
                "extensions must not contain blank entries"
            );
        }
        ensure!(
            self.label.font_size > 0.0,
            "label.font-size must be positive"
        );
        ensure!(self.label.margin >= 0.0, "label.margin must not be negative");
        Ok(self)
    }

    /// Scan options for this configuration, using `default_exts` unless
    /// extensions are overridden.
    pub fn scan_options(&self, default_exts: &[&str]) -> ScanOptions {
        let exts = match &self.extensions {
            Some(exts) => exts
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            None => default_exts.iter().map(|e| (*e).to_string()).collect(),
        };
        ScanOptions {
            exts,
            follow_links: self.follow_links,
            skip_hidden_dirs: self.skip_hidden_dirs,
        }
    }
}

/// Delays used by the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub auto_advance: Duration,
    pub resume_delay: Duration,
    pub error_skip: Duration,
}

impl From<&Settings> for Pacing {
    fn from(settings: &Settings) -> Self {
        Self {
            auto_advance: settings.auto_advance,
            resume_delay: settings.resume_delay,
            error_skip: settings.error_skip_delay,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

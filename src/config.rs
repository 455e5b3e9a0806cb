//! Configuration system for klokr with validation and default generation.
//!
//! Configuration lives in `klokr.toml` under the XDG config directory
//! (`~/.config/klokr/klokr.toml`). When no file exists a commented default
//! is generated on first run. All fields are optional in the file; missing
//! values fall back to the constants in [`crate::constants`].
//!
//! ## Configuration Structure
//!
//! ```toml
//! # Geographic coordinates driving the day/night theme
//! latitude = 52.3676
//! longitude = 4.9041
//!
//! # Presentation
//! face_size = 300            # 200, 300 or 400 pixel faces
//! theme = "auto"             # "auto", "day" or "night"
//! show_flags = true          # column iconography
//! creature_mode = false      # hourly sea creature instead of the seal
//!
//! # Moon/tide feed
//! feed_url = "https://waterberichtgeving.rws.nl/dynamisch/hmc-api/maanfase.json"
//! feed_poll_minute = 2       # fetch at this minute of every hour
//! ```
//!
//! ## Validation and Error Handling
//!
//! Loading validates every field: coordinate ranges, the face-size preset
//! list, the theme mode vocabulary, and the poll minute. Invalid
//! configurations produce error messages naming the offending value and
//! its accepted range.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::constants::*;
use crate::geometry::FaceSize;
use crate::logger::Log;
use crate::solar::ThemeMode;

/// Configuration structure for klokr application settings.
///
/// All fields are optional; accessors apply the documented defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Geographic latitude in degrees (-90 to +90)
    pub latitude: Option<f64>,
    /// Geographic longitude in degrees (-180 to +180)
    pub longitude: Option<f64>,
    /// Face side length in pixels; must be one of the shipped presets
    pub face_size: Option<u32>,
    /// Theme selection: "auto", "day" or "night"
    pub theme: Option<String>,
    /// Whether to show flags next to the clock titles
    pub show_flags: Option<bool>,
    /// Replace the seal with the rotating hourly sea creature
    pub creature_mode: Option<bool>,
    /// Moon/tide feed endpoint
    pub feed_url: Option<String>,
    /// Minute of the hour for the regular feed fetch (0-59)
    pub feed_poll_minute: Option<u32>,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("klokr").join("klokr.toml"))
    }

    /// Write a fully commented default configuration file.
    ///
    /// The file is written atomically via a temp file in the target
    /// directory so a crash never leaves a half-written config behind.
    pub fn create_default_config(path: &PathBuf) -> Result<()> {
        let parent = path
            .parent()
            .context("Could not determine config directory from config path")?;
        fs::create_dir_all(parent).context("Failed to create config directory")?;

        let content = ConfigBuilder::new()
            .add_section("Klokr configuration")
            .add_setting(
                "latitude",
                &format!("{}", DEFAULT_LATITUDE),
                "Geographic latitude for the day/night theme",
            )
            .add_setting(
                "longitude",
                &format!("{}", DEFAULT_LONGITUDE),
                "Geographic longitude for the day/night theme",
            )
            .add_setting(
                "face_size",
                &DEFAULT_FACE_SIZE.to_string(),
                "Clock face size in pixels (200, 300 or 400)",
            )
            .add_setting(
                "theme",
                &format!("\"{}\"", DEFAULT_THEME_MODE),
                "Theme: \"auto\" (follow the sun), \"day\" or \"night\"",
            )
            .add_setting(
                "show_flags",
                &DEFAULT_SHOW_FLAGS.to_string(),
                "Show flags next to the clock titles",
            )
            .add_setting(
                "creature_mode",
                &DEFAULT_CREATURE_MODE.to_string(),
                "Rotate an hourly sea creature instead of the seal",
            )
            .add_setting(
                "feed_url",
                &format!("\"{}\"", DEFAULT_FEED_URL),
                "Moon/tide feed endpoint",
            )
            .add_setting(
                "feed_poll_minute",
                &DEFAULT_FEED_POLL_MINUTE.to_string(),
                &format!(
                    "Minute of the hour for the feed fetch (0-{})",
                    MAXIMUM_FEED_POLL_MINUTE
                ),
            )
            .build();

        let mut temp = tempfile::NamedTempFile::new_in(parent)
            .context("Failed to create temporary config file")?;
        temp.write_all(content.as_bytes())
            .context("Failed to write default config")?;
        temp.persist(path)
            .context("Failed to move default config into place")?;

        Log::log_indented(&format!("Created default config at {}", path.display()));
        Ok(())
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        validate_config(&config)?;

        Ok(config)
    }

    /// Load the configuration, generating a default file on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)
                .context("Failed to create default config during load")?;
        }

        Self::load_from_path(&config_path).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    // ═══ Accessors with defaults applied ═══

    pub fn latitude(&self) -> f64 {
        self.latitude.unwrap_or(DEFAULT_LATITUDE)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.unwrap_or(DEFAULT_LONGITUDE)
    }

    /// The validated face preset. Falls back to the default preset for a
    /// config that skipped validation (test construction).
    pub fn face(&self) -> FaceSize {
        FaceSize::from_px(self.face_size.unwrap_or(DEFAULT_FACE_SIZE))
            .unwrap_or(FaceSize::Medium)
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme
            .as_deref()
            .and_then(ThemeMode::parse)
            .unwrap_or(ThemeMode::Auto)
    }

    pub fn show_flags(&self) -> bool {
        self.show_flags.unwrap_or(DEFAULT_SHOW_FLAGS)
    }

    pub fn creature_mode(&self) -> bool {
        self.creature_mode.unwrap_or(DEFAULT_CREATURE_MODE)
    }

    pub fn feed_url(&self) -> String {
        self.feed_url
            .clone()
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string())
    }

    pub fn feed_poll_minute(&self) -> u32 {
        self.feed_poll_minute.unwrap_or(DEFAULT_FEED_POLL_MINUTE)
    }

    /// Log the effective configuration at startup.
    pub fn log_config(&self) {
        let config_path = Self::get_config_path()
            .unwrap_or_else(|_| PathBuf::from("~/.config/klokr/klokr.toml"));

        Log::log_block_start(&format!(
            "Loaded configuration from {}",
            config_path.display()
        ));

        let lat = self.latitude();
        let lon = self.longitude();
        let lat_dir = if lat >= 0.0 { "N" } else { "S" };
        let lon_dir = if lon >= 0.0 { "E" } else { "W" };
        Log::log_indented(&format!(
            "Location: {:.4}°{}, {:.4}°{}",
            lat.abs(),
            lat_dir,
            lon.abs(),
            lon_dir
        ));
        Log::log_indented(&format!("Face size: {} px", self.face().side_px()));
        Log::log_indented(&format!("Theme: {}", self.theme_mode().as_str()));
        Log::log_indented(&format!("Show flags: {}", self.show_flags()));
        Log::log_indented(&format!("Creature mode: {}", self.creature_mode()));
        Log::log_indented(&format!("Feed URL: {}", self.feed_url()));
        Log::log_indented(&format!(
            "Feed poll minute: {} past the hour",
            self.feed_poll_minute()
        ));
    }
}

/// Comprehensive configuration validation to prevent impossible setups.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(latitude) = config.latitude {
        if !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&latitude) {
            anyhow::bail!(
                "Latitude ({}) must be between {} and {} degrees",
                latitude,
                MINIMUM_LATITUDE,
                MAXIMUM_LATITUDE
            );
        }
    }

    if let Some(longitude) = config.longitude {
        if !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&longitude) {
            anyhow::bail!(
                "Longitude ({}) must be between {} and {} degrees",
                longitude,
                MINIMUM_LONGITUDE,
                MAXIMUM_LONGITUDE
            );
        }
    }

    if let Some(face_size) = config.face_size {
        if FaceSize::from_px(face_size).is_none() {
            anyhow::bail!(
                "Face size ({}) must be one of {:?} pixels",
                face_size,
                SUPPORTED_FACE_SIZES
            );
        }
    }

    if let Some(theme) = config.theme.as_deref() {
        if ThemeMode::parse(theme).is_none() {
            anyhow::bail!(
                "Theme (\"{}\") must be \"auto\", \"day\" or \"night\"",
                theme
            );
        }
    }

    if let Some(minute) = config.feed_poll_minute {
        if minute > MAXIMUM_FEED_POLL_MINUTE {
            anyhow::bail!(
                "Feed poll minute ({}) must be between 0 and {}",
                minute,
                MAXIMUM_FEED_POLL_MINUTE
            );
        }
    }

    if let Some(url) = config.feed_url.as_deref() {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("Feed URL must be an http(s) URL, got \"{}\"", url);
        }
    }

    Ok(())
}

/// Builds the commented default config file line by line.
struct ConfigBuilder {
    lines: Vec<String>,
}

impl ConfigBuilder {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn add_section(mut self, title: &str) -> Self {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(format!("#[{}]", title));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.lines.push(format!("{} = {} # {}", key, value, comment));
        self
    }

    fn build(self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}

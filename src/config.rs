//! Configuration file handling for pinch-keys.
//!
//! Loads configuration from `<config dir>/pinch-keys/config.toml` or a
//! custom path. Every section and field is optional; missing values take the
//! built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::camera::{CameraSettings, Resolution};
use crate::gesture::GestureConfig;
use crate::keyboard::{default_rows, KeyGeometry, Keyboard};
use crate::render::{CharSet, Palette};
use crate::tracker::TrackerSettings;

/// Longest accepted pause between key presses, in seconds.
pub const MAX_COOLDOWN_SECS: f32 = 3600.0;
/// Largest accepted key width, height or margin, in pixels.
pub const MAX_KEY_SIZE: i32 = 10_000;
pub const MAX_WIDE_FACTOR: i32 = 100;

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub gesture: GestureSection,
    pub keyboard: KeyboardConfig,
    pub tracker: TrackerConfig,
    pub colors: Palette,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device: u32,
    pub mirror: bool,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            mirror: true,
            width: Resolution::FULL_HD.width,
            height: Resolution::FULL_HD.height,
            fps: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSection {
    /// Pinch distance in capture pixels below which a pinch clicks
    pub click_distance_threshold: f32,
    /// Minimum seconds between two clicks
    pub click_cooldown_secs: f32,
}

impl Default for GestureSection {
    fn default() -> Self {
        Self {
            click_distance_threshold: 30.0,
            click_cooldown_secs: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub key_width: i32,
    pub key_height: i32,
    pub key_margin: i32,
    pub wide_token: String,
    pub wide_factor: i32,
    /// Key tokens, row by row. Non-printable keys use lowercase names.
    pub rows: Vec<Vec<String>>,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        let geometry = KeyGeometry::default();
        Self {
            key_width: geometry.width,
            key_height: geometry.height,
            key_margin: geometry.margin,
            wide_token: geometry.wide_token,
            wide_factor: geometry.wide_factor,
            rows: default_rows(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub python: PathBuf,
    pub script: PathBuf,
    pub min_confidence: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let settings = TrackerSettings::default();
        Self {
            python: settings.python,
            script: settings.script,
            min_confidence: settings.min_confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Key that ends the session
    pub quit_key: char,
    pub status_bar: bool,
    /// Camera background: standard, blocks, minimal, off
    pub charset: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            quit_key: 'q',
            status_bar: true,
            charset: CharSet::default().name().to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would make the keyboard unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(ConfigError::Invalid("camera width and height must be greater than 0".to_string()));
        }
        let threshold = self.gesture.click_distance_threshold;
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gesture.click_distance_threshold must be positive, got {}",
                self.gesture.click_distance_threshold
            )));
        }
        let cooldown = self.gesture.click_cooldown_secs;
        if !(0.0..=MAX_COOLDOWN_SECS).contains(&cooldown) {
            return Err(ConfigError::Invalid(format!(
                "gesture.click_cooldown_secs must be between 0 and {}, got {}",
                MAX_COOLDOWN_SECS, self.gesture.click_cooldown_secs
            )));
        }
        let k = &self.keyboard;
        if k.key_width <= 0 || k.key_height <= 0 || k.key_margin < 0 || k.wide_factor <= 0 {
            return Err(ConfigError::Invalid("keyboard key sizes must be positive".to_string()));
        }
        if k.key_width > MAX_KEY_SIZE || k.key_height > MAX_KEY_SIZE || k.key_margin > MAX_KEY_SIZE {
            return Err(ConfigError::Invalid(format!(
                "keyboard key_width, key_height and key_margin must be at most {}",
                MAX_KEY_SIZE
            )));
        }
        if k.wide_factor > MAX_WIDE_FACTOR {
            return Err(ConfigError::Invalid(format!(
                "keyboard.wide_factor must be at most {}, got {}",
                MAX_WIDE_FACTOR, k.wide_factor
            )));
        }
        if k.rows.iter().all(|row| row.is_empty()) {
            return Err(ConfigError::Invalid("keyboard.rows must contain at least one key".to_string()));
        }
        if !(0.0..=1.0).contains(&self.tracker.min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "tracker.min_confidence must be between 0.0 and 1.0, got {}",
                self.tracker.min_confidence
            )));
        }
        if CharSet::from_name(&self.ui.charset).is_none() {
            return Err(ConfigError::Invalid(format!(
                "ui.charset must be one of standard, blocks, minimal, off; got '{}'",
                self.ui.charset
            )));
        }
        Ok(())
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.camera.width,
            height: self.camera.height,
        }
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.camera.device,
            resolution: self.resolution(),
            fps: self.camera.fps,
            mirror: self.camera.mirror,
        }
    }

    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            frame_width: self.camera.width,
            frame_height: self.camera.height,
            click_distance_threshold: self.gesture.click_distance_threshold,
            // Unvalidated values are clamped to the accepted range; NaN becomes zero
            click_cooldown: Duration::try_from_secs_f32(
                self.gesture.click_cooldown_secs.clamp(0.0, MAX_COOLDOWN_SECS),
            )
            .unwrap_or_default(),
        }
    }

    pub fn key_geometry(&self) -> KeyGeometry {
        KeyGeometry {
            width: self.keyboard.key_width,
            height: self.keyboard.key_height,
            margin: self.keyboard.key_margin,
            wide_token: self.keyboard.wide_token.clone(),
            wide_factor: self.keyboard.wide_factor,
        }
    }

    pub fn build_keyboard(&self) -> Keyboard {
        Keyboard::from_rows(&self.keyboard.rows, &self.key_geometry())
    }

    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            python: self.tracker.python.clone(),
            script: self.tracker.script.clone(),
            min_confidence: self.tracker.min_confidence,
        }
    }

    pub fn charset(&self) -> CharSet {
        CharSet::from_name(&self.ui.charset).unwrap_or_default()
    }

    /// Serialize back to TOML (used by `config show`).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to write config file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Write the commented default config to `path`, creating parent
/// directories. Refuses to overwrite an existing file.
pub fn write_default(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let write_err = |e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(write_err)?;
    log::info!("Wrote default config to {}", path.display());
    Ok(())
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("pinch-keys").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/pinch-keys/config.toml")
        })
}

/// Commented default config written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# pinch-keys configuration

[camera]
# Camera device index (see `pinch-keys list-cameras`)
device = 0
# Mirror horizontally (selfie mode)
mirror = true
# Capture resolution; key geometry is in these pixels
width = 1920
height = 1080
fps = 30

[gesture]
# Thumb-to-index distance (pixels) that counts as a pinch
click_distance_threshold = 30.0
# Minimum seconds between two key presses
click_cooldown_secs = 0.5

[keyboard]
key_width = 80
key_height = 80
key_margin = 20
# This key is wide_factor times wider than the others
wide_token = "space"
wide_factor = 4
# Uncomment to replace the default 60% layout
# rows = [
#     ["1", "2", "3", "backspace"],
#     ["q", "w", "e", "enter"],
#     ["space"],
# ]

[tracker]
# Interpreter and helper script running the MediaPipe hand landmarker
python = "python3"
script = "scripts/hand_landmarks.py"
min_confidence = 0.7

[colors]
# [r, g, b]
key = [0, 50, 100]
key_hover = [0, 100, 150]
key_text = [255, 255, 255]
cursor = [0, 255, 0]
cursor_click = [255, 0, 0]
landmarks = [255, 255, 0]

[ui]
quit_key = "q"
status_bar = true
# Camera background: standard, blocks, minimal, off
charset = "standard"
"#;

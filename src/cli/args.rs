//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::camera::Resolution;
use crate::config::{Config, MAX_COOLDOWN_SECS};

/// Type by pinching over a virtual keyboard drawn on your webcam image
#[derive(Parser, Debug)]
#[command(name = "pinch-keys")]
#[command(version, about = "Webcam virtual keyboard: pinch thumb and index finger to type", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Capture resolution, WIDTHxHEIGHT
    #[arg(long, value_parser = parse_resolution)]
    pub resolution: Option<Resolution>,

    /// Pinch distance in pixels that counts as a click
    #[arg(long, value_parser = parse_positive_f32)]
    pub threshold: Option<f32>,

    /// Minimum seconds between two key presses
    #[arg(long, value_parser = parse_cooldown_secs)]
    pub cooldown: Option<f32>,

    /// Do not mirror the camera image
    #[arg(long)]
    pub no_mirror: bool,

    /// Log key presses instead of sending them to the OS
    #[arg(long)]
    pub dry_run: bool,

    /// Play back a JSON-lines landmark recording instead of the camera
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Python interpreter for the landmark helper
    #[arg(long)]
    pub python: Option<PathBuf>,

    /// Landmark helper script
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Print the key table with pixel rectangles
    Layout,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Override config values with the flags that were given.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(camera) = self.camera {
            config.camera.device = camera;
        }
        if let Some(resolution) = self.resolution {
            config.camera.width = resolution.width;
            config.camera.height = resolution.height;
        }
        if let Some(threshold) = self.threshold {
            config.gesture.click_distance_threshold = threshold;
        }
        if let Some(cooldown) = self.cooldown {
            config.gesture.click_cooldown_secs = cooldown;
        }
        if self.no_mirror {
            config.camera.mirror = false;
        }
        if let Some(python) = &self.python {
            config.tracker.python = python.clone();
        }
        if let Some(script) = &self.script {
            config.tracker.script = script.clone();
        }
    }
}

/// Parse and validate resolution (WIDTHxHEIGHT format)
pub fn parse_resolution(s: &str) -> Result<Resolution, String> {
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(|| {
        format!(
            "Invalid resolution format '{}'. Use WIDTHxHEIGHT (e.g., 1920x1080)",
            s
        )
    })?;
    let width: u32 = w
        .trim()
        .parse()
        .map_err(|_| format!("Invalid width '{}' in resolution", w))?;
    let height: u32 = h
        .trim()
        .parse()
        .map_err(|_| format!("Invalid height '{}' in resolution", h))?;
    if width == 0 || height == 0 {
        return Err("Resolution width and height must be greater than 0".to_string());
    }
    if width > 7680 || height > 4320 {
        return Err("Resolution exceeds maximum supported (7680x4320)".to_string());
    }
    Ok(Resolution { width, height })
}

fn parse_f32(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", s));
    }
    Ok(value)
}

/// Parse a number greater than zero
pub fn parse_positive_f32(s: &str) -> Result<f32, String> {
    let value = parse_f32(s)?;
    if value <= 0.0 {
        return Err(format!("Value must be greater than 0, got {}", value));
    }
    Ok(value)
}

/// Parse a cooldown in seconds, from zero up to an hour
pub fn parse_cooldown_secs(s: &str) -> Result<f32, String> {
    let value = parse_f32(s)?;
    if value < 0.0 {
        return Err(format!("Value must not be negative, got {}", value));
    }
    if value > MAX_COOLDOWN_SECS {
        return Err(format!("Value must be at most {}, got {}", MAX_COOLDOWN_SECS, value));
    }
    Ok(value)
}

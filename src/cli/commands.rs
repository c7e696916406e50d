//! Subcommand handlers for list-cameras, layout and config actions.

use std::path::Path;

use super::args::ConfigAction;
use crate::camera::{self, CameraError};
use crate::config::{self, Config, ConfigError};
use crate::keyboard::Keyboard;

/// List available cameras and print them to stdout.
pub fn list_cameras() -> Result<(), CameraError> {
    let devices = camera::list_devices()?;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure your camera is connected and permissions are granted.");
        println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --camera <index> to select a camera.");
    }
    Ok(())
}

/// Key table as printed by `layout`: one line per key.
pub fn format_layout(keyboard: &Keyboard) -> String {
    let mut out = format!("{:<10} {:>5} {:>5} {:>5} {:>5}\n", "KEY", "X", "Y", "W", "H");
    for key in keyboard.keys() {
        out.push_str(&format!(
            "{:<10} {:>5} {:>5} {:>5} {:>5}\n",
            key.label, key.x, key.y, key.width, key.height
        ));
    }
    out
}

/// Print the key table for the effective configuration.
pub fn print_layout(config: &Config) {
    let keyboard = config.build_keyboard();
    print!("{}", format_layout(&keyboard));
    println!();
    println!("{} keys", keyboard.len());
    if let Some(b) = keyboard.bounds() {
        println!("Bounds: ({}, {}) - ({}, {})", b.left, b.top, b.right, b.bottom);
    }
    let resolution = config.resolution();
    if !keyboard.fits_within(resolution.width, resolution.height) {
        println!(
            "Warning: keyboard extends past the {} capture frame; some keys cannot be reached",
            resolution
        );
    }
}

/// Handle config subcommand actions.
///
/// `path` is the `--config` override; without it the default location is
/// used.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    path: Option<&Path>,
) -> Result<(), ConfigError> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(config::default_path);
    match action {
        ConfigAction::Show => {
            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found, defaults)", config_path.display());
            }
            println!();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init => {
            config::write_default(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

//! Command-line interface definitions and helpers.

mod args;
mod commands;

pub use args::{parse_cooldown_secs, parse_positive_f32, parse_resolution, Args, Command, ConfigAction};
pub use commands::{format_layout, handle_config_action, list_cameras, print_layout};

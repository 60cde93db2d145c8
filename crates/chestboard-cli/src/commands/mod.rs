pub mod config;
pub mod countdown;
pub mod cycle;
pub mod roster;

use std::path::PathBuf;

use chestboard_core::Config;

/// Load configuration from the override path or the default location.
pub fn load_config(path: Option<PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p,
        None => Config::default_path()?,
    };
    Ok(Config::load(&path)?)
}

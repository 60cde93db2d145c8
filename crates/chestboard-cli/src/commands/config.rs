use std::path::PathBuf;

use clap::Subcommand;

use chestboard_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
    /// Write a starter configuration file
    Init,
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction, config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = match config_path {
        Some(p) => p,
        None => Config::default_path()?,
    };

    match action {
        ConfigAction::Show => {
            let config = Config::load(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(format!("refusing to overwrite {}", path.display()).into());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, Config::starter_toml())?;
            println!("wrote {}", path.display());
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}

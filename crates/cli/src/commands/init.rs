//! `promptloom init`: write the default config file.

use super::files::CmdResult;
use promptloom_config::AppConfig;

pub fn run() -> CmdResult {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("Config already exists at: {}", config_path.display());
        println!("Edit it manually or delete it and re-run init.");
        // Validate the existing file.
        AppConfig::load()?;
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("Created config.toml at: {}", config_path.display());
    }

    Ok(())
}

//! Config command - read and change settings

use crate::cli::ConfigCommands;
use crate::config::{KEYS, RecipeBoxConfig, first_time_setup};
use crate::{RecipeBoxError, Result};
use std::path::Path;

/// Execute a config subcommand against the file at `path`
///
/// # Errors
///
/// Returns `RecipeBoxError` if the key or value is invalid or the file
/// cannot be written.
pub fn execute(
    mut config: RecipeBoxConfig,
    command: &ConfigCommands,
    path: &Path,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting)?;
            config.set(key, value)?;
            config.save_to(path)?;
            if !quiet {
                println!("Set {key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key.trim())?);
        }
        ConfigCommands::List => {
            for key in KEYS {
                println!("{key} = {}", config.get(key)?);
            }
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Setup => {
            first_time_setup()?;
        }
    }
    Ok(())
}

/// Split `key=value`, trimming both sides
///
/// # Errors
///
/// Returns `RecipeBoxError::InvalidInput` if there is no `=` or no key.
pub fn parse_setting(setting: &str) -> Result<(&str, &str)> {
    match setting.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(RecipeBoxError::InvalidInput(
            "Invalid format. Use: recipebox config set key=value".into(),
        )),
    }
}

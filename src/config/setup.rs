//! Interactive setup wizard for first-time configuration
//!
//! Asks where the recipe backend lives and a couple of client settings,
//! then writes the configuration file.

use super::RecipeBoxConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};

/// Interactive first-time setup - prompts for the backend address
///
/// Guides the user through creating their configuration:
/// 1. Prompts for the API address (default: `http://localhost:3001`)
/// 2. Prompts for the request timeout in seconds
/// 3. Prompts for the number of featured recipes
/// 4. Validates and saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - User input cannot be read
/// - A value is invalid
/// - The configuration cannot be saved
pub fn first_time_setup() -> Result<RecipeBoxConfig, ConfigError> {
    println!("Welcome to recipebox! Let's point it at your recipe service.\n");

    let defaults = RecipeBoxConfig::default();
    let theme = ColorfulTheme::default();

    let api_url: String = Input::with_theme(&theme)
        .with_prompt("API address")
        .default(defaults.api_url.clone())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let request_timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout (seconds)")
        .default(defaults.request_timeout_secs)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let featured_limit: usize = Input::with_theme(&theme)
        .with_prompt("Featured recipes to show")
        .default(defaults.featured_limit)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let mut config = defaults;
    config.set("api_url", &api_url)?;
    config.request_timeout_secs = request_timeout_secs;
    config.featured_limit = featured_limit;
    config.validate()?;

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Path of the recipe file
    #[serde(default = "default_recipe_file")]
    pub recipe_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recipe_file: default_recipe_file(),
        }
    }
}

fn default_recipe_file() -> PathBuf {
    PathBuf::from("App_Data/Recipes.txt")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FILED_RECIPES__ prefix
    /// 2. filed-recipes.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FILED_RECIPES__RECIPE_FILE
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("filed-recipes").required(false))
        .add_source(
            Environment::with_prefix("FILED_RECIPES")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

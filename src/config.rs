use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

use crate::model::CollisionPolicy;

/// Defaults that apply when the matching CLI flag is not given.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub dir_prefix: String,
    pub on_collision: CollisionPolicy,
}

impl AppConfig {
    pub fn load() -> Result<AppConfig, ConfigError> {
        // Start by creating a ConfigBuilder
        let builder = Config::builder()
            .set_default("dir_prefix", "part")?
            .set_default("on_collision", "skip")?
            // Add configuration values from a file named 'Config.toml', if present
            .add_source(ConfigFile::with_name("Config").required(false))
            // Build the configuration
            .build()?;

        // Try to deserialize the configuration into our AppConfig struct
        builder.try_deserialize::<AppConfig>()
    }
}

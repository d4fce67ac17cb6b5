use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml},
};
use std::path::Path;

use super::ParspeedConfig;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

impl ParspeedConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        let figment = Self::figment(custom_config)?;
        let config: ParspeedConfig = figment
            .extract()
            .context("Failed to parse parspeed configuration")?;

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn figment(custom_config: Option<&str>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        // If custom config is specified, use only that + defaults + env vars
        if let Some(custom_path) = custom_config {
            let path = Path::new(custom_path);
            if !path.exists() {
                bail!("Config file not found: {custom_path}");
            }
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        } else {
            // Project config in the working directory - both formats
            figment = figment
                .merge(Toml::file("parspeed.toml"))
                .merge(Json::file("parspeed.json"));
        }

        // Environment variables always have highest priority
        Ok(figment.merge(Env::prefixed("PARSPEED_").split("__")))
    }

    /// Merged configuration rendered back as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

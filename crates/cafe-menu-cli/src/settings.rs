use anyhow::Result;
use cafe_menu_client::{Category, DEFAULT_BASE_URL};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default)]
    pub initial_category: Category,
    pub tick_rate_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Settings {
    /// Defaults < config file < `CAFE_MENU__*` environment variables.
    /// Example: CAFE_MENU__API__BASE_URL=http://cafe.local/api
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config/settings").required(false),
        };

        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("ui.initial_category", "espresso")?
            .set_default("ui.tick_rate_ms", 100)?
            .set_default("logging.level", "info")?
            .set_default("logging.directory", "logs")?
            .set_default("logging.format", "pretty")?
            .add_source(file)
            .add_source(
                Environment::with_prefix("CAFE_MENU")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("api.base_url must be an http(s) URL, got {:?}", url);
        }
        if self.ui.tick_rate_ms == 0 {
            anyhow::bail!("ui.tick_rate_ms must be greater than zero");
        }
        Ok(())
    }
}

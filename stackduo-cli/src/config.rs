use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

use crate::output::OutputFormat;

/// Optional settings file, looked up in the working directory
pub const CONFIG_FILE: &str = "stackduo.toml";

pub const DEFAULT_LOG_FILTER: &str = "stackduo_cli=info,stackduo_engine=info";

/// Environment variables and the settings keys they override
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("STACKDUO_DATASET", "dataset.path"),
    ("STACKDUO_FORMAT", "output.format"),
    ("STACKDUO_LOG", "logging.filter"),
];

#[derive(Debug, Deserialize)]
pub struct DatasetSettings {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub dataset: DatasetSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
    }

    /// Defaults, then `config_file` if it exists, then environment overrides
    /// (highest priority) looked up through `env`.
    pub fn load(
        config_file: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("dataset.path", "dataset.json")?
            .set_default("output.format", "table")?
            .set_default("logging.filter", DEFAULT_LOG_FILTER)?;

        if config_file.exists() {
            builder = builder.add_source(File::from(config_file.to_path_buf()).required(false));
        }

        for (var, key) in ENV_OVERRIDES {
            if let Some(value) = env(var) {
                builder = builder.set_override(*key, value)?;
            }
        }

        builder.build()?.try_deserialize()
    }
}

use crate::validation::ValidationOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "RESPONDER";
/// Kept for deployments that only know the storage path variable.
const STORAGE_PATH_ENV: &str = "STORAGE_FILE_PATH";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    pub report_all: bool,
}

impl ValidationConfig {
    pub fn options(&self) -> ValidationOptions {
        ValidationOptions {
            report_all: self.report_all,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                path: PathBuf::from("questions.json"),
            },
            validation: ValidationConfig { report_all: false },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl ApiConfig {
    /// Layers, lowest priority first: built-in defaults,
    /// `~/.config/responder/api.toml`, `./responder.toml`, the explicit file,
    /// `RESPONDER_*` variables, then `STORAGE_FILE_PATH`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = defaults()?;

        for path in default_config_paths() {
            builder = builder.add_source(File::from(path).required(false));
        }

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()));
        }

        let builder = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "storage.path",
                std::env::var(STORAGE_PATH_ENV).ok().filter(|p| !p.is_empty()),
            )?;

        finish(builder)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = ApiConfig::default();

    Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default(
            "storage.path",
            defaults.storage.path.to_string_lossy().into_owned(),
        )?
        .set_default("validation.report_all", defaults.validation.report_all)?
        .set_default("logging.level", defaults.logging.level)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<ApiConfig, ConfigError> {
    let mut config: ApiConfig = builder.build()?.try_deserialize()?;
    config.storage.path = expand_tilde(&config.storage.path);
    Ok(config)
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("responder/api.toml"));
    }
    paths.push(PathBuf::from("responder.toml"));
    paths
}

fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

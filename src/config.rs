use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Redis connection URL shared by all catalog stores
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Experiment identity used to bucket users into treatments
    #[serde(default = "default_experiment_name")]
    pub experiment_name: String,

    /// Number of track ids the random fallback draws from
    #[serde(default = "default_catalog_size")]
    pub catalog_size: i64,

    /// Directory for the JSON-lines event log; events go to tracing when unset
    #[serde(default)]
    pub data_log_dir: Option<PathBuf>,
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_experiment_name() -> String {
    "tiered-next-track".to_string()
}

fn default_catalog_size() -> i64 {
    50_000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.catalog_size <= 0 {
            anyhow::bail!("CATALOG_SIZE must be positive, got {}", config.catalog_size);
        }

        Ok(config)
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

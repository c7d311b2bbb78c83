//! Configuration loading for mchviz.
//! Reads mchviz.toml from the current directory or the path in MCHVIZ_CONFIG,
//! then applies environment overrides (`DATA_DIR`, `MCHVIZ_HOST`, `MCHVIZ_PORT`).

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("DATA_DIR is not set (set it in the environment or [paths].data_dir)")]
    MissingDataDir,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Config file layout. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> IpAddr { IpAddr::from([127, 0, 0, 1]) }
fn default_port() -> u16    { 5000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// TOML file listing login accounts.
    pub users_file: Option<PathBuf>,
}

fn default_static_dir() -> PathBuf { PathBuf::from("static") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self { data_dir: None, static_dir: default_static_dir(), users_file: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Upper bound on cached responses.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_ttl_secs() -> u64      { 3600 }
fn default_max_entries() -> usize { 500 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: default_ttl_secs(), max_entries: default_max_entries() }
    }
}

/// Fully resolved configuration used by the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub users_file: Option<PathBuf>,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,
}

impl Config {
    /// Load configuration from mchviz.toml (if present) and the process environment.
    pub fn load() -> Result<Self> {
        let path = std::env::var("MCHVIZ_CONFIG").ok();
        let file = match path.as_deref() {
            Some(p) => FileConfig::read(Path::new(p))?,
            None if Path::new("mchviz.toml").exists() => FileConfig::read(Path::new("mchviz.toml"))?,
            None => FileConfig::default(),
        };
        file.resolve(|key| std::env::var(key).ok())
    }
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(toml::from_str(&content)?)
    }

    /// Apply environment overrides and check required values.
    pub fn resolve(self, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let data_dir = env("DATA_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(self.paths.data_dir)
            .ok_or(ConfigError::MissingDataDir)?;

        let host = match env("MCHVIZ_HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue { key: "MCHVIZ_HOST", value: v })?,
            None => self.server.host,
        };
        let port = match env("MCHVIZ_PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue { key: "MCHVIZ_PORT", value: v })?,
            None => self.server.port,
        };

        Ok(Config {
            listen: SocketAddr::new(host, port),
            data_dir,
            static_dir: self.paths.static_dir,
            users_file: self.paths.users_file,
            cache_ttl_secs: self.cache.ttl_secs,
            cache_max_entries: self.cache.max_entries,
        })
    }
}

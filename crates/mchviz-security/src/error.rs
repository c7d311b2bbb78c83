use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("Failed to read users file {path}: {source}")]
    UsersFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid users file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SecurityError>;

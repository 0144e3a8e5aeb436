use thiserror::Error;

/// Errors surfaced by the simulation core
///
/// The simulation itself is total over its inputs; errors only occur at the
/// configuration-loading boundary.
#[derive(Error, Debug)]
pub enum SnowfieldError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SnowfieldError>;

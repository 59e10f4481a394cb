use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors surfaced by configuration loading.
///
/// Graph construction and queries never fail; unresolved imports, unknown
/// targets and empty inputs degrade to empty results instead.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

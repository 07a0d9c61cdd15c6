use thiserror::Error;

use crate::model::EntityId;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No loader registry attached to this request")]
    MissingLoaders,

    #[error("No free ID left after {0}")]
    IdsExhausted(EntityId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DemoError>;

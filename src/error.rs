use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Validation failed, missing fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("Settings deserialization error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Settings payload is not a key/value mapping")]
    NotAMapping,
}

pub type Result<T> = std::result::Result<T, Error>;

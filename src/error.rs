use thiserror::Error;

/// Failures reading or writing host DOM nodes. Never fatal; the affected
/// node is skipped for the current pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Message node not found: {0}")]
    NodeMissing(String),
    #[error("Avatar element not found in message {0}")]
    AvatarMissing(String),
    #[error("Element not found: {0}")]
    ElementMissing(&'static str),
}

/// Failures of the host settings bridge round trip.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Bridge is not available")]
    Unavailable,
    #[error("Bridge call failed: {0}")]
    Call(String),
    #[error("Invalid settings payload: {0}")]
    Payload(#[from] themecore::Error),
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
    #[error("No settings available from the host")]
    SettingsUnavailable,
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Cannot read configuration: {0}")]
    ConfigFile(std::io::Error),
}

pub type Result<T> = std::result::Result<T, ThemeError>;

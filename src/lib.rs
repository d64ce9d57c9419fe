pub mod animation;
pub mod client;
pub mod messages;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PonderError {
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Malformed payload: {0}")]
    PayloadError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for PonderError {
    fn from(e: reqwest::Error) -> Self {
        PonderError::TransportError(e.to_string())
    }
}

impl PonderError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // The backend may come back; the widget stays usable
            PonderError::TransportError(_) => true,
            PonderError::PayloadError(_) => true,
            // A broken channel means a worker is gone
            PonderError::ChannelError(_) => false,
            PonderError::ConfigError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PonderError>;

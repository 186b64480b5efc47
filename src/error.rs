use reqwest::StatusCode;
use thiserror::Error;

/// Unified crate-level error type
///
/// All errors in the crate use this enum with `thiserror` for proper
/// error propagation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Tokenization failed: {message}")]
    Tokenization { message: String },

    #[error("Translation failed: {message}")]
    Translation { message: String },

    #[error("Authentication failed (HTTP {status}). Check your API key")]
    Auth { status: StatusCode },

    #[error("Rate limited (HTTP 429). Wait before retrying")]
    RateLimited,

    #[error("Translation service error (HTTP {status}). Try again later")]
    Server { status: StatusCode },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create an appropriate error from a non-success HTTP status,
    /// attaching the provider's message when the body carried one.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Auth { status },
            429 => Self::RateLimited,
            500..=599 => Self::Server { status },
            _ => Self::Translation {
                message: message.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            },
        }
    }

    /// True for errors that originate in the translation call; the caller
    /// resets the comparison side when one of these surfaces.
    pub fn is_translation(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Translation { .. }
                | Self::Auth { .. }
                | Self::RateLimited
                | Self::Server { .. }
        )
    }
}

/// Crate-level Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

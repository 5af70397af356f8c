//! Error types shared across Whirl crates.

/// Top-level error type for Whirl operations.
#[derive(Debug, thiserror::Error)]
pub enum SliderError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Gesture error: {message}")]
    Gesture { message: String },

    #[error("Motion error: {message}")]
    Motion { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SliderError.
pub type SliderResult<T> = Result<T, SliderError>;

impl SliderError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn gesture(msg: impl Into<String>) -> Self {
        Self::Gesture {
            message: msg.into(),
        }
    }

    pub fn motion(msg: impl Into<String>) -> Self {
        Self::Motion {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}

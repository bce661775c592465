//! Error types for slide import.

use thiserror::Error;

/// Result type alias using our ImportError type.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Message used when the service rejects the text without explaining why.
pub const GENERIC_REJECTION: &str = "Slide extraction failed";

/// Reasons an import did not change the deck.
///
/// Every variant leaves the deck exactly as it was.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Nothing to import.
    #[error("Import text is empty")]
    EmptyInput,

    /// Another import on the same session has not finished yet.
    #[error("An import is already in progress")]
    Busy,

    /// The service answered `success: false`.
    #[error("{message}")]
    Rejected {
        /// Message from the service, or a generic one.
        message: String,
    },

    /// The service reported success but returned no slides.
    #[error("The service returned no slides")]
    NoSlides,

    /// The response did not have the expected shape.
    #[error("Unexpected response from the extraction service")]
    Malformed {
        /// Parser detail, for logs.
        detail: String,
    },

    /// The service could not be reached or answered with a non-2xx status.
    #[error("The extraction service is unavailable")]
    Transport {
        /// Underlying cause, for logs.
        detail: String,
    },

    /// The editor session was closed while the request was pending.
    #[error("Import discarded because the editor was closed")]
    Discarded,
}

impl ImportError {
    /// Whether retrying the same text later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Busy | Self::Transport { .. } | Self::Malformed { .. } | Self::Rejected { .. }
        )
    }
}

impl From<reqwest::Error> for ImportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            detail: err.to_string(),
        }
    }
}

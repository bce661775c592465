//! Error types for deck construction and slide export.
//!
//! Editing operations never fail: a rejected mutation is reported as a
//! no-op by the operation itself. Only building a deck from external
//! content and exporting a slide can produce an [`Error`].

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or exporting a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to write an exported document.
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),

    /// The export page template failed to render.
    #[error("Template rendering error: {0}")]
    Template(#[from] askama::Error),

    /// A deck must contain at least one slide.
    #[error("A deck needs at least one slide")]
    EmptyDeck,

    /// The requested slide does not exist.
    #[error("Slide index {index} is out of range for a deck of {len} slides")]
    SlideOutOfRange {
        /// Requested 0-based index.
        index: usize,
        /// Number of slides in the deck.
        len: usize,
    },
}

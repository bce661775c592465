//! Import of freeform text as pyramid slides.
//!
//! The text is sent to an extraction service that answers with structured
//! slides. The answer is validated at the boundary and only then replaces
//! the editor's deck, in one step.

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod wire;

pub use bridge::{apply_import, ImportBridge};
pub use client::{HttpExtractor, SlideExtractor};
pub use config::ImportConfig;
pub use error::{ImportError, Result};
pub use wire::{parse_response, ExtractionRequest};

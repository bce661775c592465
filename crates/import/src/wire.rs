//! Request and response shapes of the extraction service, and the
//! validation that turns a response body into slide drafts.

use crate::error::{ImportError, Result, GENERIC_REJECTION};
use pyramid_core::SlideDraft;
use serde::{Deserialize, Serialize};

/// Body of the extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRequest {
    pub text: String,
}

impl ExtractionRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Response envelope. Anything that does not deserialize into this is
/// malformed.
#[derive(Debug, Deserialize)]
struct ExtractionResponse {
    success: bool,
    #[serde(default)]
    slides: Option<Vec<WireSlide>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSlide {
    title: String,
    core_idea: String,
    #[serde(default)]
    arguments: Vec<String>,
}

impl From<WireSlide> for SlideDraft {
    fn from(slide: WireSlide) -> Self {
        SlideDraft::new(slide.title, slide.core_idea, slide.arguments).normalized()
    }
}

/// Validate a response body and extract normalized slide drafts.
///
/// Each returned draft has at least one argument entry.
pub fn parse_response(body: &str) -> Result<Vec<SlideDraft>> {
    let response: ExtractionResponse =
        serde_json::from_str(body).map_err(|e| ImportError::Malformed {
            detail: e.to_string(),
        })?;

    if !response.success {
        let message = response
            .error
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());
        return Err(ImportError::Rejected { message });
    }

    match response.slides {
        Some(slides) if !slides.is_empty() => Ok(slides.into_iter().map(SlideDraft::from).collect()),
        _ => Err(ImportError::NoSlides),
    }
}

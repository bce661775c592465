//! Label/content splitting for argument entries.
//!
//! An argument like `Cost: lower overhead` is shown as a small heading
//! (`Cost`) over its elaboration (` lower overhead`). Both the half-width
//! `:` and the full-width `：` colon act as the delimiter.

use serde::{Deserialize, Serialize};

/// Default prefix for positional labels (`论据1`, `论据2`, ...).
pub const DEFAULT_LABEL_PREFIX: &str = "论据";

const COLONS: &[char] = &[':', '：'];

/// An argument entry split into a label and its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedArgument {
    pub label: String,
    pub content: String,
}

impl ParsedArgument {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
        }
    }
}

/// Splits raw argument text into a [`ParsedArgument`].
#[derive(Debug, Clone)]
pub struct ArgumentParser {
    /// Prefix used for the positional fallback label.
    label_prefix: String,
}

impl Default for ArgumentParser {
    fn default() -> Self {
        Self {
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
        }
    }
}

impl ArgumentParser {
    /// Create a parser using the default `论据` label prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different prefix for positional labels, e.g. `"Argument "`.
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    /// The positional label for the 1-based `position`.
    pub fn placeholder_label(&self, position: usize) -> String {
        format!("{}{}", self.label_prefix, position)
    }

    /// Split `raw` on its first colon.
    ///
    /// Text before the colon is the label, text after it is the content.
    /// Nothing is trimmed. An empty label falls back to the positional
    /// placeholder, and an empty content falls back to the whole entry, so
    /// the parser never yields a blank slot. Without a colon the whole entry
    /// is the content.
    pub fn parse(&self, raw: &str, position: usize) -> ParsedArgument {
        match raw.split_once(COLONS) {
            Some((label, content)) => {
                let label = if label.is_empty() {
                    self.placeholder_label(position)
                } else {
                    label.to_string()
                };
                let content = if content.is_empty() { raw } else { content };
                ParsedArgument::new(label, content)
            }
            None => ParsedArgument::new(self.placeholder_label(position), raw),
        }
    }
}

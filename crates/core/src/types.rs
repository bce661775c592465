//! Domain types for pyramid slides.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of empty argument placeholders a new slide starts with.
pub const DEFAULT_ARGUMENT_SLOTS: usize = 3;

/// Opaque slide identifier, unique within a deck and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(u64);

impl SlideId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text field of a slide that can be edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideField {
    /// The slide title.
    Title,
    /// The thesis statement of the slide.
    CoreIdea,
}

/// A single pyramid slide: one title, one core idea, ordered arguments.
///
/// Slides are only created and mutated through [`crate::Deck`], which keeps
/// the argument list non-empty and the id unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    id: SlideId,
    title: String,
    core_idea: String,
    arguments: Vec<String>,
}

impl Slide {
    /// Create a blank slide with three empty argument placeholders.
    pub(crate) fn blank(id: SlideId) -> Self {
        Self {
            id,
            title: String::new(),
            core_idea: String::new(),
            arguments: vec![String::new(); DEFAULT_ARGUMENT_SLOTS],
        }
    }

    /// Create a slide from draft content, padding an empty argument list.
    pub(crate) fn from_draft(id: SlideId, draft: SlideDraft) -> Self {
        let draft = draft.normalized();
        Self {
            id,
            title: draft.title,
            core_idea: draft.core_idea,
            arguments: draft.arguments,
        }
    }

    pub fn id(&self) -> SlideId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn core_idea(&self) -> &str {
        &self.core_idea
    }

    /// Argument entries in display order. Never empty.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Argument entries that would occupy a slot when rendered.
    pub fn non_empty_arguments(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .map(String::as_str)
            .filter(|arg| !arg.trim().is_empty())
    }

    /// Get the value of an editable text field.
    pub fn field(&self, field: SlideField) -> &str {
        match field {
            SlideField::Title => &self.title,
            SlideField::CoreIdea => &self.core_idea,
        }
    }

    /// Copy this slide's content out as a draft (drops the id).
    pub fn to_draft(&self) -> SlideDraft {
        SlideDraft {
            title: self.title.clone(),
            core_idea: self.core_idea.clone(),
            arguments: self.arguments.clone(),
        }
    }

    pub(crate) fn set_field(&mut self, field: SlideField, value: String) {
        match field {
            SlideField::Title => self.title = value,
            SlideField::CoreIdea => self.core_idea = value,
        }
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut Vec<String> {
        &mut self.arguments
    }
}

/// Slide content without an identity, as supplied by an import or a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDraft {
    /// Slide title, may be empty.
    #[serde(default)]
    pub title: String,

    /// Core idea, may be empty.
    #[serde(default)]
    pub core_idea: String,

    /// Argument entries in display order.
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl SlideDraft {
    /// Create a draft from its three parts.
    pub fn new(
        title: impl Into<String>,
        core_idea: impl Into<String>,
        arguments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            core_idea: core_idea.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// Ensure the draft has at least one argument entry.
    pub fn normalized(mut self) -> Self {
        if self.arguments.is_empty() {
            self.arguments.push(String::new());
        }
        self
    }
}

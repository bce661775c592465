//! Slide rendering.
//!
//! [`Renderer::render`] turns a slide and its layout into a [`Document`].
//! The live preview and the HTML export both consume this document, so
//! they always show the same content.

use crate::argument::{ArgumentParser, ParsedArgument};
use crate::deck::Deck;
use crate::layout::LayoutVariant;
use crate::types::Slide;
use serde::Serialize;

/// Placeholder shown when a slide has no title.
pub const DEFAULT_TITLE_PLACEHOLDER: &str = "未填写标题";
/// Placeholder shown when a slide has no core idea.
pub const DEFAULT_CORE_IDEA_PLACEHOLDER: &str = "未填写核心观点";
/// Heading above the core idea block.
pub const DEFAULT_CORE_IDEA_HEADING: &str = "核心观点";

/// Fixed texts used while rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title_placeholder: String,
    pub core_idea_placeholder: String,
    pub core_idea_heading: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title_placeholder: DEFAULT_TITLE_PLACEHOLDER.to_string(),
            core_idea_placeholder: DEFAULT_CORE_IDEA_PLACEHOLDER.to_string(),
            core_idea_heading: DEFAULT_CORE_IDEA_HEADING.to_string(),
        }
    }
}

/// A text block that may hold a placeholder instead of user text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub is_placeholder: bool,
}

impl TextBlock {
    fn or_placeholder(text: &str, placeholder: &str) -> Self {
        if text.is_empty() {
            Self {
                text: placeholder.to_string(),
                is_placeholder: true,
            }
        } else {
            Self {
                text: text.to_string(),
                is_placeholder: false,
            }
        }
    }
}

/// Presentational content of one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: TextBlock,
    pub core_idea_heading: String,
    pub core_idea: TextBlock,
    pub layout: LayoutVariant,
    /// Parsed non-empty arguments, in slide order.
    pub arguments: Vec<ParsedArgument>,
}

impl Document {
    /// Plain-text rendering for terminals.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title.text);
        out.push('\n');
        out.push_str(&format!("[{}] {}\n", self.core_idea_heading, self.core_idea.text));
        out.push_str(&format!(
            "-- {} ({}) --\n",
            self.layout.display_name(),
            self.arguments.len()
        ));
        for arg in &self.arguments {
            out.push_str(&format!("* {}\n  {}\n", arg.label, arg.content));
        }
        out
    }
}

/// Builds [`Document`]s from slides.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    parser: ArgumentParser,
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with the default placeholders.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser(mut self, parser: ArgumentParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Render `slide` with the given layout.
    ///
    /// Blank and whitespace-only arguments are skipped and do not take a
    /// position; the remaining ones are numbered from 1 for their fallback
    /// labels.
    pub fn render(&self, slide: &Slide, layout: LayoutVariant) -> Document {
        let arguments = slide
            .non_empty_arguments()
            .enumerate()
            .map(|(idx, raw)| self.parser.parse(raw, idx + 1))
            .collect();

        Document {
            title: TextBlock::or_placeholder(slide.title(), &self.options.title_placeholder),
            core_idea_heading: self.options.core_idea_heading.clone(),
            core_idea: TextBlock::or_placeholder(
                slide.core_idea(),
                &self.options.core_idea_placeholder,
            ),
            layout,
            arguments,
        }
    }

    /// Render a slide with the layout chosen from its argument count.
    pub fn render_slide(&self, slide: &Slide) -> Document {
        self.render(slide, LayoutVariant::for_argument_count(slide.arguments().len()))
    }

    /// Render the deck's current slide.
    pub fn render_current(&self, deck: &Deck) -> Document {
        self.render(deck.current(), deck.current_layout())
    }
}

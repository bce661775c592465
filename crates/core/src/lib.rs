//! Core model for pyramid slide decks: slides with a title, a core idea and
//! supporting arguments, the automatic layout rule, and the renderer shared
//! by the live preview and the HTML export.

pub mod argument;
pub mod deck;
pub mod editor;
pub mod error;
pub mod export;
pub mod layout;
pub mod navigation;
pub mod render;
pub mod types;

pub use argument::{ArgumentParser, ParsedArgument};
pub use deck::Deck;
pub use editor::{EditorMode, EditorState, ImportOutcome, ImportStatus, ImportTicket};
pub use error::{Error, Result};
pub use export::{ExportOptions, ExportedSlide, HtmlExporter};
pub use layout::{select_layout, LayoutVariant};
pub use navigation::{InputEvent, InputHub, Key, NavigationEvent, Subscription};
pub use render::{Document, RenderOptions, Renderer, TextBlock};
pub use types::{Slide, SlideDraft, SlideField, SlideId};

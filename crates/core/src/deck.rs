//! The slide deck and its mutation contract.
//!
//! Every operation leaves the deck valid: at least one slide, a current
//! index inside the slide range, at least one argument per slide, and
//! unique slide ids. Operations that would break one of these rules are
//! rejected as a no-op and report `false`.

use crate::error::{Error, Result};
use crate::layout::LayoutVariant;
use crate::types::{Slide, SlideDraft, SlideField, SlideId};
use log::{debug, info};

/// Ordered slides plus the pointer to the slide under edit or preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    slides: Vec<Slide>,
    current_index: usize,
    /// Next id to hand out. Only ever grows, so ids are never reused.
    next_id: u64,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Create a deck holding one blank slide.
    pub fn new() -> Self {
        Self {
            slides: vec![Slide::blank(SlideId::new(1))],
            current_index: 0,
            next_id: 2,
        }
    }

    /// Build a deck from drafts, assigning fresh ids.
    pub fn from_drafts(drafts: Vec<SlideDraft>) -> Result<Self> {
        let mut deck = Self::new();
        if deck.replace_deck(drafts) {
            Ok(deck)
        } else {
            Err(Error::EmptyDeck)
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; a deck holds at least one slide.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The slide under edit or preview.
    pub fn current(&self) -> &Slide {
        &self.slides[self.current_index]
    }

    /// Get a slide by 0-based position.
    pub fn get(&self, index: usize) -> Result<&Slide> {
        self.slides.get(index).ok_or(Error::SlideOutOfRange {
            index,
            len: self.slides.len(),
        })
    }

    /// Layout of the current slide, chosen from its argument count.
    pub fn current_layout(&self) -> LayoutVariant {
        LayoutVariant::for_argument_count(self.current().arguments().len())
    }

    fn allocate_id(&mut self) -> SlideId {
        let id = SlideId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn current_mut(&mut self) -> &mut Slide {
        &mut self.slides[self.current_index]
    }

    /// Replace the title or core idea of the current slide.
    pub fn update_field(&mut self, field: SlideField, value: impl Into<String>) {
        self.current_mut().set_field(field, value.into());
    }

    /// Append a blank slide and make it current.
    pub fn add_slide(&mut self) -> SlideId {
        let id = self.allocate_id();
        self.slides.push(Slide::blank(id));
        self.current_index = self.slides.len() - 1;
        debug!("Added slide {} at position {}", id, self.current_index + 1);
        id
    }

    /// Remove the current slide. Rejected when it is the only slide.
    pub fn delete_slide(&mut self) -> bool {
        if self.slides.len() <= 1 {
            debug!("Refusing to delete the only slide");
            return false;
        }

        let removed = self.slides.remove(self.current_index);
        self.current_index = self.current_index.min(self.slides.len() - 1);
        debug!("Deleted slide {}", removed.id());
        true
    }

    /// Move the slide at `from` to position `to` and make `to` current.
    ///
    /// Rejected when either position is outside the deck.
    pub fn move_slide(&mut self, from: usize, to: usize) -> bool {
        let len = self.slides.len();
        if from >= len || to >= len {
            debug!("Rejected move {} -> {} in a deck of {}", from, to, len);
            return false;
        }

        let slide = self.slides.remove(from);
        self.slides.insert(to, slide);
        self.current_index = to;
        true
    }

    /// Move the current slide one position towards the front.
    pub fn move_current_up(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(to) => self.move_slide(self.current_index, to),
            None => false,
        }
    }

    /// Move the current slide one position towards the back.
    pub fn move_current_down(&mut self) -> bool {
        self.move_slide(self.current_index, self.current_index + 1)
    }

    /// Append an empty argument entry to the current slide.
    pub fn add_argument(&mut self) {
        self.current_mut().arguments_mut().push(String::new());
    }

    /// Replace the argument at `index` on the current slide.
    ///
    /// Rejected when `index` is out of bounds.
    pub fn update_argument(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.current_mut().arguments_mut().get_mut(index) {
            Some(arg) => {
                *arg = value.into();
                true
            }
            None => {
                debug!("Rejected update of missing argument {}", index);
                false
            }
        }
    }

    /// Remove the argument at `index` on the current slide.
    ///
    /// Rejected when it is the last remaining argument or out of bounds.
    pub fn remove_argument(&mut self, index: usize) -> bool {
        let arguments = self.current_mut().arguments_mut();
        if arguments.len() <= 1 || index >= arguments.len() {
            debug!("Rejected removal of argument {}", index);
            return false;
        }
        arguments.remove(index);
        true
    }

    /// Point at slide `index`, clamped into the deck.
    pub fn set_current_index(&mut self, index: usize) {
        self.current_index = index.min(self.slides.len() - 1);
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.slides.len()
    }

    /// Step back one slide, staying on the first slide.
    pub fn previous(&mut self) {
        self.set_current_index(self.current_index.saturating_sub(1));
    }

    /// Step forward one slide, staying on the last slide.
    pub fn next(&mut self) {
        self.set_current_index(self.current_index + 1);
    }

    /// Substitute the whole slide collection and point at the first slide.
    ///
    /// Each draft is padded to at least one argument and gets a fresh id.
    /// Rejected when `drafts` is empty.
    pub fn replace_deck(&mut self, drafts: Vec<SlideDraft>) -> bool {
        if drafts.is_empty() {
            debug!("Rejected replacement with an empty slide collection");
            return false;
        }

        let slides: Vec<Slide> = drafts
            .into_iter()
            .map(|draft| {
                let id = self.allocate_id();
                Slide::from_draft(id, draft)
            })
            .collect();

        info!("Replaced deck with {} slides", slides.len());
        self.slides = slides;
        self.current_index = 0;
        true
    }
}

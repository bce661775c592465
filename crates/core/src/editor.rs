//! Editor session state: the deck, the edit/preview mode, and the
//! bookkeeping that keeps at most one import in flight.

use crate::deck::Deck;
use crate::navigation::{InputEvent, Key, NavigationEvent, Subscription};
use crate::types::SlideDraft;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Whether the session is editing slides or presenting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Edit,
    Preview,
}

/// Proof that an import was started on a particular session.
///
/// Hand it back to [`EditorState::complete_import`] or
/// [`EditorState::abandon_import`] once the request resolves.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an unfinished import keeps the editor busy"]
pub struct ImportTicket {
    epoch: u64,
    started_at: Instant,
}

impl ImportTicket {
    /// Time since the import was started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Progress of the most recent import, for the busy indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStatus {
    #[default]
    Idle,
    Running {
        started_at: Instant,
    },
    Succeeded {
        slides: usize,
    },
    /// The request failed or returned nothing; the deck was kept.
    Failed,
}

impl ImportStatus {
    /// Short status line shown next to the import action.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Running { .. } => "开始解析...",
            Self::Succeeded { .. } => "✅ 解析成功！",
            Self::Failed => "❌ 解析失败，请重试",
        }
    }
}

/// What happened to a finished import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The deck was replaced with this many slides.
    Applied { slides: usize },
    /// The response contained no slides; the deck is unchanged.
    Empty,
    /// The session was closed while the request was pending; the response
    /// was dropped.
    Discarded,
}

/// The owned state of one editing session.
#[derive(Debug, Default)]
pub struct EditorState {
    deck: Deck,
    mode: EditorMode,
    /// Bumped when the session is closed so late import responses can be
    /// recognised and dropped.
    epoch: u64,
    import_status: ImportStatus,
    closed: bool,
}

impl EditorState {
    /// Start a session on a fresh one-slide deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session on an existing deck.
    pub fn with_deck(deck: Deck) -> Self {
        Self {
            deck,
            ..Self::default()
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Mutable access for editing operations.
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn enter_preview(&mut self) {
        self.mode = EditorMode::Preview;
    }

    pub fn exit_preview(&mut self) {
        self.mode = EditorMode::Edit;
    }

    pub fn toggle_preview(&mut self) {
        self.mode = match self.mode {
            EditorMode::Edit => EditorMode::Preview,
            EditorMode::Preview => EditorMode::Edit,
        };
    }

    /// Apply direction-level navigation to the deck.
    pub fn navigate(&mut self, event: NavigationEvent) {
        match event {
            NavigationEvent::Previous => self.deck.previous(),
            NavigationEvent::Next => self.deck.next(),
            NavigationEvent::Jump(index) => self.deck.set_current_index(index),
        }
    }

    /// React to raw input. Returns `true` if the event changed anything.
    ///
    /// Keys and swipes only act in preview mode; selecting a slide works
    /// in both modes.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let before = (self.deck.current_index(), self.mode);

        match (event, self.mode) {
            (InputEvent::Select(index), _) => self.navigate(NavigationEvent::Jump(index)),
            (InputEvent::Key(Key::ArrowLeft), EditorMode::Preview) => {
                self.navigate(NavigationEvent::Previous)
            }
            (InputEvent::Key(Key::ArrowRight), EditorMode::Preview) => {
                self.navigate(NavigationEvent::Next)
            }
            (InputEvent::Key(Key::Escape), EditorMode::Preview) => self.exit_preview(),
            (InputEvent::Swipe { start_x, end_x }, EditorMode::Preview) => {
                if let Some(direction) = InputEvent::swipe_direction(start_x, end_x) {
                    self.navigate(direction);
                }
            }
            _ => {}
        }

        before != (self.deck.current_index(), self.mode)
    }

    /// Apply every event queued on `subscription`. Returns how many changed
    /// the session.
    pub fn pump(&mut self, subscription: &Subscription) -> usize {
        subscription
            .drain()
            .into_iter()
            .filter(|event| self.handle_input(*event))
            .count()
    }

    /// Whether an import is pending (the busy indicator).
    pub fn is_importing(&self) -> bool {
        matches!(self.import_status, ImportStatus::Running { .. })
    }

    pub fn import_status(&self) -> ImportStatus {
        self.import_status
    }

    /// How long the pending import has been running.
    pub fn import_elapsed(&self) -> Option<Duration> {
        match self.import_status {
            ImportStatus::Running { started_at } => Some(started_at.elapsed()),
            _ => None,
        }
    }

    /// Status line with elapsed whole seconds while running, e.g.
    /// `开始解析... (3s)`.
    pub fn import_progress(&self) -> String {
        match self.import_elapsed() {
            Some(elapsed) => format!("{} ({}s)", self.import_status.label(), elapsed.as_secs()),
            None => self.import_status.label().to_string(),
        }
    }

    /// Reserve the import slot. Returns `None` while another import is
    /// pending or after the session was closed.
    pub fn begin_import(&mut self) -> Option<ImportTicket> {
        if self.is_importing() || self.closed {
            debug!("Import refused: busy={} closed={}", self.is_importing(), self.closed);
            return None;
        }
        let started_at = Instant::now();
        self.import_status = ImportStatus::Running { started_at };
        Some(ImportTicket {
            epoch: self.epoch,
            started_at,
        })
    }

    /// Finish an import by replacing the deck in one step.
    pub fn complete_import(&mut self, ticket: ImportTicket, drafts: Vec<SlideDraft>) -> ImportOutcome {
        if ticket.epoch != self.epoch {
            info!("Discarding import response for a closed session");
            return ImportOutcome::Discarded;
        }
        let count = drafts.len();
        if self.deck.replace_deck(drafts) {
            self.import_status = ImportStatus::Succeeded { slides: count };
            ImportOutcome::Applied { slides: count }
        } else {
            self.import_status = ImportStatus::Failed;
            ImportOutcome::Empty
        }
    }

    /// Release the import slot after a failed request. The deck is untouched.
    pub fn abandon_import(&mut self, ticket: ImportTicket) {
        if ticket.epoch == self.epoch {
            self.import_status = ImportStatus::Failed;
        }
    }

    /// Tear the session down. Pending imports will be discarded when they
    /// resolve and no new import can start.
    pub fn close(&mut self) {
        self.epoch += 1;
        self.import_status = ImportStatus::Idle;
        self.closed = true;
    }
}

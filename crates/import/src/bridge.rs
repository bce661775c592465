//! Glue between an extractor and an editor session.
//!
//! The deck is only touched after a response has been fully validated,
//! and only if the session that started the import is still open.

use crate::client::{HttpExtractor, SlideExtractor};
use crate::config::ImportConfig;
use crate::error::{ImportError, Result};
use crate::wire::ExtractionRequest;
use log::{info, warn};
use pyramid_core::{EditorState, ImportOutcome, ImportTicket, SlideDraft};

/// Imports freeform text into an [`EditorState`].
pub struct ImportBridge<E = HttpExtractor> {
    extractor: E,
}

impl ImportBridge<HttpExtractor> {
    /// Bridge talking to the HTTP extraction service.
    pub fn from_config(config: ImportConfig) -> Result<Self> {
        Ok(Self::new(HttpExtractor::new(config)?))
    }
}

impl<E: SlideExtractor> ImportBridge<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Ask the extractor for slides. Does not touch any deck.
    pub async fn fetch(&self, text: &str) -> Result<Vec<SlideDraft>> {
        if text.trim().is_empty() {
            return Err(ImportError::EmptyInput);
        }
        self.extractor.extract(&ExtractionRequest::new(text)).await
    }

    /// Import `text` into `editor`, replacing its deck on success.
    ///
    /// Returns the number of imported slides. On any error the deck is left
    /// as it was.
    ///
    /// If the returned future is dropped before it resolves (for example by
    /// a caller-side timeout), the import slot is released and the deck is
    /// left as it was.
    pub async fn import_from_text(&self, editor: &mut EditorState, text: &str) -> Result<usize> {
        let ticket = editor.begin_import().ok_or(ImportError::Busy)?;
        let mut pending = PendingImport {
            editor,
            ticket: Some(ticket),
        };

        let result = self.fetch(text).await;

        match pending.ticket.take() {
            Some(ticket) => apply_import(pending.editor, ticket, result),
            None => Err(ImportError::Discarded),
        }
    }
}

/// Holds the editor while a request is pending and gives the ticket back
/// on drop if the import never completed.
struct PendingImport<'a> {
    editor: &'a mut EditorState,
    ticket: Option<ImportTicket>,
}

impl Drop for PendingImport<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            warn!("Import cancelled after {:?}", ticket.elapsed());
            self.editor.abandon_import(ticket);
        }
    }
}

/// Finish an import started with [`EditorState::begin_import`].
///
/// Use this when the request runs while the editor stays interactive:
/// take a ticket, await [`ImportBridge::fetch`] without holding the
/// editor, then hand both back here.
pub fn apply_import(
    editor: &mut EditorState,
    ticket: ImportTicket,
    result: Result<Vec<SlideDraft>>,
) -> Result<usize> {
    let drafts = match result {
        Ok(drafts) => drafts,
        Err(err) => {
            warn!("Import failed: {err}");
            editor.abandon_import(ticket);
            return Err(err);
        }
    };

    match editor.complete_import(ticket, drafts) {
        ImportOutcome::Applied { slides } => {
            info!("Imported {slides} slides");
            Ok(slides)
        }
        ImportOutcome::Empty => Err(ImportError::NoSlides),
        ImportOutcome::Discarded => Err(ImportError::Discarded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pyramid_core::{Deck, LayoutVariant, SlideField};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Returns canned slides and counts calls.
    struct CannedExtractor {
        slides: Vec<SlideDraft>,
        calls: AtomicUsize,
    }

    impl CannedExtractor {
        fn new(slides: Vec<SlideDraft>) -> Self {
            Self {
                slides,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SlideExtractor for CannedExtractor {
        async fn extract(&self, _request: &ExtractionRequest) -> Result<Vec<SlideDraft>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.slides.clone())
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl SlideExtractor for FailingExtractor {
        async fn extract(&self, _request: &ExtractionRequest) -> Result<Vec<SlideDraft>> {
            Err(ImportError::Transport {
                detail: "connection refused".into(),
            })
        }
    }

    /// Answers only after a long delay.
    struct SlowExtractor;

    #[async_trait]
    impl SlideExtractor for SlowExtractor {
        async fn extract(&self, _request: &ExtractionRequest) -> Result<Vec<SlideDraft>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![SlideDraft::new("Late", "", ["a"])])
        }
    }

    fn edited_editor() -> EditorState {
        let mut editor = EditorState::new();
        editor.deck_mut().update_field(SlideField::Title, "Draft");
        editor.deck_mut().add_slide();
        editor
    }

    #[tokio::test]
    async fn test_import_end_to_end_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"success": true, "slides": [{"title":"T","coreIdea":"C","arguments":["A1: x","A2: y"]}]}"#,
            ))
            .mount(&server)
            .await;

        let bridge =
            ImportBridge::from_config(ImportConfig::new().with_endpoint(server.uri())).unwrap();
        let mut editor = edited_editor();

        let count = bridge.import_from_text(&mut editor, "freeform notes").await.unwrap();

        let deck = editor.deck();
        assert_eq!(count, 1);
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.current().arguments().len(), 2);
        assert_eq!(deck.current_layout(), LayoutVariant::TwoColumns);
        assert!(!editor.is_importing());
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_without_request() {
        let extractor = CannedExtractor::new(vec![SlideDraft::new("T", "", ["a"])]);
        let bridge = ImportBridge::new(extractor);
        let mut editor = edited_editor();
        let before = editor.deck().clone();

        let err = bridge.import_from_text(&mut editor, "   \n").await.unwrap_err();

        assert!(matches!(err, ImportError::EmptyInput));
        assert_eq!(bridge.extractor().calls.load(Ordering::SeqCst), 0);
        assert_eq!(editor.deck(), &before);
        assert!(!editor.is_importing());
    }

    #[tokio::test]
    async fn test_failure_leaves_deck_untouched() {
        let bridge = ImportBridge::new(FailingExtractor);
        let mut editor = edited_editor();
        let before = editor.deck().clone();

        let err = bridge.import_from_text(&mut editor, "notes").await.unwrap_err();

        assert!(matches!(err, ImportError::Transport { .. }));
        assert!(err.is_retryable());
        assert_eq!(editor.deck(), &before);
        assert!(!editor.is_importing());
    }

    #[tokio::test]
    async fn test_second_import_while_pending_is_busy() {
        let bridge = ImportBridge::new(CannedExtractor::new(vec![SlideDraft::new("T", "", ["a"])]));
        let mut editor = edited_editor();

        let ticket = editor.begin_import().unwrap();
        let err = bridge.import_from_text(&mut editor, "notes").await.unwrap_err();
        assert!(matches!(err, ImportError::Busy));
        assert_eq!(bridge.extractor().calls.load(Ordering::SeqCst), 0);

        let result = bridge.fetch("notes").await;
        assert_eq!(apply_import(&mut editor, ticket, result).unwrap(), 1);
        assert_eq!(editor.deck().current().title(), "T");
    }

    #[tokio::test]
    async fn test_response_for_closed_session_is_discarded() {
        let bridge = ImportBridge::new(CannedExtractor::new(vec![SlideDraft::new("New", "", ["a"])]));
        let mut editor = EditorState::with_deck(Deck::new());

        let ticket = editor.begin_import().unwrap();
        let pending = bridge.fetch("notes");
        editor.close();
        let result = pending.await;

        let err = apply_import(&mut editor, ticket, result).unwrap_err();
        assert!(matches!(err, ImportError::Discarded));
        assert_eq!(editor.deck().current().title(), "");
    }

    #[tokio::test]
    async fn test_caller_timeout_releases_import_slot() {
        let bridge = ImportBridge::new(SlowExtractor);
        let mut editor = edited_editor();
        let before = editor.deck().clone();

        let timed_out = tokio::time::timeout(
            Duration::from_millis(50),
            bridge.import_from_text(&mut editor, "notes"),
        )
        .await;

        assert!(timed_out.is_err());
        assert!(!editor.is_importing());
        assert_eq!(editor.deck(), &before);

        let retry = ImportBridge::new(CannedExtractor::new(vec![SlideDraft::new("T", "", ["a"])]));
        assert_eq!(retry.import_from_text(&mut editor, "notes").await.unwrap(), 1);
        assert_eq!(editor.deck().current().title(), "T");
    }
}

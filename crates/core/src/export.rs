//! Standalone HTML export of a single slide.
//!
//! The exporter serializes the same [`Document`] the preview shows into a
//! self-contained page with inlined styles, plus a page marker
//! (`P<position> / <deck length>`) and a suggested filename.

use crate::deck::Deck;
use crate::error::Result;
use crate::render::{Document, Renderer};
use askama::Template;
use log::info;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Characters that are not allowed in file names on common platforms.
static FILENAME_UNSAFE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1F]"#).unwrap());

/// Filename stem used when the slide has no title.
pub const DEFAULT_UNTITLED_FILE: &str = "幻灯片";
/// Page `<title>` used when the slide has no title.
pub const DEFAULT_UNTITLED_DOCUMENT: &str = "未命名幻灯片";

/// Settings for the exported page.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
    /// Filename stem for slides without a title.
    pub untitled_file: String,
    /// Page `<title>` for slides without a title.
    pub untitled_document: String,
    /// Link the Inter web font. Purely cosmetic; the page renders without it.
    pub include_web_font: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            lang: "zh-CN".to_string(),
            untitled_file: DEFAULT_UNTITLED_FILE.to_string(),
            untitled_document: DEFAULT_UNTITLED_DOCUMENT.to_string(),
            include_web_font: true,
        }
    }
}

/// An exported slide ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSlide {
    /// Suggested file name, including the `.html` extension.
    pub filename: String,
    /// The complete HTML page.
    pub html: String,
}

impl ExportedSlide {
    /// Write the page into `dir` under its suggested name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.html)?;
        info!("Exported slide to {}", path.display());
        Ok(path)
    }
}

/// Serializes slides into standalone HTML pages.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    renderer: Renderer,
    options: ExportOptions,
}

impl HtmlExporter {
    /// Create an exporter with default rendering and export settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Export the deck's current slide.
    pub fn export_current(&self, deck: &Deck) -> Result<ExportedSlide> {
        let doc = self.renderer.render_current(deck);
        self.package(deck.current().title(), &doc, deck.current_index() + 1, deck.len())
    }

    /// Export the slide at 0-based `index`.
    pub fn export(&self, deck: &Deck, index: usize) -> Result<ExportedSlide> {
        let slide = deck.get(index)?;
        let doc = self.renderer.render_slide(slide);
        self.package(slide.title(), &doc, index + 1, deck.len())
    }

    fn package(
        &self,
        title: &str,
        doc: &Document,
        position: usize,
        total: usize,
    ) -> Result<ExportedSlide> {
        Ok(ExportedSlide {
            filename: self.suggested_filename(title, position),
            html: self.serialize(title, doc, position, total)?,
        })
    }

    /// Suggested file name: `<title or fallback>_<position>.html`.
    pub fn suggested_filename(&self, title: &str, position: usize) -> String {
        let stem = if title.is_empty() {
            self.options.untitled_file.clone()
        } else {
            let normalized: String = title.nfc().collect();
            FILENAME_UNSAFE_REGEX.replace_all(&normalized, "_").into_owned()
        };
        format!("{}_{}.html", stem, position)
    }

    /// Serialize `doc` into a complete HTML page.
    ///
    /// `title` is the raw slide title, used for the page `<title>`.
    /// `position` is 1-based.
    pub fn serialize(
        &self,
        title: &str,
        doc: &Document,
        position: usize,
        total: usize,
    ) -> Result<String> {
        let page_title = if title.is_empty() {
            self.options.untitled_document.as_str()
        } else {
            title
        };

        let page = SlidePage {
            lang: &self.options.lang,
            page_title,
            include_web_font: self.options.include_web_font,
            doc,
            position,
            total,
        };
        Ok(page.render()?)
    }
}

/// The exported page. User text is HTML-escaped by the template.
#[derive(Template)]
#[template(path = "slide.html")]
struct SlidePage<'a> {
    lang: &'a str,
    page_title: &'a str,
    include_web_font: bool,
    doc: &'a Document,
    position: usize,
    total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SlideDraft, SlideField};

    fn deck(drafts: Vec<SlideDraft>) -> Deck {
        Deck::from_drafts(drafts).unwrap()
    }

    #[test]
    fn test_filename_from_title_and_position() {
        let exporter = HtmlExporter::new();
        assert_eq!(exporter.suggested_filename("Roadmap", 2), "Roadmap_2.html");
        assert_eq!(exporter.suggested_filename("", 1), "幻灯片_1.html");
        assert_eq!(
            exporter.suggested_filename("Q1/Q2: plan?", 3),
            "Q1_Q2_ plan__3.html"
        );
    }

    #[test]
    fn test_filename_is_nfc_normalized() {
        let exporter = HtmlExporter::new();
        // "e" followed by a combining acute accent.
        assert_eq!(exporter.suggested_filename("Cafe\u{301}", 1), "Caf\u{e9}_1.html");
    }

    #[test]
    fn test_export_contains_page_marker_and_content() {
        let mut deck = deck(vec![
            SlideDraft::new("First", "", ["x"]),
            SlideDraft::new("Plan", "Ship it", ["Cost: lower", "Risk: small"]),
        ]);
        deck.set_current_index(1);

        let exported = HtmlExporter::new().export_current(&deck).unwrap();
        assert_eq!(exported.filename, "Plan_2.html");
        assert!(exported.html.starts_with("<!DOCTYPE html>"));
        assert!(exported.html.contains("<title>Plan</title>"));
        assert!(exported.html.contains(r#"<div class="page-number">P2 / 2</div>"#));
        assert!(exported.html.contains(r#"<h1 class="title">Plan</h1>"#));
        assert!(exported.html.contains("<p>Ship it</p>"));
        assert!(exported.html.contains(r#"<div class="arguments two-columns">"#));
        assert!(exported.html.contains("repeat(2, minmax(0, 1fr))"));
        assert!(exported.html.contains("<h4>Cost</h4>"));
        assert!(exported.html.contains("<p> lower</p>"));
        assert!(!exported.html.contains("<script"));
    }

    #[test]
    fn test_export_uses_placeholders() {
        let deck = Deck::new();
        let exported = HtmlExporter::new().export_current(&deck).unwrap();
        assert_eq!(exported.filename, "幻灯片_1.html");
        assert!(exported.html.contains("<title>未命名幻灯片</title>"));
        assert!(exported.html.contains(">未填写标题</h1>"));
        assert!(exported.html.contains("<p>未填写核心观点</p>"));
        assert!(!exported.html.contains("class=\"argument\""));
    }

    #[test]
    fn test_export_escapes_user_text() {
        let mut deck = Deck::new();
        deck.update_field(SlideField::Title, "<script>alert(1)</script>");
        let exported = HtmlExporter::new().export_current(&deck).unwrap();
        assert!(!exported.html.contains("<script>"));
        assert!(exported.html.contains("&lt;script&gt;alert(1)"));
    }

    #[test]
    fn test_export_matches_preview_document() {
        let deck = deck(vec![SlideDraft::new("T", "C", ["A1: x", "plain"])]);
        let exporter = HtmlExporter::new();
        let doc = Renderer::new().render_current(&deck);
        let html = exporter.serialize("T", &doc, 1, 1).unwrap();
        assert_eq!(exporter.export_current(&deck).unwrap().html, html);
        assert_eq!(exporter.export(&deck, 0).unwrap().html, html);
    }

    #[test]
    fn test_export_out_of_range() {
        let deck = Deck::new();
        assert!(HtmlExporter::new().export(&deck, 1).is_err());
    }

    #[test]
    fn test_without_web_font() {
        let exporter = HtmlExporter::new().with_options(ExportOptions {
            include_web_font: false,
            ..ExportOptions::default()
        });
        let html = exporter.export_current(&Deck::new()).unwrap().html;
        assert!(!html.contains("fonts.googleapis.com"));
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exported = HtmlExporter::new()
            .export_current(&deck(vec![SlideDraft::new("Saved", "", ["a"])]))
            .unwrap();
        let path = exported.write_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "Saved_1.html");
        assert_eq!(std::fs::read_to_string(path).unwrap(), exported.html);
    }
}

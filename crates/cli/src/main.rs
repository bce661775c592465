//! CLI for previewing, exporting and importing pyramid slide decks.

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use pyramid_core::{Deck, EditorState, ExportOptions, HtmlExporter, Renderer, SlideDraft};
use pyramid_import::{ImportBridge, ImportConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Preview, export and import pyramid slide decks.
#[derive(Parser, Debug)]
#[command(name = "pyramid")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a text preview of a slide
    Preview(SlideArgs),
    /// Export slides as standalone HTML pages
    Export(ExportArgs),
    /// Turn freeform text into a deck file using the extraction service
    Import(ImportArgs),
}

#[derive(ClapArgs, Debug)]
struct SlideArgs {
    /// Deck file (JSON: a list of slides or {"slides": [...]})
    deck: PathBuf,

    /// 1-based slide number (default: 1)
    #[arg(short, long, default_value = "1")]
    slide: usize,
}

#[derive(ClapArgs, Debug)]
struct ExportArgs {
    /// Deck file (JSON: a list of slides or {"slides": [...]})
    deck: PathBuf,

    /// 1-based slide number to export (default: all slides)
    #[arg(short, long)]
    slide: Option<usize>,

    /// Output directory (default: next to the deck file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the HTML to stdout instead of writing files
    #[arg(short, long)]
    print: bool,

    /// Do not link the web font
    #[arg(long)]
    no_web_font: bool,
}

#[derive(ClapArgs, Debug)]
struct ImportArgs {
    /// Text file to import ("-" reads stdin)
    input: PathBuf,

    /// Extraction endpoint (default: $PYRAMID_IMPORT_URL, then the local service)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Write the deck here instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// On-disk deck formats.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DeckFile {
    Wrapped { slides: Vec<SlideDraft> },
    Bare(Vec<SlideDraft>),
}

#[derive(Debug, Serialize)]
struct DeckFileOut {
    slides: Vec<SlideDraft>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Preview(slide_args) => preview(&slide_args),
        Command::Export(export_args) => export(&export_args, args.verbose),
        Command::Import(import_args) => import(&import_args),
    }
}

/// Print the plain-text rendering of one slide.
fn preview(args: &SlideArgs) -> Result<()> {
    let mut deck = load_deck(&args.deck)?;
    let index = slide_index(&deck, args.slide)?;
    deck.set_current_index(index);

    let doc = Renderer::new().render_current(&deck);
    println!("P{} / {}", index + 1, deck.len());
    print!("{}", doc.to_plain_text());
    Ok(())
}

/// Export one or all slides as HTML.
fn export(args: &ExportArgs, verbose: bool) -> Result<()> {
    let deck = load_deck(&args.deck)?;
    let exporter = HtmlExporter::new().with_options(ExportOptions {
        include_web_font: !args.no_web_font,
        ..ExportOptions::default()
    });

    let indices: Vec<usize> = match args.slide {
        Some(number) => vec![slide_index(&deck, number)?],
        None => (0..deck.len()).collect(),
    };

    let output_dir = get_output_dir(&args.deck, args.output.as_ref());

    for index in indices {
        let exported = exporter.export(&deck, index)?;
        if args.print {
            print!("{}", exported.html);
        } else {
            let path = exported
                .write_to(&output_dir)
                .with_context(|| format!("Failed to write {}", exported.filename))?;
            if verbose {
                eprintln!("Written to: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Send a text file through the extraction service and emit the deck.
fn import(args: &ImportArgs) -> Result<()> {
    let text = read_input(&args.input)?;

    let mut config = ImportConfig::from_env();
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let bridge = ImportBridge::from_config(config)?;
    let mut editor = EditorState::new();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let count = runtime.block_on(bridge.import_from_text(&mut editor, &text))?;
    log::info!("Imported {} slides", count);

    let out = DeckFileOut {
        slides: editor.deck().slides().iter().map(|s| s.to_draft()).collect(),
    };
    let json = serde_json::to_string_pretty(&out)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Imported {} slides into {}", count, path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Read and validate a deck file.
fn load_deck(path: &Path) -> Result<Deck> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_deck(&content).with_context(|| format!("Invalid deck file {}", path.display()))
}

fn parse_deck(content: &str) -> Result<Deck> {
    let drafts = match serde_json::from_str::<DeckFile>(content)? {
        DeckFile::Wrapped { slides } | DeckFile::Bare(slides) => slides,
    };
    Ok(Deck::from_drafts(drafts)?)
}

/// Convert a 1-based slide number into an index.
fn slide_index(deck: &Deck, number: usize) -> Result<usize> {
    if number == 0 || number > deck.len() {
        bail!("Slide {} does not exist (deck has {} slides)", number, deck.len());
    }
    Ok(number - 1)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Determine the directory exported pages go to.
fn get_output_dir(deck_path: &Path, output_dir: Option<&PathBuf>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.clone(),
        None => match deck_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_and_bare_decks() {
        let wrapped = parse_deck(r#"{"slides": [{"title": "A", "coreIdea": "x", "arguments": ["a"]}]}"#)
            .unwrap();
        assert_eq!(wrapped.current().title(), "A");

        let bare = parse_deck(r#"[{"title": "A"}, {"title": "B", "arguments": ["1", "2"]}]"#).unwrap();
        assert_eq!(bare.len(), 2);
        assert_eq!(bare.slides()[0].arguments(), &[""]);
    }

    #[test]
    fn test_parse_empty_deck_fails() {
        assert!(parse_deck("[]").is_err());
        assert!(parse_deck(r#"{"slides": []}"#).is_err());
    }

    #[test]
    fn test_slide_index_bounds() {
        let deck = parse_deck(r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();
        assert_eq!(slide_index(&deck, 1).unwrap(), 0);
        assert_eq!(slide_index(&deck, 2).unwrap(), 1);
        assert!(slide_index(&deck, 0).is_err());
        assert!(slide_index(&deck, 3).is_err());
    }

    #[test]
    fn test_output_dir_defaults_to_deck_parent() {
        assert_eq!(
            get_output_dir(Path::new("decks/talk.json"), None),
            PathBuf::from("decks")
        );
        assert_eq!(get_output_dir(Path::new("talk.json"), None), PathBuf::from("."));
        let out = PathBuf::from("out");
        assert_eq!(get_output_dir(Path::new("talk.json"), Some(&out)), out);
    }

    #[test]
    fn test_export_writes_every_slide() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("talk.json");
        fs::write(
            &deck_path,
            r#"[{"title": "Intro", "coreIdea": "Hi", "arguments": ["a"]}, {"title": "", "arguments": ["x", "y"]}]"#,
        )
        .unwrap();

        let args = ExportArgs {
            deck: deck_path,
            slide: None,
            output: None,
            print: false,
            no_web_font: true,
        };
        export(&args, false).unwrap();

        let first = fs::read_to_string(dir.path().join("Intro_1.html")).unwrap();
        assert!(first.contains("P1 / 2"));
        let second = fs::read_to_string(dir.path().join("幻灯片_2.html")).unwrap();
        assert!(second.contains("two-columns"));
    }
}

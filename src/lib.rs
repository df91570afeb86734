//! # adaptdoc
//!
//! Accessible lesson-resource rendering for Rust.
//!
//! This library parses a small Markdown dialect (headings, paragraphs,
//! lists, tables, quotes, rules, emphasis and LaTeX math) and renders it into
//! accessibility-adapted HTML, Word documents and slide decks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use adaptdoc::{AccessibilityOptions, RenderOptions};
//!
//! fn main() -> adaptdoc::Result<()> {
//!     let markdown = "# Photosynthesis\n\nPlants make **glucose** from light.";
//!
//!     let options = RenderOptions::new()
//!         .with_accessibility(AccessibilityOptions::new().with_dyslexic_font(true));
//!
//!     let html = adaptdoc::to_html(markdown, &options);
//!     let docx = adaptdoc::to_docx(markdown, &options)?;
//!     std::fs::write("photosynthesis.html", html)?;
//!     std::fs::write("photosynthesis.docx", docx)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block parser**: line-oriented Markdown subset into a flat block sequence
//! - **Inline tokenizer**: nested bold/italic emphasis into styled runs
//! - **Math**: `$...$` and `$$...$$` typeset in HTML, bracketed elsewhere
//! - **Accessibility**: dyslexia-friendly font, large text, extra spacing,
//!   cream background
//! - **Targets**: HTML, printable HTML, DOCX, PPTX and JSON
//! - **Filenames**: session counters so repeated downloads never collide

pub mod error;
pub mod export;
pub mod filename;
pub mod math;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    DocxExporter, ExportFormat, Exporter, ExporterRegistry, HtmlExporter, JsonExporter,
    PptxExporter, SourceDocument,
};
pub use filename::FilenamePolicy;
pub use math::{KatexMarkup, MathRenderer};
pub use model::{
    Block, DocumentModel, ListBlock, RunStyle, Slide, SlideModel, StyledRun, TableBlock,
    Typography,
};
pub use parser::{strip_markup, tokenize};
pub use render::{
    AccessibilityOptions, BlockStats, JsonFormat, LearnerCondition, OverflowPolicy,
    RenderOptions, SlideOptions,
};
pub use session::{ExportArtifact, Session};

/// Parse Markdown text into a block sequence.
///
/// Parsing never fails: anything unrecognized becomes paragraph text.
///
/// # Example
///
/// ```
/// use adaptdoc::{parse, Block};
///
/// let blocks = parse("# Title\n\nBody text");
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].heading_level(), Some(1));
/// ```
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Render Markdown to a standalone HTML document.
pub fn to_html(markdown: &str, options: &RenderOptions) -> String {
    render::to_html(markdown, options)
}

/// Render Markdown to a word-processor document model.
pub fn to_document_model(markdown: &str, options: &RenderOptions) -> DocumentModel {
    render::to_document_model(&parse(markdown), options)
}

/// Render Markdown to a slide deck model.
///
/// # Example
///
/// ```
/// use adaptdoc::{to_slide_model, RenderOptions};
///
/// let deck = to_slide_model("# Title\n\n## Part A\n\nText", &RenderOptions::default());
/// assert_eq!(deck.slide_count(), 2);
/// ```
pub fn to_slide_model(markdown: &str, options: &RenderOptions) -> SlideModel {
    render::to_slide_model(&parse(markdown), options)
}

/// Package Markdown as a Word (DOCX) document.
pub fn to_docx(markdown: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    DocxExporter::new().export(&SourceDocument::parse(markdown), options)
}

/// Package Markdown as a PowerPoint (PPTX) presentation.
pub fn to_pptx(markdown: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    PptxExporter::new().export(&SourceDocument::parse(markdown), options)
}

//! Export module providing a plugin architecture for output formats.
//!
//! Every output format is produced by an [`Exporter`]. The
//! [`ExporterRegistry`] maps format keys (`html`, `pdf`, `docx`, `pptx`,
//! `json`) to exporters and dispatches exports by key.
//!
//! # Example
//!
//! ```no_run
//! use adaptdoc::export::{ExporterRegistry, SourceDocument};
//! use adaptdoc::RenderOptions;
//!
//! fn main() -> adaptdoc::Result<()> {
//!     let registry = ExporterRegistry::with_defaults();
//!     let source = SourceDocument::parse("# Fractions\n\nHalf of 4 is 2.");
//!
//!     let bytes = registry.export("docx", &source, &RenderOptions::default())?;
//!     std::fs::write("fractions.docx", bytes)?;
//!     Ok(())
//! }
//! ```

mod docx;
mod html;
mod package;
mod pptx;

pub use docx::DocxExporter;
pub use html::{HtmlExporter, JsonExporter};
pub use pptx::PptxExporter;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Block;
use crate::parser::{first_title, parse, strip_markup};
use crate::render::RenderOptions;

/// Markdown source together with its parsed blocks.
///
/// Exporters that work from Markdown (HTML) read `text`; exporters that work
/// from the block model (DOCX, PPTX, JSON) read `blocks`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// Raw Markdown text
    pub text: String,

    /// Parsed block sequence
    pub blocks: Vec<Block>,
}

impl SourceDocument {
    /// Parse Markdown text.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let blocks = parse(&text);
        Self { text, blocks }
    }

    /// Text of the first level-1 heading, markup stripped.
    pub fn title(&self) -> Option<String> {
        first_title(&self.text)
            .map(|t| strip_markup(&t))
            .filter(|t| !t.trim().is_empty())
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Output formats known to the default registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Standalone HTML document
    Html,

    /// Printable HTML that opens the print dialog
    Pdf,

    /// Word document
    Docx,

    /// PowerPoint presentation
    Pptx,

    /// JSON dump of the block sequence
    Json,
}

impl ExportFormat {
    /// Every format, in registry order.
    pub fn all() -> [ExportFormat; 5] {
        [
            ExportFormat::Html,
            ExportFormat::Pdf,
            ExportFormat::Docx,
            ExportFormat::Pptx,
            ExportFormat::Json,
        ]
    }

    /// Registry key of the format.
    pub fn key(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Pptx => "pptx",
            ExportFormat::Json => "json",
        }
    }

    /// File extension of the produced artifact.
    ///
    /// `Pdf` produces printable HTML, so its artifact is an `.html` file.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "html",
            other => other.key(),
        }
    }

    /// MIME type of the produced artifact.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Html | ExportFormat::Pdf => "text/html",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            ExportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().trim_start_matches('.').to_lowercase();
        ExportFormat::all()
            .into_iter()
            .find(|format| format.key() == key)
            .ok_or_else(|| Error::UnsupportedFormat(s.to_string()))
    }
}

/// Trait for output format exporters.
///
/// Implement this trait to add support for a new output format.
pub trait Exporter: Send + Sync {
    /// Get the name of this exporter.
    fn name(&self) -> &str;

    /// Get the format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Produce the artifact bytes.
    fn export(&self, source: &SourceDocument, options: &RenderOptions) -> Result<Vec<u8>>;

    /// File extension of the artifact.
    fn extension(&self) -> &'static str {
        self.format().extension()
    }

    /// MIME type of the artifact.
    fn mime_type(&self) -> &'static str {
        self.format().mime_type()
    }
}

/// Registry for exporters.
///
/// The registry maps format keys to exporters; lookups are case-insensitive.
pub struct ExporterRegistry {
    exporters: HashMap<String, Arc<dyn Exporter>>,
    by_name: HashMap<String, Arc<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            exporters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the HTML, PDF, DOCX, PPTX and JSON exporters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HtmlExporter::new()));
        registry.register(Arc::new(HtmlExporter::printable()));
        registry.register(Arc::new(DocxExporter::new()));
        registry.register(Arc::new(PptxExporter::new()));
        registry.register(Arc::new(JsonExporter::new()));
        registry
    }

    /// Register an exporter under its format key.
    ///
    /// A later registration for the same key replaces the earlier one.
    pub fn register(&mut self, exporter: Arc<dyn Exporter>) {
        self.exporters
            .insert(exporter.format().key().to_string(), exporter.clone());
        self.by_name
            .insert(exporter.name().to_lowercase(), exporter);
    }

    /// Get an exporter by format key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn Exporter>> {
        self.exporters.get(&normalize_key(key)).cloned()
    }

    /// Get an exporter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn Exporter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if a format key is supported.
    pub fn supports(&self, key: &str) -> bool {
        self.exporters.contains_key(&normalize_key(key))
    }

    /// Get all supported format keys, sorted.
    pub fn formats(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.exporters.keys().map(|s| s.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Export using the exporter registered for `key`.
    pub fn export(
        &self,
        key: &str,
        source: &SourceDocument,
        options: &RenderOptions,
    ) -> Result<Vec<u8>> {
        let exporter = self
            .get(key)
            .ok_or_else(|| Error::UnsupportedFormat(key.to_string()))?;

        exporter.export(source, options)
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ExporterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().trim_start_matches('.').to_lowercase()
}

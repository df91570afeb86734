//! HTML, printable HTML and JSON exporters.

use crate::error::Result;
use crate::render::{to_json, HtmlRenderer, JsonFormat, RenderOptions};

use super::{ExportFormat, Exporter, SourceDocument};

/// Standalone HTML exporter.
///
/// The printable variant backs the `pdf` format: the browser's print dialog
/// turns the page into a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExporter {
    printable: bool,
}

impl HtmlExporter {
    /// Create an exporter for plain standalone HTML.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter for print-on-load HTML.
    pub fn printable() -> Self {
        Self { printable: true }
    }

    /// Whether the output opens the print dialog.
    pub fn is_printable(&self) -> bool {
        self.printable
    }
}

impl Exporter for HtmlExporter {
    fn name(&self) -> &str {
        if self.printable {
            "print"
        } else {
            "html"
        }
    }

    fn format(&self) -> ExportFormat {
        if self.printable {
            ExportFormat::Pdf
        } else {
            ExportFormat::Html
        }
    }

    fn export(&self, source: &SourceDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        let renderer = HtmlRenderer::new(options.clone());
        let html = if self.printable {
            renderer.render_printable(&source.text)
        } else {
            renderer.render_document(&source.text)
        };
        Ok(html.into_bytes())
    }
}

/// JSON dump of the parsed block sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    format: JsonFormat,
}

impl JsonExporter {
    /// Create an exporter producing pretty-printed JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl Exporter for JsonExporter {
    fn name(&self) -> &str {
        "json"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, source: &SourceDocument, _options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(to_json(&source.blocks, self.format)?.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(exporter: &dyn Exporter, text: &str) -> String {
        let bytes = exporter
            .export(&SourceDocument::parse(text), &RenderOptions::default())
            .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_html_exporter() {
        let html = export(&HtmlExporter::new(), "# Plants\n\nLeaves **make** food.");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<strong>make</strong>"));
        assert!(!html.contains("window.print()"));
    }

    #[test]
    fn test_printable_exporter() {
        let exporter = HtmlExporter::printable();
        assert!(exporter.is_printable());
        assert_eq!(exporter.extension(), "html");
        assert!(export(&exporter, "# Plants").contains("window.print()"));
    }

    #[test]
    fn test_json_exporter() {
        let exporter = JsonExporter::new().with_format(JsonFormat::Compact);
        assert_eq!(export(&exporter, "---"), r#"[{"type":"rule"}]"#);
        assert_eq!(exporter.mime_type(), "application/json");
    }
}

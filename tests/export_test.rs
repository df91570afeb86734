//! Integration tests for exporters, the registry and named exports.

use std::io::{Cursor, Read};
use std::sync::Arc;

use adaptdoc::error::Result;
use adaptdoc::{
    to_docx, to_pptx, to_slide_model, AccessibilityOptions, Error, ExportFormat, Exporter,
    ExporterRegistry, RenderOptions, Session, SourceDocument,
};

const LESSON: &str = include_str!("../cli/src/sample.md");

fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

/// Exporter that echoes the source text, for registry tests.
struct EchoExporter;

impl Exporter for EchoExporter {
    fn name(&self) -> &str {
        "echo"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, source: &SourceDocument, _options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(source.text.clone().into_bytes())
    }
}

#[test]
fn test_docx_package_for_sample_lesson() {
    let options = RenderOptions::new().with_accessibility(
        AccessibilityOptions::new()
            .with_dyslexic_font(true)
            .with_cream_background(true),
    );
    let bytes = to_docx(LESSON, &options).unwrap();

    let names = part_names(&bytes);
    for expected in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/numbering.xml",
        "docProps/core.xml",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }

    let document = read_part(&bytes, "word/document.xml");
    assert!(document.contains("Macbeth: Act 1 Scene 1"));
    assert!(document.contains(r#"w:ascii="OpenDyslexic""#));
    assert!(!document.contains(r#"w:ascii="Arial""#));
    assert!(document.contains(r#"w:color="FDF6E3""#));
    assert!(document.contains("[a^2 + b^2 = c^2]"));

    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>Macbeth: Act 1 Scene 1</dc:title>"));
}

#[test]
fn test_pptx_package_matches_slide_model() {
    let options = RenderOptions::default();
    let deck = to_slide_model(LESSON, &options);
    let bytes = to_pptx(LESSON, &options).unwrap();

    let slide_parts = part_names(&bytes)
        .into_iter()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .count();
    assert_eq!(slide_parts, deck.slide_count());
    assert_eq!(deck.slide_count(), 6);

    let title_slide = read_part(&bytes, "ppt/slides/slide1.xml");
    assert!(title_slide.contains(">Macbeth: Act 1 Scene 1</a:t>"));

    let types = read_part(&bytes, "[Content_Types].xml");
    assert!(types.contains("/ppt/slides/slide6.xml"));
}

#[test]
fn test_registry_dispatch() {
    let registry = ExporterRegistry::with_defaults();
    let source = SourceDocument::parse(LESSON);
    let options = RenderOptions::default();

    let printable = registry.export("PDF", &source, &options).unwrap();
    let printable = String::from_utf8(printable).unwrap();
    assert!(printable.contains("window.print()"));

    let json = registry.export("json", &source, &options).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(source.blocks.len()));

    assert!(matches!(
        registry.export("odt", &source, &options),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_registry_custom_exporter_replaces_default() {
    let mut registry = ExporterRegistry::with_defaults();
    registry.register(Arc::new(EchoExporter));

    let source = SourceDocument::parse("# Echo");
    let bytes = registry
        .export("json", &source, &RenderOptions::default())
        .unwrap();
    assert_eq!(bytes, b"# Echo");
    assert!(registry.get_by_name("echo").is_some());
}

#[test]
fn test_session_names_repeated_exports() {
    let session = Session::new();
    let options = RenderOptions::default();
    let lesson = "# Pythagoras Theorem\n\n$$a^2 + b^2 = c^2$$";

    let names: Vec<String> = [ExportFormat::Docx, ExportFormat::Docx, ExportFormat::Pptx]
        .into_iter()
        .map(|format| {
            session
                .export(Some("Maths"), lesson, format, &options)
                .unwrap()
                .filename
        })
        .collect();

    assert_eq!(
        names,
        vec![
            "Maths-Pythagoras-Theorem.docx",
            "Maths-Pythagoras-Theorem-1.docx",
            "Maths-Pythagoras-Theorem-2.pptx",
        ]
    );
}

#[test]
fn test_artifact_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new();
    let artifact = session
        .export(None, LESSON, ExportFormat::Docx, &RenderOptions::default())
        .unwrap();

    let path = dir.path().join(&artifact.filename);
    std::fs::write(&path, &artifact.bytes).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(artifact.filename, "Macbeth-Act-1-Scene-1.docx");
    assert!(part_names(&bytes).contains(&"word/document.xml".to_string()));
}

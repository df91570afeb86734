//! Open Packaging Conventions (OPC) container shared by the DOCX and PPTX
//! packagers.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// XML declaration written at the top of every part.
pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub(crate) const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";

const DEFAULT_COMPRESSION_LEVEL: i64 = 6;

/// Escape text for XML content and attribute values.
pub(crate) fn xml_escape(text: &str) -> String {
    escape(text).into_owned()
}

/// A relationship entry of a `.rels` part.
#[derive(Debug, Clone)]
pub(crate) struct Relationship {
    pub id: String,
    pub kind: String,
    pub target: String,
}

impl Relationship {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            target: target.into(),
        }
    }
}

/// Serialize a relationships part.
pub(crate) fn relationships_xml(relationships: &[Relationship]) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for rel in relationships {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            rel.id,
            rel.kind,
            xml_escape(&rel.target)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Builder for the `[Content_Types].xml` part.
#[derive(Debug, Default)]
pub(crate) struct ContentTypes {
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the content type of one part (`part` starts with `/`).
    pub fn add(&mut self, part: impl Into<String>, content_type: impl Into<String>) {
        self.overrides.push((part.into(), content_type.into()));
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        for (part, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                part, content_type
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}

/// Document properties written to `docProps/core.xml` and `docProps/app.xml`.
#[derive(Debug, Clone)]
pub(crate) struct CoreProperties {
    pub title: Option<String>,
    pub created: DateTime<Utc>,
}

impl CoreProperties {
    pub fn core_xml(&self) -> String {
        let timestamp = self.created.format("%Y-%m-%dT%H:%M:%SZ");
        let title = self
            .title
            .as_deref()
            .map(|t| format!("<dc:title>{}</dc:title>", xml_escape(t)))
            .unwrap_or_default();

        format!(
            r#"{decl}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{title}<dc:creator>adaptdoc</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{ts}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{ts}</dcterms:modified></cp:coreProperties>"#,
            decl = XML_DECLARATION,
            title = title,
            ts = timestamp,
        )
    }

    pub fn app_xml(&self) -> String {
        format!(
            r#"{}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>adaptdoc</Application><AppVersion>{}</AppVersion></Properties>"#,
            XML_DECLARATION,
            app_version()
        )
    }
}

/// `AppVersion` must look like `XX.YYYY`.
fn app_version() -> String {
    let major: u32 = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
    let minor: u32 = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
    format!("{:02}.{:04}", major, minor)
}

/// In-memory zip archive of XML parts.
pub(crate) struct Package {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    parts: usize,
}

impl Package {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(DEFAULT_COMPRESSION_LEVEL)),
            parts: 0,
        }
    }

    /// Add a part to the package.
    pub fn add(&mut self, name: &str, content: &str) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(content.as_bytes())?;
        self.parts += 1;
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.parts == 0 {
            return Err(Error::Package("package has no parts".to_string()));
        }
        let parts = self.parts;
        let cursor = self.zip.finish()?;
        let bytes = cursor.into_inner();
        log::debug!("Packaged {} parts into {} bytes", parts, bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_package_round_trip() {
        let mut package = Package::new();
        package.add("a/b.xml", "<x/>").unwrap();
        let bytes = package.finish().unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive
            .by_name("a/b.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<x/>");
    }

    #[test]
    fn test_empty_package_is_error() {
        assert!(matches!(Package::new().finish(), Err(Error::Package(_))));
    }

    #[test]
    fn test_content_types() {
        let mut types = ContentTypes::new();
        types.add("/word/document.xml", "application/test+xml");
        let xml = types.to_xml();
        assert!(xml.contains(r#"<Override PartName="/word/document.xml" ContentType="application/test+xml"/>"#));
        assert!(xml.contains(r#"Extension="rels""#));
    }

    #[test]
    fn test_core_properties() {
        let created = DateTime::parse_from_rfc3339("2024-03-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let props = CoreProperties {
            title: Some("Fish & Chips".to_string()),
            created,
        };
        let xml = props.core_xml();
        assert!(xml.contains("<dc:title>Fish &amp; Chips</dc:title>"));
        assert!(xml.contains(">2024-03-01T09:30:00Z</dcterms:created>"));
    }

    #[test]
    fn test_relationships() {
        let xml = relationships_xml(&[Relationship::new("rId1", REL_OFFICE_DOCUMENT, "word/document.xml")]);
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="word/document.xml""#));
    }
}

//! Word (DOCX) packager.
//!
//! Writes a [`DocumentModel`] as a WordprocessingML package: document,
//! styles, numbering and settings parts plus core/app properties.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{
    DocCell, DocElement, DocParagraph, DocTable, DocumentModel, StyledRun, Typography,
};
use crate::render::{DocumentRenderer, RenderOptions};

use super::package::{
    relationships_xml, xml_escape, ContentTypes, CoreProperties, Package, Relationship,
    REL_CORE_PROPERTIES, REL_EXTENDED_PROPERTIES, REL_OFFICE_DOCUMENT, XML_DECLARATION,
};
use super::{ExportFormat, Exporter, SourceDocument};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A4 page size and margins (twips).
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
const PAGE_MARGIN: u32 = 1440;
const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * PAGE_MARGIN;

const BULLET_NUM_ID: usize = 1;

/// DOCX exporter.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter {
    created: Option<DateTime<Utc>>,
}

impl DocxExporter {
    /// Create a new exporter stamping packages with the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed creation timestamp.
    pub fn with_timestamp(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Package a document model.
    pub fn package(&self, doc: &DocumentModel) -> Result<Vec<u8>> {
        let numbering = Numbering::collect(doc);
        let props = CoreProperties {
            title: doc.title.clone(),
            created: self.created.unwrap_or_else(Utc::now),
        };

        let mut types = ContentTypes::new();
        types.add(
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        );
        types.add(
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        );
        types.add(
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        );
        types.add(
            "/word/settings.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        );
        types.add(
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        );
        types.add(
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        );

        let mut package = Package::new();
        package.add("[Content_Types].xml", &types.to_xml())?;
        package.add(
            "_rels/.rels",
            &relationships_xml(&[
                Relationship::new("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
                Relationship::new("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
                Relationship::new("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
            ]),
        )?;
        package.add(
            "word/_rels/document.xml.rels",
            &relationships_xml(&[
                Relationship::new(
                    "rId1",
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles",
                    "styles.xml",
                ),
                Relationship::new(
                    "rId2",
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering",
                    "numbering.xml",
                ),
                Relationship::new(
                    "rId3",
                    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings",
                    "settings.xml",
                ),
            ]),
        )?;
        package.add("word/document.xml", &document_xml(doc, &numbering))?;
        package.add("word/styles.xml", &styles_xml(&doc.typography))?;
        package.add("word/numbering.xml", &numbering.to_xml())?;
        package.add("word/settings.xml", &settings_xml())?;
        package.add("docProps/core.xml", &props.core_xml())?;
        package.add("docProps/app.xml", &props.app_xml())?;
        package.finish()
    }
}

impl Exporter for DocxExporter {
    fn name(&self) -> &str {
        "docx"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn export(&self, source: &SourceDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        let doc = DocumentRenderer::new(options.clone()).render(&source.blocks);
        self.package(&doc)
    }
}

/// Numbering instances: one shared bullet list, one per ordered list.
struct Numbering {
    /// `list_index` of each ordered list to (numId, start)
    ordered: BTreeMap<usize, (usize, u32)>,
}

impl Numbering {
    fn collect(doc: &DocumentModel) -> Self {
        let mut ordered = BTreeMap::new();
        for element in &doc.elements {
            if let DocElement::ListItem {
                ordered: true,
                number,
                list_index,
                ..
            } = element
            {
                let next_id = BULLET_NUM_ID + 1 + ordered.len();
                ordered
                    .entry(*list_index)
                    .or_insert((next_id, number.unwrap_or(1)));
            }
        }
        Self { ordered }
    }

    fn num_id(&self, ordered: bool, list_index: usize) -> usize {
        if !ordered {
            return BULLET_NUM_ID;
        }
        self.ordered
            .get(&list_index)
            .map(|(id, _)| *id)
            .unwrap_or(BULLET_NUM_ID)
    }

    fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, W_NS));
        xml.push_str(&abstract_num(0, "bullet", "•"));
        xml.push_str(&abstract_num(1, "decimal", "%1."));
        xml.push_str(&format!(
            r#"<w:num w:numId="{}"><w:abstractNumId w:val="0"/></w:num>"#,
            BULLET_NUM_ID
        ));
        for (num_id, start) in self.ordered.values() {
            xml.push_str(&format!(
                r#"<w:num w:numId="{}"><w:abstractNumId w:val="1"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="{}"/></w:lvlOverride></w:num>"#,
                num_id, start
            ));
        }
        xml.push_str("</w:numbering>");
        xml
    }
}

fn abstract_num(id: usize, format: &str, text: &str) -> String {
    format!(
        r#"<w:abstractNum w:abstractNumId="{id}"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="{format}"/><w:lvlText w:val="{text}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#,
    )
}

fn document_xml(doc: &DocumentModel, numbering: &Numbering) -> String {
    let spacing = doc.typography.line_spacing_240ths();

    let mut body = String::new();
    for element in &doc.elements {
        match element {
            DocElement::Heading { level, runs } => {
                let props = format!(
                    r#"<w:pStyle w:val="Heading{}"/>{}"#,
                    level,
                    spacing_xml(spacing)
                );
                body.push_str(&paragraph_xml(&props, runs));
            }
            DocElement::Paragraph(p) => body.push_str(&doc_paragraph_xml(p, spacing)),
            DocElement::ListItem {
                runs,
                ordered,
                level,
                list_index,
                ..
            } => {
                let props = format!(
                    r#"<w:pStyle w:val="ListParagraph"/><w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>{}"#,
                    level,
                    numbering.num_id(*ordered, *list_index),
                    spacing_xml(spacing)
                );
                body.push_str(&paragraph_xml(&props, runs));
            }
            DocElement::Table(table) => body.push_str(&table_xml(table, spacing)),
            DocElement::Rule {
                glyph,
                count,
                color,
            } => {
                let run = StyledRun {
                    text: glyph.to_string().repeat(*count),
                    color: Some(color.clone()),
                    ..Default::default()
                };
                let props = format!(r#"{}<w:jc w:val="center"/>"#, spacing_xml(spacing));
                body.push_str(&paragraph_xml(&props, &[run]));
            }
        }
    }

    let background = if doc.typography.has_background() {
        format!(r#"<w:background w:color="{}"/>"#, doc.typography.background)
    } else {
        String::new()
    };

    format!(
        r#"{decl}<w:document xmlns:w="{w}" xmlns:r="{r}">{background}<w:body>{body}<w:sectPr><w:pgSz w:w="{pw}" w:h="{ph}"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
        decl = XML_DECLARATION,
        w = W_NS,
        r = R_NS,
        background = background,
        body = body,
        pw = PAGE_WIDTH,
        ph = PAGE_HEIGHT,
        m = PAGE_MARGIN,
    )
}

fn spacing_xml(line: u32) -> String {
    format!(r#"<w:spacing w:line="{}" w:lineRule="auto"/>"#, line)
}

fn doc_paragraph_xml(p: &DocParagraph, spacing: u32) -> String {
    let mut props = spacing_xml(spacing);
    if p.indent > 0 {
        props.push_str(&format!(r#"<w:ind w:left="{}"/>"#, p.indent));
    }
    paragraph_xml(&props, &p.runs)
}

fn paragraph_xml(props: &str, runs: &[StyledRun]) -> String {
    let mut xml = format!("<w:p><w:pPr>{}</w:pPr>", props);
    for run in runs {
        xml.push_str(&run_xml(run));
    }
    xml.push_str("</w:p>");
    xml
}

fn run_xml(run: &StyledRun) -> String {
    let mut props = String::new();
    if let Some(font) = &run.font_family {
        let font = xml_escape(font);
        props.push_str(&format!(
            r#"<w:rFonts w:ascii="{f}" w:hAnsi="{f}" w:cs="{f}"/>"#,
            f = font
        ));
    }
    if run.bold {
        props.push_str("<w:b/>");
    }
    if run.italic {
        props.push_str("<w:i/>");
    }
    if let Some(color) = &run.color {
        props.push_str(&format!(r#"<w:color w:val="{}"/>"#, color));
    }
    if let Some(size) = run.font_size {
        let half_points = Typography::half_points(size);
        props.push_str(&format!(
            r#"<w:sz w:val="{hp}"/><w:szCs w:val="{hp}"/>"#,
            hp = half_points
        ));
    }

    format!(
        r#"<w:r><w:rPr>{}</w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        props,
        xml_escape(&run.text)
    )
}

fn table_xml(table: &DocTable, spacing: u32) -> String {
    let columns = table.column_count().max(1);
    let column_width = TEXT_WIDTH / columns as u32;

    let mut xml = String::from("<w:tbl><w:tblPr>");
    xml.push_str(r#"<w:tblW w:w="5000" w:type="pct"/><w:tblBorders>"#);
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        xml.push_str(&format!(
            r#"<w:{} w:val="single" w:sz="4" w:space="0" w:color="999999"/>"#,
            side
        ));
    }
    xml.push_str("</w:tblBorders></w:tblPr><w:tblGrid>");
    for _ in 0..columns {
        xml.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, column_width));
    }
    xml.push_str("</w:tblGrid>");

    xml.push_str("<w:tr><w:trPr><w:tblHeader/></w:trPr>");
    for cell in &table.header {
        xml.push_str(&cell_xml(cell, column_width, spacing));
    }
    xml.push_str("</w:tr>");

    for row in &table.rows {
        xml.push_str("<w:tr>");
        for cell in row {
            xml.push_str(&cell_xml(cell, column_width, spacing));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

fn cell_xml(cell: &DocCell, width: u32, spacing: u32) -> String {
    let shading = cell
        .shading
        .as_deref()
        .map(|fill| format!(r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#, fill))
        .unwrap_or_default();

    format!(
        r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/>{}</w:tcPr>{}</w:tc>"#,
        width,
        shading,
        paragraph_xml(&spacing_xml(spacing), &cell.runs)
    )
}

fn styles_xml(typography: &Typography) -> String {
    let font = xml_escape(&typography.font_family);
    let size = Typography::half_points(typography.font_size);
    let spacing = typography.line_spacing_240ths();

    let heading = |level: u8, outline: u8| {
        format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/></w:rPr></w:style>"#,
        )
    };

    format!(
        r#"{decl}<w:styles xmlns:w="{w}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}" w:eastAsia="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/><w:lang w:val="en-GB"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="{spacing}" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>{h1}{h2}{h3}<w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:ind w:left="720"/></w:pPr></w:style><w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblCellMar><w:top w:w="60" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="60" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style></w:styles>"#,
        decl = XML_DECLARATION,
        w = W_NS,
        font = font,
        size = size,
        spacing = spacing,
        h1 = heading(1, 0),
        h2 = heading(2, 1),
        h3 = heading(3, 2),
    )
}

fn settings_xml() -> String {
    format!(
        r#"{}<w:settings xmlns:w="{}"><w:displayBackgroundShape/><w:defaultTabStop w:val="720"/><w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#,
        XML_DECLARATION, W_NS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use std::io::{Cursor, Read};

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    fn export(source: &str, options: &RenderOptions) -> Vec<u8> {
        DocxExporter::new()
            .export(&SourceDocument::parse(source), options)
            .unwrap()
    }

    #[test]
    fn test_package_parts() {
        let bytes = export("# Title\n\nBody", &RenderOptions::default());
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<_> = archive.file_names().collect();

        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/numbering.xml",
            "word/settings.xml",
            "word/_rels/document.xml.rels",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_runs_and_escaping() {
        let bytes = export("**Fish & chips** <now>", &RenderOptions::default());
        let doc = part(&bytes, "word/document.xml");
        assert!(doc.contains("<w:b/>"));
        assert!(doc.contains(">Fish &amp; chips</w:t>"));
        assert!(doc.contains("&lt;now&gt;"));
        assert!(doc.contains(r#"<w:spacing w:line="384" w:lineRule="auto"/>"#));
    }

    #[test]
    fn test_ordered_lists_restart() {
        let bytes = export("1. a\n2. b\n\n- x\n\n5. c", &RenderOptions::default());
        let numbering = part(&bytes, "word/numbering.xml");
        assert!(numbering.contains(r#"<w:num w:numId="2"><w:abstractNumId w:val="1"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/>"#));
        assert!(numbering.contains(r#"<w:num w:numId="3"><w:abstractNumId w:val="1"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="5"/>"#));

        let doc = part(&bytes, "word/document.xml");
        assert_eq!(doc.matches(r#"<w:numId w:val="2"/>"#).count(), 2);
        assert_eq!(doc.matches(r#"<w:numId w:val="1"/>"#).count(), 1);
        assert_eq!(doc.matches(r#"<w:numId w:val="3"/>"#).count(), 1);
    }

    #[test]
    fn test_table_and_background() {
        let options = RenderOptions::new().with_accessibility(
            crate::render::AccessibilityOptions::new()
                .with_cream_background(true)
                .with_extra_spacing(true)
                .with_dyslexic_font(true),
        );
        let bytes = export("| A | B |\n|---|---|\n| 1 | 2 |", &options);
        let doc = part(&bytes, "word/document.xml");
        assert!(doc.contains(r#"<w:background w:color="FDF6E3"/>"#));
        assert!(doc.contains(r#"w:fill="808080""#));
        assert!(doc.contains("<w:tblHeader/>"));
        assert_eq!(doc.matches("<w:tc>").count(), 4);
        assert!(doc.contains(r#"w:ascii="OpenDyslexic""#));

        let styles = part(&bytes, "word/styles.xml");
        assert!(styles.contains(r#"w:ascii="OpenDyslexic""#));
        assert!(styles.contains(r#"w:line="480""#));
    }

    #[test]
    fn test_only_divider_is_centered() {
        let bytes = export("Intro\n\n---\n\n> quoted", &RenderOptions::default());
        let doc = part(&bytes, "word/document.xml");
        assert_eq!(doc.matches(r#"<w:jc w:val="center"/>"#).count(), 1);
        assert!(doc.contains(&"─".repeat(40)));
        assert!(doc.contains(r#"<w:ind w:left="720"/>"#));
    }

    #[test]
    fn test_fixed_timestamp() {
        let created = DateTime::parse_from_rfc3339("2025-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let doc = DocumentRenderer::default().render(&parse("# Dated"));
        let bytes = DocxExporter::new().with_timestamp(created).package(&doc).unwrap();
        let core = part(&bytes, "docProps/core.xml");
        assert!(core.contains("2025-01-02T03:04:05Z"));
        assert!(core.contains("<dc:title>Dated</dc:title>"));
    }
}

//! PowerPoint (PPTX) packager.
//!
//! Writes a [`SlideModel`] as a PresentationML package with one master, one
//! blank layout and a theme. Every content item becomes its own shape at the
//! position the slide renderer assigned to it.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::{
    Slide, SlideContent, SlideItem, SlideKind, SlideModel, StyledRun, TextGrid, Typography,
};
use crate::render::{
    document_title, RenderOptions, SlideRenderer, CONTENT_LEFT, CONTENT_WIDTH, HEADER_SHADING,
    HEADER_TEXT_COLOR, SECTION_TITLE_HEIGHT, SECTION_TITLE_Y, TITLE_HEIGHT, TITLE_Y,
};

use super::package::{
    relationships_xml, xml_escape, ContentTypes, CoreProperties, Package, Relationship,
    REL_CORE_PROPERTIES, REL_EXTENDED_PROPERTIES, REL_OFFICE_DOCUMENT, XML_DECLARATION,
};
use super::{ExportFormat, Exporter, SourceDocument};

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const EMU_PER_INCH: f32 = 914_400.0;

/// Bullet/number hanging indent (EMU).
const LIST_INDENT: i64 = 342_900;

/// Quote left margin (EMU).
const QUOTE_INDENT: i64 = 457_200;

const BORDER_COLOR: &str = "999999";

fn emu(inches: f32) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// PPTX exporter.
#[derive(Debug, Clone, Default)]
pub struct PptxExporter {
    created: Option<DateTime<Utc>>,
}

impl PptxExporter {
    /// Create a new exporter stamping packages with the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed creation timestamp.
    pub fn with_timestamp(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Package a slide model.
    pub fn package(&self, deck: &SlideModel, title: Option<&str>) -> Result<Vec<u8>> {
        let props = CoreProperties {
            title: title.map(str::to_string),
            created: self.created.unwrap_or_else(Utc::now),
        };

        let mut types = ContentTypes::new();
        types.add(
            "/ppt/presentation.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        );
        types.add(
            "/ppt/slideMasters/slideMaster1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml",
        );
        types.add(
            "/ppt/slideLayouts/slideLayout1.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml",
        );
        types.add(
            "/ppt/theme/theme1.xml",
            "application/vnd.openxmlformats-officedocument.theme+xml",
        );
        types.add(
            "/ppt/presProps.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml",
        );
        types.add(
            "/ppt/viewProps.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml",
        );
        types.add(
            "/ppt/tableStyles.xml",
            "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml",
        );
        for n in 1..=deck.slides.len() {
            types.add(
                format!("/ppt/slides/slide{}.xml", n),
                "application/vnd.openxmlformats-officedocument.presentationml.slide+xml",
            );
        }
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
                Relationship::new("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
                Relationship::new("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
                Relationship::new("rId3", REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
            ]),
        )?;
        package.add("ppt/presentation.xml", &presentation_xml(deck))?;
        package.add(
            "ppt/_rels/presentation.xml.rels",
            &relationships_xml(&presentation_relationships(deck.slides.len())),
        )?;
        package.add("ppt/slideMasters/slideMaster1.xml", &master_xml())?;
        package.add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &relationships_xml(&[
                Relationship::new(
                    "rId1",
                    format!("{}/slideLayout", REL_BASE),
                    "../slideLayouts/slideLayout1.xml",
                ),
                Relationship::new("rId2", format!("{}/theme", REL_BASE), "../theme/theme1.xml"),
            ]),
        )?;
        package.add("ppt/slideLayouts/slideLayout1.xml", &layout_xml())?;
        package.add(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &relationships_xml(&[Relationship::new(
                "rId1",
                format!("{}/slideMaster", REL_BASE),
                "../slideMasters/slideMaster1.xml",
            )]),
        )?;
        package.add("ppt/theme/theme1.xml", &theme_xml(&deck.typography))?;
        package.add(
            "ppt/presProps.xml",
            &format!("{}<p:presentationPr {}/>", XML_DECLARATION, NS),
        )?;
        package.add(
            "ppt/viewProps.xml",
            &format!("{}<p:viewPr {}/>", XML_DECLARATION, NS),
        )?;
        package.add(
            "ppt/tableStyles.xml",
            &format!(
                r#"{}<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
                XML_DECLARATION
            ),
        )?;

        for (i, slide) in deck.slides.iter().enumerate() {
            let n = i + 1;
            package.add(
                &format!("ppt/slides/slide{}.xml", n),
                &slide_xml(slide, &deck.typography),
            )?;
            package.add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", n),
                &relationships_xml(&[Relationship::new(
                    "rId1",
                    format!("{}/slideLayout", REL_BASE),
                    "../slideLayouts/slideLayout1.xml",
                )]),
            )?;
        }

        package.add("docProps/core.xml", &props.core_xml())?;
        package.add("docProps/app.xml", &props.app_xml())?;
        package.finish()
    }
}

impl Exporter for PptxExporter {
    fn name(&self) -> &str {
        "pptx"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Pptx
    }

    fn export(&self, source: &SourceDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        let deck = SlideRenderer::new(options.clone()).render(&source.blocks);
        let title = options
            .title
            .clone()
            .or_else(|| document_title(&source.blocks));
        self.package(&deck, title.as_deref())
    }
}

fn presentation_relationships(slide_count: usize) -> Vec<Relationship> {
    let mut rels = vec![Relationship::new(
        "rId1",
        format!("{}/slideMaster", REL_BASE),
        "slideMasters/slideMaster1.xml",
    )];
    for n in 1..=slide_count {
        rels.push(Relationship::new(
            format!("rId{}", n + 1),
            format!("{}/slide", REL_BASE),
            format!("slides/slide{}.xml", n),
        ));
    }
    let next = slide_count + 2;
    for (offset, (kind, target)) in [
        ("presProps", "presProps.xml"),
        ("viewProps", "viewProps.xml"),
        ("theme", "theme/theme1.xml"),
        ("tableStyles", "tableStyles.xml"),
    ]
    .into_iter()
    .enumerate()
    {
        rels.push(Relationship::new(
            format!("rId{}", next + offset),
            format!("{}/{}", REL_BASE, kind),
            target,
        ));
    }
    rels
}

fn presentation_xml(deck: &SlideModel) -> String {
    let slide_ids: String = (0..deck.slides.len())
        .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 2))
        .collect();

    format!(
        r#"{decl}<p:presentation {ns} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{ids}</p:sldIdLst><p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        decl = XML_DECLARATION,
        ns = NS,
        ids = slide_ids,
        cx = emu(deck.width),
        cy = emu(deck.height),
    )
}

const GROUP_PROPS: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

fn master_xml() -> String {
    format!(
        r#"{decl}<p:sldMaster {ns}><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{group}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#,
        decl = XML_DECLARATION,
        ns = NS,
        group = GROUP_PROPS,
    )
}

fn layout_xml() -> String {
    format!(
        r#"{decl}<p:sldLayout {ns} type="blank" preserve="1"><p:cSld name="Blank"><p:spTree>{group}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        decl = XML_DECLARATION,
        ns = NS,
        group = GROUP_PROPS,
    )
}

fn theme_xml(typography: &Typography) -> String {
    let font = xml_escape(&typography.font_family);
    let phclr_fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let fills = phclr_fill.repeat(3);
    let lines = format!(r#"<a:ln w="6350">{}</a:ln>"#, phclr_fill).repeat(3);
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);

    format!(
        r#"{decl}<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="adaptdoc"><a:themeElements><a:clrScheme name="adaptdoc"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1E3D52"/></a:dk2><a:lt2><a:srgbClr val="FDF6E3"/></a:lt2><a:accent1><a:srgbClr val="2D5A7B"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="adaptdoc"><a:majorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="adaptdoc"><a:fillStyleLst>{fills}</a:fillStyleLst><a:lnStyleLst>{lines}</a:lnStyleLst><a:effectStyleLst>{effects}</a:effectStyleLst><a:bgFillStyleLst>{fills}</a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#,
        decl = XML_DECLARATION,
        font = font,
        fills = fills,
        lines = lines,
        effects = effects,
    )
}

/// Sequential shape ids within one slide.
struct ShapeIds(u32);

impl ShapeIds {
    fn next(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }
}

fn slide_xml(slide: &Slide, typography: &Typography) -> String {
    let mut ids = ShapeIds(1);
    let mut shapes = String::new();

    if let Some(title) = &slide.title {
        let (y, height, align) = match slide.kind {
            SlideKind::Title => (TITLE_Y, TITLE_HEIGHT, "ctr"),
            SlideKind::Section | SlideKind::Placeholder => {
                (SECTION_TITLE_Y, SECTION_TITLE_HEIGHT, "l")
            }
        };
        let frame = Frame::new(CONTENT_LEFT, y, CONTENT_WIDTH, height);
        let paragraph = paragraph_xml(title, &ParagraphProps::aligned(align), typography);
        shapes.push_str(&text_box(ids.next(), "Title", &frame, "ctr", &paragraph));
    }

    for item in &slide.items {
        shapes.push_str(&item_xml(item, &mut ids, typography));
    }

    format!(
        r#"{decl}<p:sld {ns}><p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="{bg}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg><p:spTree>{group}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        decl = XML_DECLARATION,
        ns = NS,
        bg = slide.background,
        group = GROUP_PROPS,
        shapes = shapes,
    )
}

fn item_xml(item: &SlideItem, ids: &mut ShapeIds, typography: &Typography) -> String {
    let frame = Frame::new(CONTENT_LEFT, item.y, CONTENT_WIDTH, item.height);
    let id = ids.next();

    let paragraph = match &item.content {
        SlideContent::Paragraph { runs } | SlideContent::SubHeading { runs } => {
            paragraph_xml(runs, &ParagraphProps::default(), typography)
        }
        SlideContent::Quote { runs } => {
            let props = ParagraphProps {
                margin_left: QUOTE_INDENT,
                ..Default::default()
            };
            paragraph_xml(runs, &props, typography)
        }
        SlideContent::ListItem {
            runs,
            ordered,
            number,
        } => {
            let bullet = match (ordered, number) {
                (true, Some(n)) => Bullet::Number(*n),
                (true, None) => Bullet::Number(1),
                (false, _) => Bullet::Char,
            };
            let props = ParagraphProps {
                margin_left: LIST_INDENT,
                indent: -LIST_INDENT,
                bullet,
                ..Default::default()
            };
            paragraph_xml(runs, &props, typography)
        }
        SlideContent::Table(grid) => return table_xml(id, grid, &frame, typography),
    };

    let name = format!("{} {}", item.content.kind(), id);
    text_box(id, &name, &frame, "t", &paragraph)
}

/// Shape position and size in inches.
struct Frame {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Frame {
    fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn xfrm(&self, prefix: &str) -> String {
        format!(
            r#"<{p}:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{p}:xfrm>"#,
            emu(self.x),
            emu(self.y),
            emu(self.width),
            emu(self.height),
            p = prefix,
        )
    }
}

fn text_box(id: u32, name: &str, frame: &Frame, anchor: &str, paragraphs: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square" lIns="0" tIns="0" rIns="0" bIns="0" anchor="{anchor}"><a:normAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#,
        id = id,
        name = xml_escape(name),
        xfrm = frame.xfrm("a"),
        anchor = anchor,
        paragraphs = paragraphs,
    )
}

#[derive(Debug, Clone, Copy, Default)]
enum Bullet {
    #[default]
    None,
    Char,
    Number(u32),
}

#[derive(Debug, Clone, Default)]
struct ParagraphProps {
    align: Option<&'static str>,
    margin_left: i64,
    indent: i64,
    bullet: Bullet,
}

impl ParagraphProps {
    fn aligned(align: &'static str) -> Self {
        Self {
            align: Some(align),
            ..Default::default()
        }
    }
}

fn paragraph_xml(runs: &[StyledRun], props: &ParagraphProps, typography: &Typography) -> String {
    let mut attrs = String::new();
    if let Some(align) = props.align {
        attrs.push_str(&format!(r#" algn="{}""#, align));
    }
    if props.margin_left != 0 {
        attrs.push_str(&format!(r#" marL="{}""#, props.margin_left));
    }
    if props.indent != 0 {
        attrs.push_str(&format!(r#" indent="{}""#, props.indent));
    }

    let line_spacing = (typography.line_spacing * 100_000.0).round() as u32;
    let font = xml_escape(&typography.font_family);
    let bullet = match props.bullet {
        Bullet::None => "<a:buNone/>".to_string(),
        Bullet::Char => format!(r#"<a:buFont typeface="{}"/><a:buChar char="•"/>"#, font),
        Bullet::Number(start) => format!(
            r#"<a:buFont typeface="{}"/><a:buAutoNum type="arabicPeriod" startAt="{}"/>"#,
            font, start
        ),
    };

    let runs: String = runs.iter().map(run_xml).collect();
    format!(
        r#"<a:p><a:pPr{attrs}><a:lnSpc><a:spcPct val="{line_spacing}"/></a:lnSpc>{bullet}</a:pPr>{runs}<a:endParaRPr lang="en-GB" dirty="0"/></a:p>"#,
    )
}

fn run_xml(run: &StyledRun) -> String {
    let mut attrs = String::from(r#" lang="en-GB""#);
    if let Some(size) = run.font_size {
        attrs.push_str(&format!(r#" sz="{}""#, (size * 100.0).round() as u32));
    }
    if run.bold {
        attrs.push_str(r#" b="1""#);
    }
    if run.italic {
        attrs.push_str(r#" i="1""#);
    }
    attrs.push_str(r#" dirty="0""#);

    let mut children = String::new();
    if let Some(color) = &run.color {
        children.push_str(&format!(
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            color
        ));
    }
    if let Some(font) = &run.font_family {
        let font = xml_escape(font);
        children.push_str(&format!(
            r#"<a:latin typeface="{f}"/><a:cs typeface="{f}"/>"#,
            f = font
        ));
    }

    format!(
        r#"<a:r><a:rPr{}>{}</a:rPr><a:t>{}</a:t></a:r>"#,
        attrs,
        children,
        xml_escape(&run.text)
    )
}

fn table_xml(id: u32, grid: &TextGrid, frame: &Frame, typography: &Typography) -> String {
    let row_height = emu(grid.row_height);
    let grid_cols: String = grid
        .column_widths
        .iter()
        .map(|w| format!(r#"<a:gridCol w="{}"/>"#, emu(*w)))
        .collect();

    let header_run = |text: &str| StyledRun {
        text: text.to_string(),
        bold: true,
        font_family: Some(typography.font_family.clone()),
        font_size: Some(typography.font_size),
        color: Some(HEADER_TEXT_COLOR.to_string()),
        ..Default::default()
    };
    let body_run = |text: &str| StyledRun {
        text: text.to_string(),
        font_family: Some(typography.font_family.clone()),
        font_size: Some(typography.font_size),
        ..Default::default()
    };

    let mut rows = format!(r#"<a:tr h="{}">"#, row_height);
    for header in &grid.headers {
        rows.push_str(&table_cell(&header_run(header.as_str()), Some(HEADER_SHADING), typography));
    }
    rows.push_str("</a:tr>");
    for row in &grid.rows {
        rows.push_str(&format!(r#"<a:tr h="{}">"#, row_height));
        for cell in row {
            rows.push_str(&table_cell(&body_run(cell.as_str()), None, typography));
        }
        rows.push_str("</a:tr>");
    }

    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="table {id}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>{xfrm}<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>{cols}</a:tblGrid>{rows}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
        id = id,
        xfrm = frame.xfrm("p"),
        cols = grid_cols,
        rows = rows,
    )
}

fn table_cell(run: &StyledRun, fill: Option<&str>, typography: &Typography) -> String {
    let border = |side: &str| {
        format!(
            r#"<a:{side} w="6350"><a:solidFill><a:srgbClr val="{BORDER_COLOR}"/></a:solidFill></a:{side}>"#,
        )
    };
    let fill = match fill {
        Some(color) => format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, color),
        None => "<a:noFill/>".to_string(),
    };

    format!(
        r#"<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>{}</a:txBody><a:tcPr>{}{}{}{}{}</a:tcPr></a:tc>"#,
        paragraph_xml(std::slice::from_ref(run), &ParagraphProps::default(), typography),
        border("lnL"),
        border("lnR"),
        border("lnT"),
        border("lnB"),
        fill
    )
}

#[cfg(test)]
mod tests {
    use super::*;
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
        PptxExporter::new()
            .export(&SourceDocument::parse(source), options)
            .unwrap()
    }

    #[test]
    fn test_emu() {
        assert_eq!(emu(10.0), 9_144_000);
        assert_eq!(emu(5.625), 5_143_500);
    }

    #[test]
    fn test_one_part_per_slide() {
        let bytes = export(
            "# Title\n\n## Section A\n\nSome text\n\n## Section B\n\nMore text",
            &RenderOptions::default(),
        );

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let slides = archive
            .file_names()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .count();
        assert_eq!(slides, 3);

        let presentation = part(&bytes, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 3);
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));

        let rels = part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Target="slides/slide3.xml""#));
        assert!(rels.contains(r#"Id="rId5""#));

        let second = part(&bytes, "ppt/slides/slide2.xml");
        assert!(second.contains(">Section A</a:t>"));
        assert!(second.contains(">Some text</a:t>"));
    }

    #[test]
    fn test_list_bullets_and_numbers() {
        let bytes = export("## L\n\n- dot\n\n4. four", &RenderOptions::default());
        let slide = part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains(r#"<a:buChar char="•"/>"#));
        assert!(slide.contains(r#"<a:buAutoNum type="arabicPeriod" startAt="4"/>"#));
    }

    #[test]
    fn test_table_and_background() {
        let options = RenderOptions::new().with_accessibility(
            crate::render::AccessibilityOptions::new().with_cream_background(true),
        );
        let bytes = export("## T\n\n| A | B |\n|---|---|\n| 1 | 2 |", &options);
        let slide = part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains(r#"<a:srgbClr val="FDF6E3"/>"#));
        assert!(slide.contains("<a:tbl>"));
        assert_eq!(slide.matches("<a:tc>").count(), 4);
        assert_eq!(slide.matches(r#"<a:gridCol w="4114800"/>"#).count(), 2);
        assert!(slide.contains(r#"<a:srgbClr val="808080"/>"#));
    }

    #[test]
    fn test_placeholder_deck() {
        let bytes = export("", &RenderOptions::default());
        let slide = part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains(">Adapted Resource</a:t>"));
        assert!(slide.contains("Tip: start slides with # or ## headings."));
    }
}

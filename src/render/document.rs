//! Document renderer: blocks to the word-processor document model.

use crate::model::{
    Block, DocCell, DocElement, DocParagraph, DocTable, DocumentModel, ListBlock, RunStyle,
    TableBlock, Typography,
};
use crate::parser::{strip_markup, tokenize};

use super::RenderOptions;

/// Level-1 heading color.
pub const H1_COLOR: &str = "1E3D52";

/// Level-2 heading color.
pub const H2_COLOR: &str = "2D5A7B";

/// Table header shading.
pub const HEADER_SHADING: &str = "808080";

/// Table header text color.
pub const HEADER_TEXT_COLOR: &str = "FFFFFF";

/// Quote indent in twips (0.5in).
pub const QUOTE_INDENT: u32 = 720;

/// Glyph repeated to draw a divider.
pub const RULE_GLYPH: char = '─';

/// Number of divider glyphs.
pub const RULE_LENGTH: usize = 40;

/// Divider color.
pub const RULE_COLOR: &str = "999999";

/// Maps a block sequence to a [`DocumentModel`].
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
}

impl DocumentRenderer {
    /// Create a new document renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render blocks into a document model.
    pub fn render(&self, blocks: &[Block]) -> DocumentModel {
        let typography = self.options.typography();
        let base = base_style(&typography);
        let base_size = typography.font_size;

        let mut doc = DocumentModel::new(typography);
        doc.title = self.options.title.clone().or_else(|| document_title(blocks));

        let mut list_index = 0;
        for block in blocks {
            match block {
                Block::Heading { level, text } => {
                    doc.push(heading(*level, text, &base, base_size));
                }
                Block::Paragraph { text } => {
                    doc.push(DocElement::Paragraph(DocParagraph::new(tokenize(text, &base))));
                }
                Block::List(list) => {
                    push_list(&mut doc, list, list_index, &base);
                    list_index += 1;
                }
                Block::Table(table) => {
                    doc.push(DocElement::Table(table_element(table, &base)));
                    doc.push(DocElement::Paragraph(DocParagraph::spacer()));
                }
                Block::Quote { text } => {
                    let runs = tokenize(text, &base.clone().italic());
                    doc.push(DocElement::Paragraph(
                        DocParagraph::new(runs).indented(QUOTE_INDENT),
                    ));
                }
                Block::Rule => doc.push(DocElement::Rule {
                    glyph: RULE_GLYPH,
                    count: RULE_LENGTH,
                    color: RULE_COLOR.to_string(),
                }),
            }
        }

        log::debug!(
            "Rendered {} blocks into {} document elements",
            blocks.len(),
            doc.elements.len()
        );
        doc
    }
}

/// Render blocks into a document model.
pub fn to_document_model(blocks: &[Block], options: &RenderOptions) -> DocumentModel {
    DocumentRenderer::new(options.clone()).render(blocks)
}

/// Text of the first level-1 heading, markup stripped.
pub(crate) fn document_title(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|block| match block {
        Block::Heading { level: 1, text } => {
            Some(strip_markup(text)).filter(|t| !t.trim().is_empty())
        }
        _ => None,
    })
}

fn base_style(typography: &Typography) -> RunStyle {
    RunStyle::new()
        .with_font(typography.font_family.clone())
        .with_size(typography.font_size)
}

fn heading(level: u8, text: &str, base: &RunStyle, base_size: f32) -> DocElement {
    let mut style = base.clone();
    match level {
        1 => {
            style = style.with_size(base_size + 8.0).with_color(H1_COLOR).bold();
        }
        2 => {
            style = style.with_size(base_size + 4.0).with_color(H2_COLOR);
        }
        _ => {
            style = style.with_size(base_size + 2.0);
        }
    }

    DocElement::Heading {
        level,
        runs: tokenize(text, &style),
    }
}

fn push_list(doc: &mut DocumentModel, list: &ListBlock, list_index: usize, base: &RunStyle) {
    for (i, item) in list.items.iter().enumerate() {
        doc.push(DocElement::ListItem {
            runs: tokenize(item, base),
            ordered: list.ordered,
            level: 0,
            number: list.number_at(i),
            list_index,
        });
    }
}

fn table_element(table: &TableBlock, base: &RunStyle) -> DocTable {
    let header_style = base.clone().with_color(HEADER_TEXT_COLOR).bold();

    DocTable {
        header: table
            .headers
            .iter()
            .map(|text| DocCell::new(tokenize(text, &header_style)).shaded(HEADER_SHADING))
            .collect(),
        rows: table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|text| DocCell::new(tokenize(text, base)))
                    .collect()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::render::AccessibilityOptions;

    fn render(source: &str) -> DocumentModel {
        to_document_model(&parse(source), &RenderOptions::default())
    }

    #[test]
    fn test_heading_styles() {
        let doc = render("# Big\n## Mid\n### Small");

        let DocElement::Heading { level, runs } = &doc.elements[0] else {
            panic!("Expected heading");
        };
        assert_eq!(*level, 1);
        assert!(runs[0].bold);
        assert_eq!(runs[0].font_size, Some(20.0));
        assert_eq!(runs[0].color.as_deref(), Some(H1_COLOR));

        let DocElement::Heading { runs, .. } = &doc.elements[1] else {
            panic!("Expected heading");
        };
        assert_eq!(runs[0].font_size, Some(16.0));
        assert_eq!(runs[0].color.as_deref(), Some(H2_COLOR));

        let DocElement::Heading { runs, .. } = &doc.elements[2] else {
            panic!("Expected heading");
        };
        assert_eq!(runs[0].font_size, Some(14.0));
        assert_eq!(runs[0].color, None);
        assert_eq!(doc.title.as_deref(), Some("Big"));
    }

    #[test]
    fn test_quote_is_italic_and_indented() {
        let doc = render("> Fair is foul");
        let DocElement::Paragraph(p) = &doc.elements[0] else {
            panic!("Expected paragraph");
        };
        assert_eq!(p.indent, QUOTE_INDENT);
        assert!(p.runs.iter().all(|r| r.italic));
    }

    #[test]
    fn test_table_header_and_spacer() {
        let doc = render("| Word | Meaning |\n|---|---|\n| heath | open land |");
        assert_eq!(doc.elements.len(), 2);

        let DocElement::Table(table) = &doc.elements[0] else {
            panic!("Expected table");
        };
        assert_eq!(table.column_count(), 2);
        let header = &table.header[0];
        assert_eq!(header.shading.as_deref(), Some(HEADER_SHADING));
        assert!(header.runs[0].bold);
        assert_eq!(header.runs[0].color.as_deref(), Some(HEADER_TEXT_COLOR));
        assert_eq!(table.rows[0][1].runs[0].text, "open land");

        assert!(matches!(&doc.elements[1], DocElement::Paragraph(p) if p.is_spacer()));
    }

    #[test]
    fn test_list_items_carry_numbering() {
        let doc = render("- a\n- b\n\n3. c\n4. d");
        let items: Vec<_> = doc
            .elements
            .iter()
            .map(|e| match e {
                DocElement::ListItem {
                    ordered,
                    number,
                    list_index,
                    level,
                    ..
                } => (*ordered, *number, *list_index, *level),
                other => panic!("Expected list item, got {:?}", other),
            })
            .collect();

        assert_eq!(
            items,
            vec![
                (false, None, 0, 0),
                (false, None, 0, 0),
                (true, Some(3), 1, 0),
                (true, Some(4), 1, 0),
            ]
        );
    }

    #[test]
    fn test_rule_divider() {
        let doc = render("---");
        assert_eq!(
            doc.elements,
            vec![DocElement::Rule {
                glyph: '─',
                count: 40,
                color: RULE_COLOR.to_string()
            }]
        );
    }

    #[test]
    fn test_typography_applies_to_every_run() {
        let source = "# T\n\nText **bold**\n\n- item\n\n| H |\n|---|\n| v |\n\n> q";
        let options = RenderOptions::new().with_accessibility(
            AccessibilityOptions::new()
                .with_dyslexic_font(true)
                .with_large_text(true),
        );
        let doc = to_document_model(&parse(source), &options);

        assert_eq!(doc.typography.font_family, "OpenDyslexic");
        assert!(doc.runs().count() > 5);
        assert!(doc
            .runs()
            .all(|r| r.font_family.as_deref() == Some("OpenDyslexic")));
    }

    #[test]
    fn test_title_override() {
        let options = RenderOptions::new().with_title("Custom");
        let doc = to_document_model(&parse("# Heading"), &options);
        assert_eq!(doc.title.as_deref(), Some("Custom"));
        assert_eq!(render("## Only section").title, None);
    }
}

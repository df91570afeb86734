//! Word-processor document model.

use super::StyledRun;
use serde::{Deserialize, Serialize};

/// A word-processor style document ready for packaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Document title (first level-1 heading, if any)
    pub title: Option<String>,

    /// Typography applied to every element
    pub typography: Typography,

    /// Elements in reading order
    pub elements: Vec<DocElement>,
}

impl DocumentModel {
    /// Create an empty document with the given typography.
    pub fn new(typography: Typography) -> Self {
        Self {
            title: None,
            typography,
            elements: Vec::new(),
        }
    }

    /// Add an element.
    pub fn push(&mut self, element: DocElement) {
        self.elements.push(element);
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over every styled run in the document, table cells included.
    pub fn runs(&self) -> impl Iterator<Item = &StyledRun> {
        self.elements.iter().flat_map(|element| element.runs())
    }
}

/// A single document element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocElement {
    /// A heading
    Heading {
        /// Heading level (1-3)
        level: u8,
        /// Heading content
        runs: Vec<StyledRun>,
    },

    /// A body paragraph, quotation or spacer
    Paragraph(DocParagraph),

    /// One item of a list
    ListItem {
        /// Item content
        runs: Vec<StyledRun>,
        /// Numbered (true) or bulleted (false)
        ordered: bool,
        /// Nesting level (always 0: nested lists are not supported)
        level: u8,
        /// Item number for numbered lists
        number: Option<u32>,
        /// Index of the source list within the document, used to restart numbering
        list_index: usize,
    },

    /// A table with a styled header row
    Table(DocTable),

    /// A decorative divider line
    Rule {
        /// Glyph repeated across the line
        glyph: char,
        /// Number of repetitions
        count: usize,
        /// Glyph color (hex without `#`)
        color: String,
    },
}

impl DocElement {
    /// Iterate over the styled runs of this element.
    pub fn runs(&self) -> Box<dyn Iterator<Item = &StyledRun> + '_> {
        match self {
            DocElement::Heading { runs, .. } | DocElement::ListItem { runs, .. } => {
                Box::new(runs.iter())
            }
            DocElement::Paragraph(p) => Box::new(p.runs.iter()),
            DocElement::Table(t) => Box::new(
                t.header
                    .iter()
                    .chain(t.rows.iter().flatten())
                    .flat_map(|cell| cell.runs.iter()),
            ),
            DocElement::Rule { .. } => Box::new(std::iter::empty()),
        }
    }
}

/// A paragraph with layout properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocParagraph {
    /// Paragraph content (empty for spacers)
    pub runs: Vec<StyledRun>,

    /// Left indent in twips (1/1440 inch)
    pub indent: u32,
}

impl DocParagraph {
    /// Create an unindented paragraph.
    pub fn new(runs: Vec<StyledRun>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Create an empty spacer paragraph.
    pub fn spacer() -> Self {
        Self::default()
    }

    /// Set the left indent and return self.
    pub fn indented(mut self, twips: u32) -> Self {
        self.indent = twips;
        self
    }

    /// Check if this paragraph has no text.
    pub fn is_spacer(&self) -> bool {
        self.runs.iter().all(|r| r.is_empty())
    }
}

/// A table in the document model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocTable {
    /// Header cells
    pub header: Vec<DocCell>,

    /// Data rows
    pub rows: Vec<Vec<DocCell>>,
}

impl DocTable {
    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocCell {
    /// Cell content
    pub runs: Vec<StyledRun>,

    /// Background shading (hex without `#`)
    pub shading: Option<String>,
}

impl DocCell {
    /// Create an unshaded cell.
    pub fn new(runs: Vec<StyledRun>) -> Self {
        Self {
            runs,
            shading: None,
        }
    }

    /// Set the shading and return self.
    pub fn shaded(mut self, color: impl Into<String>) -> Self {
        self.shading = Some(color.into());
        self
    }
}

/// Concrete presentation values resolved from accessibility options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Font family name for DOCX/PPTX runs
    pub font_family: String,

    /// CSS font stack for HTML output
    pub css_font_stack: String,

    /// Base font size in points
    pub font_size: f32,

    /// Line spacing multiplier (1.0 = single)
    pub line_spacing: f32,

    /// CSS letter spacing, if widened
    pub letter_spacing: Option<String>,

    /// Page/slide background (hex without `#`)
    pub background: String,
}

impl Typography {
    /// Line spacing in 240ths of a line, as used by WordprocessingML.
    pub fn line_spacing_240ths(&self) -> u32 {
        (self.line_spacing * 240.0).round() as u32
    }

    /// Font size in half-points, as used by WordprocessingML.
    pub fn half_points(size: f32) -> u32 {
        (size * 2.0).round() as u32
    }

    /// Whether the background differs from plain white.
    pub fn has_background(&self) -> bool {
        !self.background.eq_ignore_ascii_case("FFFFFF")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typography() -> Typography {
        Typography {
            font_family: "Arial".to_string(),
            css_font_stack: "Arial, sans-serif".to_string(),
            font_size: 12.0,
            line_spacing: 1.6,
            letter_spacing: None,
            background: "FFFFFF".to_string(),
        }
    }

    #[test]
    fn test_line_spacing_units() {
        let t = typography();
        assert_eq!(t.line_spacing_240ths(), 384);
        assert_eq!(Typography::half_points(14.0), 28);
        assert!(!t.has_background());
    }

    #[test]
    fn test_runs_include_table_cells() {
        let mut doc = DocumentModel::new(typography());
        doc.push(DocElement::Heading {
            level: 1,
            runs: vec![StyledRun::new("Title")],
        });
        doc.push(DocElement::Table(DocTable {
            header: vec![DocCell::new(vec![StyledRun::new("H")])],
            rows: vec![vec![DocCell::new(vec![StyledRun::new("V")])]],
        }));
        doc.push(DocElement::Paragraph(DocParagraph::spacer()));

        let texts: Vec<_> = doc.runs().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Title", "H", "V"]);
    }
}

//! Block-level types produced by the block parser.

use serde::{Deserialize, Serialize};

/// A structural unit of parsed Markdown.
///
/// The variant set is closed: every renderer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `#`, `##` or `###` heading
    Heading {
        /// Heading level (1-3)
        level: u8,
        /// Heading text with inline markup still present
        text: String,
    },

    /// A single line of body text
    Paragraph {
        /// Paragraph text with inline markup still present
        text: String,
    },

    /// A run of consecutive list items of one ordering type
    List(ListBlock),

    /// A pipe table
    Table(TableBlock),

    /// A `>` quotation line
    Quote {
        /// Quoted text
        text: String,
    },

    /// A horizontal divider
    Rule,
}

impl Block {
    /// Create a heading block, clamping the level into 1-3.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    /// Create a quote block.
    pub fn quote(text: impl Into<String>) -> Self {
        Block::Quote { text: text.into() }
    }

    /// Short name of the block kind, used in logs and statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::List(_) => "list",
            Block::Table(_) => "table",
            Block::Quote { .. } => "quote",
            Block::Rule => "rule",
        }
    }

    /// Get the heading level if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Reproduce the block as dialect source text.
    ///
    /// Re-parsing the output yields the same block.
    pub fn to_source(&self) -> String {
        match self {
            Block::Heading { level, text } => {
                format!("{} {}", "#".repeat(*level as usize), text)
            }
            Block::Paragraph { text } => text.clone(),
            Block::List(list) => list.to_source(),
            Block::Table(table) => table.to_source(),
            Block::Quote { text } => format!("> {}", text),
            Block::Rule => "---".to_string(),
        }
    }

    /// Get the literal text carried by the block (no structural markers).
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } | Block::Quote { text } => {
                text.clone()
            }
            Block::List(list) => list.items.join("\n"),
            Block::Table(table) => table.plain_text(),
            Block::Rule => String::new(),
        }
    }
}

/// A list of items sharing one ordering type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    /// Whether the list is numbered
    pub ordered: bool,

    /// Number of the first item (1 for bulleted lists)
    pub start: u32,

    /// Item texts, never empty
    pub items: Vec<String>,
}

impl ListBlock {
    /// Create a bulleted list.
    pub fn bulleted<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        Self {
            ordered: false,
            start: 1,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a numbered list whose first item carries `start`.
    pub fn numbered<S: Into<String>>(start: u32, items: impl IntoIterator<Item = S>) -> Self {
        Self {
            ordered: true,
            start,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Number shown for the item at `index` (ordered lists only).
    pub fn number_at(&self, index: usize) -> Option<u32> {
        self.ordered
            .then(|| self.start.saturating_add(index as u32))
    }

    fn to_source(&self) -> String {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| match self.number_at(i) {
                Some(n) => format!("{}. {}", n, item),
                None => format!("- {}", item),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table with one header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Header cells
    pub headers: Vec<String>,

    /// Data rows, each with exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Create a table with the given header and no rows.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a data row, padding or truncating it to the header width.
    ///
    /// Returns `true` if the row had to be repaired.
    pub fn push_row(&mut self, mut cells: Vec<String>) -> bool {
        let width = self.headers.len();
        let repaired = cells.len() != width;
        cells.resize(width, String::new());
        self.rows.push(cells);
        repaired
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get plain text representation of the table (tab-separated).
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_source(&self) -> String {
        let row = |cells: &[String]| format!("| {} |", cells.join(" | "));
        let mut lines = vec![row(&self.headers)];
        lines.push(format!(
            "|{}|",
            vec!["---"; self.headers.len()].join("|")
        ));
        lines.extend(self.rows.iter().map(|r| row(r)));
        lines.join("\n")
    }
}

//! Block statistics.

use serde::{Deserialize, Serialize};

use crate::model::Block;

/// Statistics collected over a parsed block sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStats {
    /// Total number of blocks
    pub block_count: u32,

    /// Number of headings, by level (1, 2, 3)
    pub heading_counts: [u32; 3],

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of list blocks
    pub list_count: u32,

    /// Number of list items across all lists
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of table data rows across all tables
    pub table_row_count: u32,

    /// Number of quotes
    pub quote_count: u32,

    /// Number of horizontal rules
    pub horizontal_rule_count: u32,

    /// Number of math spans (display and inline)
    pub math_span_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl BlockStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a block sequence.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let mut stats = Self::new();
        for block in blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Count one block.
    pub fn add_block(&mut self, block: &Block) {
        self.block_count += 1;
        match block {
            Block::Heading { level, .. } => {
                let index = usize::from((*level).clamp(1, 3) - 1);
                self.heading_counts[index] += 1;
            }
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::List(list) => {
                self.list_count += 1;
                self.list_item_count += list.items.len() as u32;
            }
            Block::Table(table) => {
                self.table_count += 1;
                self.table_row_count += table.row_count() as u32;
            }
            Block::Quote { .. } => self.quote_count += 1,
            Block::Rule => self.horizontal_rule_count += 1,
        }

        let text = block.plain_text();
        self.math_span_count += crate::math::find_math_spans(&text).len() as u32;
        self.count_text(&text);
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total heading count.
    pub fn heading_count(&self) -> u32 {
        self.heading_counts.iter().sum()
    }

    /// Number of slides the slide renderer starts from headings (levels 1 and 2).
    pub fn slide_heading_count(&self) -> u32 {
        self.heading_counts[0] + self.heading_counts[1]
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &BlockStats) {
        self.block_count += other.block_count;
        for (mine, theirs) in self.heading_counts.iter_mut().zip(other.heading_counts) {
            *mine += theirs;
        }
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.quote_count += other.quote_count;
        self.horizontal_rule_count += other.horizontal_rule_count;
        self.math_span_count += other.math_span_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

//! Slide-deck model.

use super::{StyledRun, Typography};
use serde::{Deserialize, Serialize};

/// Slide width in inches (16:9).
pub const SLIDE_WIDTH: f32 = 10.0;

/// Slide height in inches (16:9).
pub const SLIDE_HEIGHT: f32 = 5.625;

/// A slide deck ready for packaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideModel {
    /// Typography applied to every slide
    pub typography: Typography,

    /// Slide width in inches
    pub width: f32,

    /// Slide height in inches
    pub height: f32,

    /// Slides in order, never empty once rendered
    pub slides: Vec<Slide>,
}

impl SlideModel {
    /// Create an empty 16:9 deck.
    pub fn new(typography: Typography) -> Self {
        Self {
            typography,
            width: SLIDE_WIDTH,
            height: SLIDE_HEIGHT,
            slides: Vec::new(),
        }
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Get a slide by index (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }
}

/// Where a slide came from, which decides how its title is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    /// Opened by a level-1 heading: large centered title
    Title,
    /// Opened by a level-2 heading (or untitled leading content): title at top
    Section,
    /// The deck had no headings at all
    Placeholder,
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Layout kind
    pub kind: SlideKind,

    /// Title runs, if the slide has a title
    pub title: Option<Vec<StyledRun>>,

    /// Background color (hex without `#`)
    pub background: String,

    /// Content items, top to bottom
    pub items: Vec<SlideItem>,

    /// Whether this slide continues an overflowing predecessor
    pub continued: bool,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(kind: SlideKind, title: Option<Vec<StyledRun>>, background: impl Into<String>) -> Self {
        Self {
            kind,
            title,
            background: background.into(),
            items: Vec::new(),
            continued: false,
        }
    }

    /// Title as plain text.
    pub fn title_text(&self) -> Option<String> {
        self.title.as_deref().map(super::runs_text)
    }

    /// Check if the slide has no content items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A content item with its vertical placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideItem {
    /// What is drawn
    pub content: SlideContent,

    /// Top offset from the slide edge, in inches
    pub y: f32,

    /// Height reserved for the item, in inches
    pub height: f32,
}

/// Content kinds that can appear on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideContent {
    /// Body text
    Paragraph {
        /// Text runs
        runs: Vec<StyledRun>,
    },

    /// One bulleted or numbered item
    ListItem {
        /// Text runs
        runs: Vec<StyledRun>,
        /// Numbered (true) or bulleted (false)
        ordered: bool,
        /// Item number for numbered lists
        number: Option<u32>,
    },

    /// Quoted text
    Quote {
        /// Text runs
        runs: Vec<StyledRun>,
    },

    /// A level-3 heading inside the slide flow
    SubHeading {
        /// Text runs
        runs: Vec<StyledRun>,
    },

    /// A table laid out as a text grid
    Table(TextGrid),
}

impl SlideContent {
    /// Short name of the content kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SlideContent::Paragraph { .. } => "paragraph",
            SlideContent::ListItem { .. } => "list_item",
            SlideContent::Quote { .. } => "quote",
            SlideContent::SubHeading { .. } => "sub_heading",
            SlideContent::Table(_) => "table",
        }
    }

    /// Plain text of the item (tables tab-separated).
    pub fn plain_text(&self) -> String {
        match self {
            SlideContent::Paragraph { runs }
            | SlideContent::ListItem { runs, .. }
            | SlideContent::Quote { runs }
            | SlideContent::SubHeading { runs } => super::runs_text(runs),
            SlideContent::Table(grid) => std::iter::once(&grid.headers)
                .chain(grid.rows.iter())
                .map(|row| row.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// A two-dimensional grid of plain text cells sized to a given width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGrid {
    /// Header cells
    pub headers: Vec<String>,

    /// Data rows
    pub rows: Vec<Vec<String>>,

    /// Column widths in inches, summing to the grid width
    pub column_widths: Vec<f32>,

    /// Height of every row in inches
    pub row_height: f32,
}

impl TextGrid {
    /// Lay out `headers` and `rows` with equal columns over `width` inches.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, width: f32, row_height: f32) -> Self {
        let columns = headers.len().max(1);
        let column_widths = vec![width / columns as f32; headers.len()];
        Self {
            headers,
            rows,
            column_widths,
            row_height,
        }
    }

    /// Total grid width in inches.
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    /// Number of rows including the header.
    pub fn total_rows(&self) -> usize {
        self.rows.len() + 1
    }
}

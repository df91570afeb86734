//! Styled text runs produced by the inline span tokenizer.

use serde::{Deserialize, Serialize};

/// A contiguous span of text sharing one combination of styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    /// The text content, markup stripped
    pub text: String,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Font family inherited from the block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Font size in points inherited from the block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Text color (hex without `#`, e.g. "1E3D52")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl StyledRun {
    /// Create a plain run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a run with `style` applied.
    pub fn styled(text: impl Into<String>, style: &RunStyle) -> Self {
        Self {
            text: text.into(),
            bold: style.bold,
            italic: style.italic,
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            color: style.color.clone(),
        }
    }

    /// Get the styling of this run without its text.
    pub fn style(&self) -> RunStyle {
        RunStyle {
            bold: self.bold,
            italic: self.italic,
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            color: self.color.clone(),
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Base styling merged into every run of a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Font family
    pub font_family: Option<String>,

    /// Font size in points
    pub font_size: Option<f32>,

    /// Text color (hex without `#`)
    pub color: Option<String>,
}

impl RunStyle {
    /// Create an empty style (plain text, inherited font).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family.
    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Set the font size in points.
    pub fn with_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Force bold on.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Force italic on.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Combine emphasis flags with this style.
    pub fn emphasized(&self, bold: bool, italic: bool) -> Self {
        Self {
            bold: self.bold || bold,
            italic: self.italic || italic,
            ..self.clone()
        }
    }
}

/// Concatenate the text of a run sequence, ignoring styling.
pub fn runs_text(runs: &[StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

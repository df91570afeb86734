//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

use crate::model::Typography;

/// Font family used when the dyslexia-friendly font is requested.
pub const DYSLEXIC_FONT: &str = "OpenDyslexic";

/// Font family used otherwise.
pub const DEFAULT_FONT: &str = "Arial";

/// Cream background color (hex without `#`).
pub const CREAM_BACKGROUND: &str = "FDF6E3";

/// Plain background color (hex without `#`).
pub const WHITE_BACKGROUND: &str = "FFFFFF";

/// User-selected presentation options applied uniformly to a render target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilityOptions {
    /// Use a dyslexia-friendly font family
    pub dyslexic_friendly_font: bool,

    /// Use the larger base font size (14pt instead of 12pt)
    pub large_text: bool,

    /// Use wider line (and, in HTML, letter) spacing
    pub extra_line_spacing: bool,

    /// Use a cream page/slide background
    pub cream_background: bool,
}

impl AccessibilityOptions {
    /// Create options with everything switched off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options suggested for a learner profile.
    ///
    /// Dyslexia enables the dyslexic font, cream background and extra
    /// spacing; visual processing needs enable cream background and extra
    /// spacing.
    pub fn for_conditions(conditions: &[LearnerCondition]) -> Self {
        let mut options = Self::default();
        for condition in conditions {
            match condition {
                LearnerCondition::Dyslexia => {
                    options.dyslexic_friendly_font = true;
                    options.cream_background = true;
                    options.extra_line_spacing = true;
                }
                LearnerCondition::VisualProcessing => {
                    options.cream_background = true;
                    options.extra_line_spacing = true;
                }
                LearnerCondition::Autism
                | LearnerCondition::Adhd
                | LearnerCondition::Dyscalculia
                | LearnerCondition::Eal => {}
            }
        }
        options
    }

    /// Enable or disable the dyslexia-friendly font.
    pub fn with_dyslexic_font(mut self, enabled: bool) -> Self {
        self.dyslexic_friendly_font = enabled;
        self
    }

    /// Enable or disable large text.
    pub fn with_large_text(mut self, enabled: bool) -> Self {
        self.large_text = enabled;
        self
    }

    /// Enable or disable extra spacing.
    pub fn with_extra_spacing(mut self, enabled: bool) -> Self {
        self.extra_line_spacing = enabled;
        self
    }

    /// Enable or disable the cream background.
    pub fn with_cream_background(mut self, enabled: bool) -> Self {
        self.cream_background = enabled;
        self
    }

    /// Combine two option sets; an option is on if either side has it on.
    pub fn union(self, other: Self) -> Self {
        Self {
            dyslexic_friendly_font: self.dyslexic_friendly_font || other.dyslexic_friendly_font,
            large_text: self.large_text || other.large_text,
            extra_line_spacing: self.extra_line_spacing || other.extra_line_spacing,
            cream_background: self.cream_background || other.cream_background,
        }
    }

    /// Resolve the options into concrete typography values.
    pub fn typography(&self) -> Typography {
        let (font_family, css_font_stack) = if self.dyslexic_friendly_font {
            (DYSLEXIC_FONT, "'OpenDyslexic', 'Comic Sans MS', sans-serif")
        } else {
            (DEFAULT_FONT, "Arial, sans-serif")
        };

        Typography {
            font_family: font_family.to_string(),
            css_font_stack: css_font_stack.to_string(),
            font_size: if self.large_text { 14.0 } else { 12.0 },
            line_spacing: if self.extra_line_spacing { 2.0 } else { 1.6 },
            letter_spacing: self.extra_line_spacing.then(|| "0.05em".to_string()),
            background: if self.cream_background {
                CREAM_BACKGROUND
            } else {
                WHITE_BACKGROUND
            }
            .to_string(),
        }
    }
}

/// Learner needs recorded in a class profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerCondition {
    /// Autism spectrum
    Autism,
    /// ADHD
    Adhd,
    /// Dyslexia
    Dyslexia,
    /// Dyscalculia
    Dyscalculia,
    /// Visual processing difficulties
    VisualProcessing,
    /// English as an additional language
    Eal,
}

impl std::str::FromStr for LearnerCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "autism" => Ok(Self::Autism),
            "adhd" => Ok(Self::Adhd),
            "dyslexia" => Ok(Self::Dyslexia),
            "dyscalculia" => Ok(Self::Dyscalculia),
            "visual_processing" => Ok(Self::VisualProcessing),
            "eal" => Ok(Self::Eal),
            other => Err(format!("Unknown learner condition: {}", other)),
        }
    }
}

/// What the slide renderer does with content that does not fit on a slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Drop the remaining content of the section
    #[default]
    Drop,
    /// Move the remaining content to a continuation slide
    Continue,
}

/// Slide rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideOptions {
    /// Overflow handling
    pub overflow: OverflowPolicy,
}

/// Options for rendering a block sequence.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Accessibility options
    pub accessibility: AccessibilityOptions,

    /// Slide options
    pub slides: SlideOptions,

    /// Title override (otherwise the first level-1 heading)
    pub title: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set accessibility options.
    pub fn with_accessibility(mut self, accessibility: AccessibilityOptions) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Set the slide overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.slides.overflow = overflow;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Resolved typography.
    pub fn typography(&self) -> Typography {
        self.accessibility.typography()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_typography() {
        let t = AccessibilityOptions::default().typography();
        assert_eq!(t.font_family, DEFAULT_FONT);
        assert_eq!(t.font_size, 12.0);
        assert_eq!(t.line_spacing, 1.6);
        assert_eq!(t.letter_spacing, None);
        assert_eq!(t.background, WHITE_BACKGROUND);
    }

    #[test]
    fn test_accessible_typography() {
        let t = AccessibilityOptions::new()
            .with_dyslexic_font(true)
            .with_large_text(true)
            .with_extra_spacing(true)
            .with_cream_background(true)
            .typography();
        assert_eq!(t.font_family, DYSLEXIC_FONT);
        assert!(t.css_font_stack.contains("OpenDyslexic"));
        assert_eq!(t.font_size, 14.0);
        assert_eq!(t.line_spacing, 2.0);
        assert_eq!(t.letter_spacing.as_deref(), Some("0.05em"));
        assert_eq!(t.background, CREAM_BACKGROUND);
    }

    #[test]
    fn test_for_conditions() {
        let dyslexia = AccessibilityOptions::for_conditions(&[LearnerCondition::Dyslexia]);
        assert!(dyslexia.dyslexic_friendly_font);
        assert!(dyslexia.cream_background);
        assert!(dyslexia.extra_line_spacing);
        assert!(!dyslexia.large_text);

        let visual = AccessibilityOptions::for_conditions(&[
            LearnerCondition::Autism,
            LearnerCondition::VisualProcessing,
        ]);
        assert!(!visual.dyslexic_friendly_font);
        assert!(visual.cream_background);

        assert_eq!(
            AccessibilityOptions::for_conditions(&[LearnerCondition::Adhd]),
            AccessibilityOptions::default()
        );
    }

    #[test]
    fn test_options_json_keys() {
        let options: AccessibilityOptions =
            serde_json::from_str(r#"{"dyslexicFriendlyFont": true, "unknown": 1}"#).unwrap();
        assert!(options.dyslexic_friendly_font);
        assert!(!options.large_text);

        let empty: AccessibilityOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AccessibilityOptions::default());
    }

    #[test]
    fn test_condition_from_str() {
        assert_eq!(
            "visual-processing".parse::<LearnerCondition>(),
            Ok(LearnerCondition::VisualProcessing)
        );
        assert!("unknown".parse::<LearnerCondition>().is_err());
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_overflow(OverflowPolicy::Continue)
            .with_title("Lesson");
        assert_eq!(options.slides.overflow, OverflowPolicy::Continue);
        assert_eq!(options.title.as_deref(), Some("Lesson"));
    }
}

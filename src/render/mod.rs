//! Rendering module for projecting parsed blocks into output models.

mod document;
mod html;
mod json;
mod options;
mod slides;
mod stats;

pub use document::{
    to_document_model, DocumentRenderer, H1_COLOR, H2_COLOR, HEADER_SHADING, HEADER_TEXT_COLOR,
    QUOTE_INDENT, RULE_COLOR, RULE_GLYPH, RULE_LENGTH,
};
pub(crate) use document::document_title;
pub use html::{to_html, to_html_fragment, HtmlRenderer, DEFAULT_TITLE};
pub use json::{model_to_json, to_json, JsonFormat};
pub use options::{
    AccessibilityOptions, LearnerCondition, OverflowPolicy, RenderOptions, SlideOptions,
    CREAM_BACKGROUND, DEFAULT_FONT, DYSLEXIC_FONT, WHITE_BACKGROUND,
};
pub use slides::{
    content_top, to_slide_model, SlideRenderer, CONTENT_BOTTOM, CONTENT_LEFT, CONTENT_WIDTH,
    PLACEHOLDER_HINT, PLACEHOLDER_TITLE, SECTION_CONTENT_TOP, SECTION_TITLE_HEIGHT,
    SECTION_TITLE_Y, TITLE_CONTENT_TOP, TITLE_HEIGHT, TITLE_Y,
};
pub use stats::BlockStats;

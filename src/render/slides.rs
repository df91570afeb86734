//! Slide renderer: blocks to the slide-deck model.
//!
//! Level-1 headings open title slides and level-2 headings open section
//! slides; everything else flows into the open slide. Each content item has
//! an estimated height and the running total is checked against the usable
//! height of the slide, with the overflow policy deciding what happens to
//! content past the bottom edge.

use crate::model::{
    Block, RunStyle, Slide, SlideContent, SlideItem, SlideKind, SlideModel, StyledRun, TextGrid,
    Typography,
};
use crate::parser::{strip_markup, tokenize};

use super::{OverflowPolicy, RenderOptions};

/// Title of the slide produced when the source has no slide headings.
pub const PLACEHOLDER_TITLE: &str = "Adapted Resource";

/// Hint shown on the placeholder slide.
pub const PLACEHOLDER_HINT: &str = "Tip: start slides with # or ## headings.";

/// Left edge of the content area (inches).
pub const CONTENT_LEFT: f32 = 0.5;

/// Width of the content area (inches).
pub const CONTENT_WIDTH: f32 = 9.0;

/// Section title box top (inches).
pub const SECTION_TITLE_Y: f32 = 0.4;

/// Section title box height (inches).
pub const SECTION_TITLE_HEIGHT: f32 = 0.9;

/// Title slide title box top (inches).
pub const TITLE_Y: f32 = 1.9;

/// Title slide title box height (inches).
pub const TITLE_HEIGHT: f32 = 1.2;

/// First content offset on section and placeholder slides (inches).
pub const SECTION_CONTENT_TOP: f32 = 1.4;

/// First content offset on title slides (inches).
pub const TITLE_CONTENT_TOP: f32 = 3.3;

/// Content must end above this offset (inches).
pub const CONTENT_BOTTOM: f32 = 5.3;

const PARAGRAPH_COST: f32 = 0.5;
const LIST_ITEM_COST: f32 = 0.4;
const QUOTE_COST: f32 = 0.6;
const SUB_HEADING_COST: f32 = 0.5;
const TABLE_ROW_COST: f32 = 0.35;

const CONTINUED_SUFFIX: &str = " (cont.)";

/// Maps a block sequence to a [`SlideModel`].
#[derive(Debug, Clone, Default)]
pub struct SlideRenderer {
    options: RenderOptions,
}

impl SlideRenderer {
    /// Create a new slide renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render blocks into a slide model. Never produces zero slides.
    pub fn render(&self, blocks: &[Block]) -> SlideModel {
        let mut deck = Deck::new(self.options.typography(), self.options.slides.overflow);

        let has_slide_headings = blocks
            .iter()
            .any(|b| matches!(b.heading_level(), Some(1) | Some(2)));

        if !has_slide_headings {
            deck.open(SlideKind::Placeholder, Some(PLACEHOLDER_TITLE));
            let hint = StyledRun::styled(PLACEHOLDER_HINT, &deck.body.clone().italic());
            deck.place(SlideContent::Paragraph { runs: vec![hint] }, PARAGRAPH_COST);
        }

        for block in blocks {
            match block {
                Block::Heading { level: 1, text } => {
                    deck.open(SlideKind::Title, Some(text.as_str()));
                }
                Block::Heading { level: 2, text } => {
                    deck.open(SlideKind::Section, Some(text.as_str()));
                }
                Block::Heading { text, .. } => {
                    let style = deck.body.clone().bold().with_size(deck.body_size + 2.0);
                    let runs = tokenize(text, &style);
                    deck.place(SlideContent::SubHeading { runs }, SUB_HEADING_COST);
                }
                Block::Paragraph { text } => {
                    let runs = tokenize(text, &deck.body);
                    deck.place(SlideContent::Paragraph { runs }, PARAGRAPH_COST);
                }
                Block::List(list) => {
                    for (i, item) in list.items.iter().enumerate() {
                        let content = SlideContent::ListItem {
                            runs: tokenize(item, &deck.body),
                            ordered: list.ordered,
                            number: list.number_at(i),
                        };
                        deck.place(content, LIST_ITEM_COST);
                    }
                }
                Block::Quote { text } => {
                    let runs = tokenize(text, &deck.body.clone().italic());
                    deck.place(SlideContent::Quote { runs }, QUOTE_COST);
                }
                Block::Table(table) => {
                    let row_height = TABLE_ROW_COST * deck.scale;
                    let grid = TextGrid::new(
                        table.headers.iter().map(|c| strip_markup(c)).collect(),
                        table
                            .rows
                            .iter()
                            .map(|row| row.iter().map(|c| strip_markup(c)).collect())
                            .collect(),
                        CONTENT_WIDTH,
                        row_height,
                    );
                    let cost = TABLE_ROW_COST * grid.total_rows() as f32;
                    deck.place(SlideContent::Table(grid), cost);
                }
                // Slides have no divider primitive; the heading split already
                // separates sections.
                Block::Rule => {}
            }
        }

        deck.finish()
    }
}

/// Render blocks into a slide model.
pub fn to_slide_model(blocks: &[Block], options: &RenderOptions) -> SlideModel {
    SlideRenderer::new(options.clone()).render(blocks)
}

/// Content top offset for a slide kind.
pub fn content_top(kind: SlideKind) -> f32 {
    match kind {
        SlideKind::Title => TITLE_CONTENT_TOP,
        SlideKind::Section | SlideKind::Placeholder => SECTION_CONTENT_TOP,
    }
}

/// The slide currently receiving content.
struct OpenSlide {
    slide: Slide,
    cursor: f32,
    dropped: usize,
}

/// Slide assembly state.
struct Deck {
    model: SlideModel,
    overflow: OverflowPolicy,
    current: Option<OpenSlide>,
    body: RunStyle,
    body_size: f32,
    title_style: RunStyle,
    section_style: RunStyle,
    scale: f32,
}

impl Deck {
    fn new(typography: Typography, overflow: OverflowPolicy) -> Self {
        let base = typography.font_size;
        let family = typography.font_family.clone();
        let body_size = base + 6.0;

        Self {
            body: RunStyle::new().with_font(family.clone()).with_size(body_size),
            body_size,
            title_style: RunStyle::new()
                .with_font(family.clone())
                .with_size(base * 3.0)
                .with_color(super::document::H1_COLOR)
                .bold(),
            section_style: RunStyle::new()
                .with_font(family)
                .with_size(base * 2.0 + 4.0)
                .with_color(super::document::H2_COLOR)
                .bold(),
            scale: base / 12.0,
            overflow,
            current: None,
            model: SlideModel::new(typography),
        }
    }

    fn open(&mut self, kind: SlideKind, title: Option<&str>) {
        self.close();

        let style = match kind {
            SlideKind::Title => &self.title_style,
            SlideKind::Section | SlideKind::Placeholder => &self.section_style,
        };
        let title = title.map(|t| tokenize(t, style));
        let slide = Slide::new(kind, title, self.model.typography.background.clone());
        self.current = Some(OpenSlide {
            cursor: content_top(kind),
            slide,
            dropped: 0,
        });
    }

    /// Place one content item, honoring the overflow policy.
    fn place(&mut self, content: SlideContent, cost: f32) {
        let height = cost * self.scale;

        if self.current.is_none() {
            // Content before the first heading.
            self.open(SlideKind::Section, None);
        }
        let Some(open) = self.current.as_mut() else {
            return;
        };

        let fits = open.cursor + height <= CONTENT_BOTTOM + f32::EPSILON;
        if open.dropped > 0 || (!fits && !open.slide.is_empty()) {
            match self.overflow {
                OverflowPolicy::Drop => {
                    open.dropped += 1;
                    return;
                }
                OverflowPolicy::Continue => self.continue_slide(),
            }
        }

        if let Some(open) = self.current.as_mut() {
            open.slide.items.push(SlideItem {
                content,
                y: open.cursor,
                height,
            });
            open.cursor += height;
        }
    }

    /// Close the open slide and start a continuation of the same kind.
    fn continue_slide(&mut self) {
        let Some(previous) = self.current.take() else {
            return;
        };
        let kind = previous.slide.kind;
        let title = previous.slide.title.clone().map(continued_title);
        let background = previous.slide.background.clone();
        self.finish_slide(previous);

        let mut slide = Slide::new(kind, title, background);
        slide.continued = true;
        self.current = Some(OpenSlide {
            cursor: content_top(kind),
            slide,
            dropped: 0,
        });
    }

    fn close(&mut self) {
        if let Some(open) = self.current.take() {
            self.finish_slide(open);
        }
    }

    fn finish_slide(&mut self, open: OpenSlide) {
        if open.dropped > 0 {
            log::warn!(
                "Slide {} ({}) is full; dropped {} content item(s)",
                self.model.slides.len() + 1,
                open.slide.title_text().unwrap_or_else(|| "untitled".to_string()),
                open.dropped
            );
        }
        self.model.slides.push(open.slide);
    }

    fn finish(mut self) -> SlideModel {
        self.close();
        log::debug!("Rendered {} slides", self.model.slide_count());
        self.model
    }
}

fn continued_title(mut runs: Vec<StyledRun>) -> Vec<StyledRun> {
    match runs.last_mut() {
        Some(last) => last.text.push_str(CONTINUED_SUFFIX),
        None => runs.push(StyledRun::new(CONTINUED_SUFFIX.trim_start())),
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::render::AccessibilityOptions;

    fn render(source: &str) -> SlideModel {
        to_slide_model(&parse(source), &RenderOptions::default())
    }

    fn render_with(source: &str, options: RenderOptions) -> SlideModel {
        to_slide_model(&parse(source), &options)
    }

    #[test]
    fn test_headings_split_slides() {
        let deck = render("# Title\n\n## Section A\n\nSome text\n\n## Section B\n\nMore text");

        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.slides[0].kind, SlideKind::Title);
        assert_eq!(deck.slides[0].title_text().as_deref(), Some("Title"));
        assert!(deck.slides[0].is_empty());

        for (slide, (title, text)) in deck.slides[1..]
            .iter()
            .zip([("Section A", "Some text"), ("Section B", "More text")])
        {
            assert_eq!(slide.kind, SlideKind::Section);
            assert_eq!(slide.title_text().as_deref(), Some(title));
            assert_eq!(slide.items.len(), 1);
            assert_eq!(slide.items[0].content.kind(), "paragraph");
            assert_eq!(slide.items[0].content.plain_text(), text);
            assert_eq!(slide.items[0].y, SECTION_CONTENT_TOP);
        }
    }

    #[test]
    fn test_no_headings_placeholder() {
        let deck = render("Just a paragraph.\n\n- and a list");

        assert_eq!(deck.slide_count(), 1);
        let slide = &deck.slides[0];
        assert_eq!(slide.kind, SlideKind::Placeholder);
        assert_eq!(slide.title_text().as_deref(), Some(PLACEHOLDER_TITLE));
        assert_eq!(slide.items[0].content.plain_text(), PLACEHOLDER_HINT);
        assert_eq!(slide.items.len(), 3);
    }

    #[test]
    fn test_empty_input_placeholder() {
        let deck = render("");
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(deck.slides[0].items.len(), 1);
    }

    #[test]
    fn test_level_three_is_sub_heading() {
        let deck = render("## Part\n\n### Detail\n\ntext");
        assert_eq!(deck.slide_count(), 1);
        let items = &deck.slides[0].items;
        assert_eq!(items[0].content.kind(), "sub_heading");
        let SlideContent::SubHeading { runs } = &items[0].content else {
            panic!("Expected sub-heading");
        };
        assert!(runs[0].bold);
    }

    #[test]
    fn test_leading_content_untitled_slide() {
        let deck = render("Intro text\n\n## First");
        assert_eq!(deck.slide_count(), 2);
        assert_eq!(deck.slides[0].title, None);
        assert_eq!(deck.slides[0].kind, SlideKind::Section);
        assert_eq!(deck.slides[0].items.len(), 1);
    }

    #[test]
    fn test_overflow_drops_by_default() {
        // 1.4 + 9 * 0.4 = 5.0; the tenth item would end at 5.4.
        let items: String = (1..=12).map(|i| format!("- item {}\n", i)).collect();
        let deck = render(&format!("## Long\n\n{}", items));

        assert_eq!(deck.slide_count(), 1);
        assert_eq!(deck.slides[0].items.len(), 9);
        let last = deck.slides[0].items.last().unwrap();
        assert!(last.y + last.height <= CONTENT_BOTTOM + 1e-4);
    }

    #[test]
    fn test_overflow_drops_rest_of_section_only() {
        let items: String = (1..=12).map(|i| format!("- item {}\n", i)).collect();
        let deck = render(&format!("## Long\n\n{}\n## Next\n\nshort", items));

        assert_eq!(deck.slide_count(), 2);
        assert_eq!(deck.slides[1].items.len(), 1);
    }

    #[test]
    fn test_overflow_continue() {
        let items: String = (1..=12).map(|i| format!("- item {}\n", i)).collect();
        let options = RenderOptions::new().with_overflow(OverflowPolicy::Continue);
        let deck = render_with(&format!("## Long\n\n{}", items), options);

        assert_eq!(deck.slide_count(), 2);
        assert_eq!(deck.slides[0].items.len(), 9);
        assert_eq!(deck.slides[1].items.len(), 3);
        assert!(deck.slides[1].continued);
        assert_eq!(deck.slides[1].kind, SlideKind::Section);
        assert_eq!(deck.slides[1].title_text().as_deref(), Some("Long (cont.)"));
        assert_eq!(deck.slides[1].items[0].y, SECTION_CONTENT_TOP);
    }

    #[test]
    fn test_first_item_always_placed() {
        let rows: String = (1..=20).map(|i| format!("| r{} |\n", i)).collect();
        let deck = render(&format!("# Big table\n\n| H |\n|---|\n{}", rows));

        assert_eq!(deck.slides[0].items.len(), 1);
        let SlideContent::Table(grid) = &deck.slides[0].items[0].content else {
            panic!("Expected table");
        };
        assert_eq!(grid.total_rows(), 21);
    }

    #[test]
    fn test_table_grid_plain_cells() {
        let deck = render("## T\n\n| **Term** | Meaning |\n|---|---|\n| *heath* | $x$ |");
        let item = &deck.slides[0].items[0];
        let SlideContent::Table(grid) = &item.content else {
            panic!("Expected table");
        };
        assert_eq!(grid.headers, vec!["Term", "Meaning"]);
        assert_eq!(grid.rows[0], vec!["heath", "[x]"]);
        assert!((grid.width() - CONTENT_WIDTH).abs() < 1e-4);
        assert!((item.height - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_large_text_scales_costs() {
        let options = RenderOptions::new()
            .with_accessibility(AccessibilityOptions::new().with_large_text(true));
        let deck = render_with("## A\n\nText", options);
        let item = &deck.slides[0].items[0];
        assert!((item.height - 0.5 * 14.0 / 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_backgrounds_from_typography() {
        let options = RenderOptions::new()
            .with_accessibility(AccessibilityOptions::new().with_cream_background(true));
        let deck = render_with("# A\n## B", options);
        assert!(deck.slides.iter().all(|s| s.background == "FDF6E3"));
    }
}

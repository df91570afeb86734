//! Content model types.
//!
//! This module defines the intermediate representations shared by the
//! parser and the renderers: the block sequence produced from Markdown,
//! styled inline runs, and the two target models (word-processor document
//! and slide deck) that packagers turn into files.

mod block;
mod document;
mod run;
mod slide;

pub use block::{Block, ListBlock, TableBlock};
pub use document::{DocCell, DocElement, DocParagraph, DocTable, DocumentModel, Typography};
pub use run::{runs_text, RunStyle, StyledRun};
pub use slide::{
    Slide, SlideContent, SlideItem, SlideKind, SlideModel, TextGrid, SLIDE_HEIGHT, SLIDE_WIDTH,
};

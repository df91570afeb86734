//! Markdown dialect parsing.
//!
//! Two passes live here: the block parser turns source lines into
//! [`Block`](crate::model::Block)s, and the inline tokenizer turns the text of
//! one block into [`StyledRun`](crate::model::StyledRun)s for the non-HTML
//! renderers.

mod block;
mod inline;

pub use block::{first_title, parse, BlockParser};
pub use inline::{strip_markup, tokenize, tokenize_plain};

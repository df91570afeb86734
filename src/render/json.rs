//! JSON rendering of parsed blocks and render models.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Block;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a block sequence to JSON.
pub fn to_json(blocks: &[Block], format: JsonFormat) -> Result<String> {
    model_to_json(&blocks, format)
}

/// Convert any render model (document or slide model) to JSON.
pub fn model_to_json<T: Serialize + ?Sized>(model: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(model),
        JsonFormat::Compact => serde_json::to_string(model),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

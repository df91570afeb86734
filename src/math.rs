//! LaTeX math spans and the math-typesetting seam.
//!
//! Math is written as `$$...$$` (display) or `$...$` (inline). HTML output
//! hands each span to a [`MathRenderer`]; targets that cannot typeset math
//! replace the span with a bracketed `[source]` placeholder instead.

use std::ops::Range;
use std::sync::OnceLock;

use quick_xml::escape::escape;
use regex::Regex;

use crate::error::{Error, Result};

fn display_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\$([\s\S]*?)\$\$").expect("display math pattern"))
}

fn inline_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$([^$\n]+?)\$").expect("inline math pattern"))
}

/// A delimited math span found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    /// Math source between the delimiters, untrimmed
    pub source: String,

    /// `$$...$$` (true) or `$...$` (false)
    pub display: bool,

    /// Byte range of the span including delimiters
    pub range: Range<usize>,
}

impl MathSpan {
    /// The span exactly as written, delimiters included.
    pub fn delimited(&self) -> String {
        let delim = if self.display { "$$" } else { "$" };
        format!("{delim}{}{delim}", self.source)
    }

    /// Plain-text stand-in for targets without math typesetting.
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.source)
    }
}

/// Find all math spans in `text`, in source order.
///
/// Display spans are matched first; inline spans are only searched for in the
/// text between them.
pub fn find_math_spans(text: &str) -> Vec<MathSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    let scan_inline = |from: usize, to: usize, spans: &mut Vec<MathSpan>| {
        let gap = &text[from..to];
        for caps in inline_regex().captures_iter(gap) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            spans.push(MathSpan {
                source: inner.as_str().to_string(),
                display: false,
                range: from + whole.start()..from + whole.end(),
            });
        }
    };

    for caps in display_regex().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        scan_inline(cursor, whole.start(), &mut spans);
        spans.push(MathSpan {
            source: inner.as_str().to_string(),
            display: true,
            range: whole.range(),
        });
        cursor = whole.end();
    }
    scan_inline(cursor, text.len(), &mut spans);

    spans
}

/// Replace every math span in `text` with the output of `replace`.
pub fn replace_math<F>(text: &str, mut replace: F) -> String
where
    F: FnMut(&MathSpan) -> String,
{
    let spans = find_math_spans(text);
    if spans.is_empty() {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in &spans {
        output.push_str(&text[cursor..span.range.start]);
        output.push_str(&replace(span));
        cursor = span.range.end;
    }
    output.push_str(&text[cursor..]);
    output
}

/// Replace every math span with its `[source]` placeholder.
pub fn substitute_placeholders(text: &str) -> String {
    replace_math(text, MathSpan::placeholder)
}

/// Typesets a math source string into renderable markup.
///
/// Implementations may fail; callers recover by keeping the original
/// delimited source.
pub trait MathRenderer: Send + Sync {
    /// Render `source` in display (block) or inline mode.
    fn render_math(&self, source: &str, display_mode: bool) -> Result<String>;
}

/// Render a span through `renderer`, falling back to the escaped source.
pub fn render_span(renderer: &dyn MathRenderer, span: &MathSpan) -> String {
    match renderer.render_math(span.source.trim(), span.display) {
        Ok(markup) => markup,
        Err(e) => {
            log::warn!("Leaving math span as source: {}", e);
            escape(span.delimited().as_str()).into_owned()
        }
    }
}

/// Emits KaTeX auto-render markup (`\(..\)` / `\[..\]`) for client-side
/// typesetting.
///
/// The standalone HTML document loads KaTeX, which picks these delimiters up.
#[derive(Debug, Clone, Copy, Default)]
pub struct KatexMarkup;

impl KatexMarkup {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }
}

impl MathRenderer for KatexMarkup {
    fn render_math(&self, source: &str, display_mode: bool) -> Result<String> {
        if source.trim().is_empty() {
            return Err(Error::Math("empty math expression".to_string()));
        }
        check_braces(source)?;

        let escaped = escape(source);
        Ok(if display_mode {
            format!(r#"<div class="math math-display">\[{}\]</div>"#, escaped)
        } else {
            format!(r#"<span class="math math-inline">\({}\)</span>"#, escaped)
        })
    }
}

/// Reject sources whose unescaped `{`/`}` do not balance.
fn check_braces(source: &str) -> Result<()> {
    let mut depth: i32 = 0;
    let mut escaped = false;
    for c in source.chars() {
        match c {
            '\\' if !escaped => {
                escaped = true;
                continue;
            }
            '{' if !escaped => depth += 1,
            '}' if !escaped => {
                depth -= 1;
                if depth < 0 {
                    return Err(Error::Math(format!("unexpected '}}' in {:?}", source)));
                }
            }
            _ => {}
        }
        escaped = false;
    }
    if depth != 0 {
        return Err(Error::Math(format!("unclosed '{{' in {:?}", source)));
    }
    Ok(())
}

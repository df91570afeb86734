//! HTML rendering.
//!
//! Markdown is converted with `comrak`; math spans are lifted out before
//! conversion and substituted with the output of a [`MathRenderer`]
//! afterwards, so the converter never sees (or mangles) LaTeX source.

use comrak::{markdown_to_html, Options};
use quick_xml::escape::escape;

use crate::math::{find_math_spans, render_span, KatexMarkup, MathRenderer, MathSpan};
use crate::model::Typography;
use crate::parser::{first_title, strip_markup};

use super::RenderOptions;

/// Title used when the source has no level-1 heading.
pub const DEFAULT_TITLE: &str = "Adapted Resource";

const KATEX_VERSION: &str = "0.16.9";

const MATH_OPEN: char = '\u{E000}';
const MATH_CLOSE: char = '\u{E001}';

const BASE_CSS: &str = r#"    @import url('https://fonts.cdnfonts.com/css/opendyslexic');

    h1 { font-size: 1.8em; margin-bottom: 0.5em; color: #1e3d52; }
    h2 { font-size: 1.4em; margin-top: 1.5em; margin-bottom: 0.5em; color: #2d5a7b; }
    h3 { font-size: 1.2em; margin-top: 1.2em; margin-bottom: 0.4em; }

    p { margin-bottom: 1em; }

    ul, ol { margin-left: 1.5em; margin-bottom: 1em; }
    li { margin-bottom: 0.5em; }

    strong { font-weight: 600; }

    blockquote {
      border-left: 4px solid #2d5a7b;
      margin-left: 0;
      padding-left: 1em;
      font-style: italic;
    }

    code {
      background: #f0f0f0;
      padding: 0.2em 0.4em;
      border-radius: 4px;
      font-family: monospace;
    }

    pre {
      background: #f0f0f0;
      padding: 1em;
      border-radius: 8px;
      overflow-x: auto;
    }

    table {
      border-collapse: collapse;
      width: 100%;
      margin: 1em 0;
    }

    th, td {
      border: 1px solid #ddd;
      padding: 12px;
      text-align: left;
    }

    th { background: #f5f5f5; }

    .katex { font-size: 1.1em; }
    .math-display { margin: 1em 0; text-align: center; }

    @media print {
      body { padding: 20px; }
    }"#;

/// HTML renderer for preview and HTML/PDF export.
pub struct HtmlRenderer {
    options: RenderOptions,
    math: Box<dyn MathRenderer>,
}

impl HtmlRenderer {
    /// Create a renderer using KaTeX auto-render markup for math.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            math: Box::new(KatexMarkup::new()),
        }
    }

    /// Replace the math renderer.
    pub fn with_math_renderer(mut self, renderer: impl MathRenderer + 'static) -> Self {
        self.math = Box::new(renderer);
        self
    }

    /// Render Markdown to an HTML fragment (no document wrapper).
    pub fn render_fragment(&self, markdown: &str) -> String {
        let spans = find_math_spans(markdown);
        let protected = protect_math(markdown, &spans);

        let html = markdown_to_html(&protected, &comrak_options());
        let html = restore_math(&html, &spans, self.math.as_ref());

        log::debug!(
            "Rendered {} bytes of HTML ({} math spans)",
            html.len(),
            spans.len()
        );
        html
    }

    /// Render Markdown to a standalone HTML document.
    pub fn render_document(&self, markdown: &str) -> String {
        self.wrap(markdown, false)
    }

    /// Render Markdown to a standalone HTML document that opens the print
    /// dialog once loaded.
    pub fn render_printable(&self, markdown: &str) -> String {
        self.wrap(markdown, true)
    }

    /// Document title: the override, else the first level-1 heading.
    pub fn title(&self, markdown: &str) -> String {
        self.options
            .title
            .clone()
            .or_else(|| first_title(markdown).map(|t| strip_markup(&t)))
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    fn wrap(&self, markdown: &str, print: bool) -> String {
        let body = self.render_fragment(markdown);
        let title = self.title(markdown);
        let body_css = body_css(&self.options.typography());

        let print_script = if print {
            "\n  <script>\n    window.addEventListener('load', function () {\n      setTimeout(function () { window.focus(); window.print(); }, 500);\n    });\n  </script>"
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="adaptdoc">
  <title>{title}</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@{katex}/dist/katex.min.css">
  <script defer src="https://cdn.jsdelivr.net/npm/katex@{katex}/dist/katex.min.js"></script>
  <script defer src="https://cdn.jsdelivr.net/npm/katex@{katex}/dist/contrib/auto-render.min.js"
    onload="renderMathInElement(document.body);"></script>{print_script}
  <style>
    body {{
{body_css}
    }}

{base_css}
  </style>
</head>
<body>
{body}
</body>
</html>
"#,
            title = escape(title.as_str()),
            katex = KATEX_VERSION,
            print_script = print_script,
            body_css = body_css,
            base_css = BASE_CSS,
            body = body,
        )
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl std::fmt::Debug for HtmlRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlRenderer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Render Markdown to an HTML fragment with default options.
pub fn to_html_fragment(markdown: &str) -> String {
    HtmlRenderer::default().render_fragment(markdown)
}

/// Render Markdown to a standalone HTML document.
pub fn to_html(markdown: &str, options: &RenderOptions) -> String {
    HtmlRenderer::new(options.clone()).render_document(markdown)
}

fn comrak_options() -> Options {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.render.unsafe_ = true;
    options
}

/// Body rules derived from typography.
fn body_css(typography: &Typography) -> String {
    let mut rules = vec![
        format!("font-family: {};", typography.css_font_stack),
        format!("font-size: {}pt;", typography.font_size),
        format!("line-height: {};", typography.line_spacing),
    ];
    if let Some(spacing) = &typography.letter_spacing {
        rules.push(format!("letter-spacing: {};", spacing));
    }
    if typography.has_background() {
        rules.push(format!(
            "background-color: #{};",
            typography.background.to_lowercase()
        ));
    }
    rules.extend([
        "color: #2c3e50;".to_string(),
        "padding: 40px;".to_string(),
        "max-width: 800px;".to_string(),
        "margin: 0 auto;".to_string(),
    ]);

    rules
        .iter()
        .map(|rule| format!("      {}", rule))
        .collect::<Vec<_>>()
        .join("\n")
}

fn protect_math(text: &str, spans: &[MathSpan]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for (index, span) in spans.iter().enumerate() {
        output.push_str(&text[cursor..span.range.start]);
        output.push(MATH_OPEN);
        output.push_str(&index.to_string());
        output.push(MATH_CLOSE);
        cursor = span.range.end;
    }
    output.push_str(&text[cursor..]);
    output
}

fn restore_math(html: &str, spans: &[MathSpan], renderer: &dyn MathRenderer) -> String {
    if spans.is_empty() {
        return html.to_string();
    }

    let mut output = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find(MATH_OPEN) {
        output.push_str(&rest[..start]);
        let after = &rest[start + MATH_OPEN.len_utf8()..];
        let resolved = after.find(MATH_CLOSE).and_then(|end| {
            let span = after[..end].parse::<usize>().ok().and_then(|i| spans.get(i))?;
            Some((span, end))
        });
        match resolved {
            Some((span, end)) => {
                output.push_str(&render_span(renderer, span));
                rest = &after[end + MATH_CLOSE.len_utf8()..];
            }
            None => {
                output.push(MATH_OPEN);
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::render::AccessibilityOptions;

    struct FailingMath;

    impl MathRenderer for FailingMath {
        fn render_math(&self, _source: &str, _display_mode: bool) -> Result<String> {
            Err(Error::Math("unsupported".to_string()))
        }
    }

    #[test]
    fn test_fragment_basic_markdown() {
        let html = to_html_fragment("# Title\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_math_protected_from_markdown() {
        let html = to_html_fragment("Product $a*b*c$ and $$x_1 + x_2$$");
        assert!(html.contains(r#"<span class="math math-inline">\(a*b*c\)</span>"#));
        assert!(html.contains(r#"<div class="math math-display">\[x_1 + x_2\]</div>"#));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_math_failure_keeps_source() {
        let renderer = HtmlRenderer::default().with_math_renderer(FailingMath);
        let html = renderer.render_fragment("Area $\\pi r^2$ here");
        assert!(html.contains("Area $\\pi r^2$ here"));
    }

    #[test]
    fn test_document_title_and_fonts() {
        let options = RenderOptions::new().with_accessibility(
            AccessibilityOptions::new()
                .with_dyslexic_font(true)
                .with_cream_background(true),
        );
        let html = to_html("# The *Tempest*\n\nText", &options);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>The Tempest</title>"));
        assert!(html.contains("font-family: 'OpenDyslexic', 'Comic Sans MS', sans-serif;"));
        assert!(html.contains("background-color: #fdf6e3;"));
        assert!(html.contains("katex@0.16.9"));
        assert!(!html.contains("window.print()"));
    }

    #[test]
    fn test_default_document() {
        let html = to_html("Just text", &RenderOptions::default());
        assert!(html.contains("<title>Adapted Resource</title>"));
        assert!(html.contains("font-family: Arial, sans-serif;"));
        assert!(html.contains("font-size: 12pt;"));
        assert!(html.contains("line-height: 1.6;"));
        assert!(!html.contains("letter-spacing"));
        assert!(!html.contains("background-color"));
    }

    #[test]
    fn test_printable_document() {
        let html = HtmlRenderer::default().render_printable("# Print me");
        assert!(html.contains("window.print()"));
    }

    #[test]
    fn test_title_override() {
        let renderer = HtmlRenderer::new(RenderOptions::new().with_title("A & B"));
        let html = renderer.render_document("# Ignored");
        assert!(html.contains("<title>A &amp; B</title>"));
    }
}

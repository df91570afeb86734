//! Inline span tokenizer: emphasis markup to styled runs.

use std::collections::HashMap;

use crate::math::{find_math_spans, MathSpan};
use crate::model::{RunStyle, StyledRun};

const SENTINEL_OPEN: char = '\u{E000}';
const SENTINEL_CLOSE: char = '\u{E001}';

/// Tokenize inline text into styled runs, merging `base` into every run.
///
/// Math spans become `[source]` placeholders before emphasis is scanned, and
/// the placeholder text is never itself scanned for emphasis. Delimiters are
/// matched longest first (`***`, `**`, `*`, likewise with `_`); unmatched
/// delimiters stay in the text as literals.
pub fn tokenize(text: &str, base: &RunStyle) -> Vec<StyledRun> {
    let spans = find_math_spans(text);
    let protected = protect_math(text, &spans);
    let chars: Vec<char> = protected.chars().collect();

    let mut runs = Vec::new();
    scan(&chars, base, &mut runs);

    if !spans.is_empty() {
        for run in &mut runs {
            run.text = expand_math(&run.text, &spans);
        }
    }

    merge_runs(runs)
}

/// Tokenize with no base styling.
pub fn tokenize_plain(text: &str) -> Vec<StyledRun> {
    tokenize(text, &RunStyle::default())
}

/// Strip emphasis markup and substitute math placeholders.
pub fn strip_markup(text: &str) -> String {
    tokenize_plain(text)
        .into_iter()
        .map(|run| run.text)
        .collect()
}

fn protect_math(text: &str, spans: &[MathSpan]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for (index, span) in spans.iter().enumerate() {
        output.push_str(&text[cursor..span.range.start]);
        output.push(SENTINEL_OPEN);
        output.push_str(&index.to_string());
        output.push(SENTINEL_CLOSE);
        cursor = span.range.end;
    }
    output.push_str(&text[cursor..]);
    output
}

fn expand_math(text: &str, spans: &[MathSpan]) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(SENTINEL_OPEN) {
        output.push_str(&rest[..start]);
        let after = &rest[start + SENTINEL_OPEN.len_utf8()..];
        let resolved = after.find(SENTINEL_CLOSE).and_then(|end| {
            let span = after[..end].parse::<usize>().ok().and_then(|i| spans.get(i))?;
            Some((span, end))
        });
        match resolved {
            Some((span, end)) => {
                output.push_str(&span.placeholder());
                rest = &after[end + SENTINEL_CLOSE.len_utf8()..];
            }
            None => {
                output.push(SENTINEL_OPEN);
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}

fn run_length(chars: &[char], from: usize, c: char) -> usize {
    chars[from..].iter().take_while(|&&x| x == c).count()
}

/// Whether a delimiter run at `at` of length `len` may open emphasis.
fn can_open(chars: &[char], at: usize, len: usize, c: char) -> bool {
    match chars.get(at + len) {
        Some(next) if !next.is_whitespace() => {}
        _ => return false,
    }
    if c == '_' && at > 0 && chars[at - 1].is_alphanumeric() {
        return false;
    }
    true
}

/// Whether a delimiter run at `at` of length `len` may close emphasis.
fn can_close(chars: &[char], at: usize, len: usize, c: char) -> bool {
    if at == 0 || chars[at - 1].is_whitespace() {
        return false;
    }
    if c == '_' && chars.get(at + len).is_some_and(|n| n.is_alphanumeric()) {
        return false;
    }
    true
}

/// Start positions of the delimiter runs that may close emphasis, keyed by
/// delimiter and run length. Built once per scanned slice.
struct Closers {
    positions: HashMap<(char, usize), Vec<usize>>,
}

impl Closers {
    fn index(chars: &[char]) -> Self {
        let mut positions: HashMap<(char, usize), Vec<usize>> = HashMap::new();
        let mut j = 0;
        while j < chars.len() {
            let c = chars[j];
            if c != '*' && c != '_' {
                j += 1;
                continue;
            }
            let run = run_length(chars, j, c);
            if can_close(chars, j, run, c) {
                positions.entry((c, run)).or_default().push(j);
            }
            j += run;
        }
        Self { positions }
    }

    /// First closing run of exactly `len` delimiters starting after `from`,
    /// so the enclosed content is never empty.
    fn find(&self, from: usize, c: char, len: usize) -> Option<usize> {
        let positions = self.positions.get(&(c, len))?;
        let next = positions.partition_point(|&p| p <= from);
        positions.get(next).copied()
    }
}

fn scan(chars: &[char], style: &RunStyle, out: &mut Vec<StyledRun>) {
    let closers = Closers::index(chars);
    let mut plain = String::new();
    let mut i = 0;

    'outer: while i < chars.len() {
        let c = chars[i];
        if c != '*' && c != '_' {
            plain.push(c);
            i += 1;
            continue;
        }

        let run = run_length(chars, i, c);
        if can_open(chars, i, run, c) {
            for len in (1..=run.min(3)).rev() {
                if let Some(close) = closers.find(i + len, c, len) {
                    if !plain.is_empty() {
                        out.push(StyledRun::styled(std::mem::take(&mut plain), style));
                    }
                    let inner = style.emphasized(len >= 2, len != 2);
                    scan(&chars[i + len..close], &inner, out);
                    i = close + len;
                    continue 'outer;
                }
            }
        }

        plain.extend(&chars[i..i + run]);
        i += run;
    }

    if !plain.is_empty() {
        out.push(StyledRun::styled(plain, style));
    }
}

/// Merge neighbouring runs with identical styling and drop empty runs.
fn merge_runs(runs: Vec<StyledRun>) -> Vec<StyledRun> {
    let mut merged: Vec<StyledRun> = Vec::with_capacity(runs.len());
    for run in runs.into_iter().filter(|r| !r.is_empty()) {
        match merged.last_mut() {
            Some(last) if last.style() == run.style() => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    merged
}

//! Line-oriented block parser for the lesson Markdown dialect.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Block, ListBlock, TableBlock};

fn ordered_item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,9})\.\s+(.*)$").expect("ordered item pattern"))
}

fn unordered_item_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*+]\s+(.*)$").expect("unordered item pattern"))
}

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank,
    TableRow(Vec<String>),
    TableSeparator,
    Heading(u8, String),
    Rule,
    Quote(String),
    OrderedItem(u32, String),
    UnorderedItem(String),
    MathOpen(String),
    Text(String),
}

impl Line {
    /// Classify a line, trying each kind in priority order.
    fn classify(raw: &str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Line::Blank;
        }

        if line.starts_with('|') {
            let cells = split_cells(line);
            if cells.iter().all(|c| is_separator_cell(c)) {
                return Line::TableSeparator;
            }
            return Line::TableRow(cells);
        }

        if let Some((level, text)) = heading(line) {
            return Line::Heading(level, text.to_string());
        }

        if is_rule(line) {
            return Line::Rule;
        }

        if let Some(rest) = line.strip_prefix('>') {
            return Line::Quote(rest.trim().to_string());
        }

        if let Some(caps) = ordered_item_regex().captures(line) {
            let number = caps[1].parse().unwrap_or(1);
            return Line::OrderedItem(number, caps[2].trim().to_string());
        }

        if let Some(caps) = unordered_item_regex().captures(line) {
            return Line::UnorderedItem(caps[1].trim().to_string());
        }

        if let Some(rest) = line.strip_prefix("$$") {
            if !rest.contains("$$") {
                return Line::MathOpen(rest.trim().to_string());
            }
        }

        Line::Text(line.to_string())
    }
}

/// Parse a heading prefix (`#` to `######` followed by a space).
///
/// Levels deeper than 3 are clamped to 3.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some(((hashes as u8).min(3), rest.trim()))
}

/// A rule is three or more of one of `-`, `*`, `_`, optionally space-separated.
fn is_rule(line: &str) -> bool {
    let mut marks = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in marks {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

fn split_cells(line: &str) -> Vec<String> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

fn is_separator_cell(cell: &str) -> bool {
    cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':')
}

/// The single open accumulator of the parser.
#[derive(Debug)]
enum Accumulator {
    None,
    List(ListBlock),
    Table(TableBlock),
    /// Lines of a display formula opened by `$$` and not yet closed.
    Math(Vec<String>),
}

/// Block parser.
///
/// Makes one pass over the source lines holding at most one open list or
/// table, which is flushed on a blank line, on a line of another kind, on a
/// change of list ordering, and at end of input.
///
/// A display formula spread over several lines (`$$`, formula, `$$`) is
/// folded into one paragraph holding `$$formula$$`. Lines inside it are not
/// classified.
#[derive(Debug)]
pub struct BlockParser {
    blocks: Vec<Block>,
    open: Accumulator,
    repaired_rows: usize,
}

impl BlockParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            open: Accumulator::None,
            repaired_rows: 0,
        }
    }

    /// Parse `text` into blocks.
    pub fn parse(mut self, text: &str) -> Vec<Block> {
        for raw in text.lines() {
            if let Accumulator::Math(lines) = &mut self.open {
                let line = raw.trim();
                match line.strip_suffix("$$") {
                    Some(last) => {
                        lines.push(last.trim().to_string());
                        self.close_math();
                    }
                    None => lines.push(line.to_string()),
                }
                continue;
            }
            self.feed(Line::classify(raw));
        }
        self.flush();

        if self.repaired_rows > 0 {
            log::debug!(
                "Normalized {} table rows to their header width",
                self.repaired_rows
            );
        }
        log::debug!("Parsed {} blocks", self.blocks.len());
        self.blocks
    }

    fn feed(&mut self, line: Line) {
        match line {
            Line::Blank => self.flush(),
            Line::TableSeparator => {
                // Delimiter only: never emitted, never closes an open table.
                if !matches!(self.open, Accumulator::Table(_)) {
                    self.flush();
                }
            }
            Line::TableRow(cells) => match &mut self.open {
                Accumulator::Table(table) => {
                    if table.push_row(cells) {
                        self.repaired_rows += 1;
                    }
                }
                _ => {
                    self.flush();
                    self.open = Accumulator::Table(TableBlock::new(cells));
                }
            },
            Line::OrderedItem(number, text) => self.push_item(true, number, text),
            Line::UnorderedItem(text) => self.push_item(false, 1, text),
            Line::Heading(level, text) => self.emit(Block::heading(level, text)),
            Line::Rule => self.emit(Block::Rule),
            Line::Quote(text) => self.emit(Block::quote(text)),
            Line::MathOpen(first) => {
                self.flush();
                self.open = Accumulator::Math(vec![first]);
            }
            Line::Text(text) => self.emit(Block::paragraph(text)),
        }
    }

    fn push_item(&mut self, ordered: bool, number: u32, text: String) {
        if let Accumulator::List(list) = &mut self.open {
            if list.ordered == ordered {
                list.items.push(text);
                return;
            }
        }
        self.flush();
        self.open = Accumulator::List(ListBlock {
            ordered,
            start: if ordered { number } else { 1 },
            items: vec![text],
        });
    }

    fn emit(&mut self, block: Block) {
        self.flush();
        self.blocks.push(block);
    }

    fn close_math(&mut self) {
        if let Accumulator::Math(lines) = std::mem::replace(&mut self.open, Accumulator::None) {
            let formula = join_nonempty(&lines);
            self.blocks.push(Block::paragraph(format!("$${}$$", formula)));
        }
    }

    fn flush(&mut self) {
        match std::mem::replace(&mut self.open, Accumulator::None) {
            Accumulator::None => {}
            Accumulator::List(list) => self.blocks.push(Block::List(list)),
            Accumulator::Table(table) => self.blocks.push(Block::Table(table)),
            Accumulator::Math(lines) => {
                log::debug!("Unclosed display math block kept as text");
                let text = join_nonempty(&lines);
                let text = if text.is_empty() {
                    "$$".to_string()
                } else {
                    format!("$$ {}", text)
                };
                self.blocks.push(Block::paragraph(text));
            }
        }
    }
}

fn join_nonempty(lines: &[String]) -> String {
    lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse Markdown-dialect text into an ordered block sequence.
pub fn parse(text: &str) -> Vec<Block> {
    BlockParser::new().parse(text)
}

/// Extract the text of the first level-1 heading in raw source.
pub fn first_title(text: &str) -> Option<String> {
    text.lines().find_map(|raw| match Line::classify(raw) {
        Line::Heading(1, title) if !title.is_empty() => Some(title),
        _ => None,
    })
}

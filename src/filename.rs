//! Download filename policy.
//!
//! Artifacts are named `<Subject>-<Title>.<ext>` where the title is the first
//! level-1 heading of the source. Repeated exports of the same base name get
//! a numeric suffix (`-1`, `-2`, ...) so earlier downloads are not
//! overwritten. The counter belongs to the base name, whatever the extension.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::parser::{first_title, strip_markup};

/// Maximum length of a slug, in characters.
pub const MAX_SLUG_LEN: usize = 50;

/// Base name used when neither a subject nor a title is available.
pub const FALLBACK_BASE: &str = "adapted-resource";

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").expect("slug separator pattern"))
}

/// Turn free text into a filename-safe slug.
///
/// Markup is stripped, accents are decomposed and dropped, and every run of
/// other characters becomes a single `-`. Case is preserved.
pub fn slugify(text: &str) -> String {
    let plain = strip_markup(text);
    let ascii: String = plain.nfkd().filter(char::is_ascii).collect();
    let slug = separator_regex().replace_all(&ascii, "-");
    truncate_slug(slug.trim_matches('-'))
}

fn truncate_slug(slug: &str) -> String {
    let truncated: String = slug.chars().take(MAX_SLUG_LEN).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Derive the base name (no counter suffix, no extension).
///
/// The joined name is capped at [`MAX_SLUG_LEN`] characters.
pub fn base_name(subject: Option<&str>, markdown: &str) -> String {
    let subject = subject.map(slugify).filter(|s| !s.is_empty());
    let title = first_title(markdown)
        .map(|t| slugify(&t))
        .filter(|t| !t.is_empty());

    let base = match (subject, title) {
        (Some(subject), Some(title)) => format!("{}-{}", subject, title),
        (None, Some(title)) => title,
        (Some(subject), None) => format!("{}-resource", subject),
        (None, None) => return FALLBACK_BASE.to_string(),
    };
    truncate_slug(&base)
}

/// Session-lifetime filename counters.
///
/// Counters are keyed by the exact base name and only ever grow. Each
/// call to [`FilenamePolicy::next_filename`] is one atomic read-modify-write,
/// so a policy can be shared between threads.
#[derive(Debug, Default)]
pub struct FilenamePolicy {
    counters: Mutex<HashMap<String, u32>>,
}

impl FilenamePolicy {
    /// Create a policy with no names taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next filename for an export.
    pub fn next_filename(&self, subject: Option<&str>, markdown: &str, extension: &str) -> String {
        let base = base_name(subject, markdown);
        self.claim(&base, extension)
    }

    /// The filename the next export would get, without taking it.
    pub fn peek_filename(&self, subject: Option<&str>, markdown: &str, extension: &str) -> String {
        let base = base_name(subject, markdown);
        let count = self.count(&base);
        format_filename(&base, count, extension)
    }

    /// Take the next filename for an already derived base name.
    pub fn claim(&self, base: &str, extension: &str) -> String {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let count = counters.entry(base.to_string()).or_insert(0);
        let filename = format_filename(base, *count, extension);
        *count += 1;

        log::debug!("Assigned filename {}", filename);
        filename
    }

    /// Number of filenames already taken for `base`, across all extensions.
    pub fn count(&self, base: &str) -> u32 {
        let counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        counters.get(base).copied().unwrap_or(0)
    }
}

fn format_filename(base: &str, count: u32, extension: &str) -> String {
    let extension = extension.trim_start_matches('.');
    if count == 0 {
        format!("{}.{}", base, extension)
    } else {
        format!("{}-{}.{}", base, count, extension)
    }
}

//! ATX heading extraction.
//!
//! The extractor scans Markdown line by line. It does not build a syntax
//! tree: a heading is any line outside fenced code that, once trimmed,
//! starts with one to six `#` characters followed by whitespace and text.

use log::trace;

use crate::fence::{FenceTracker, LineKind};
use crate::inline::clean_heading_text;
use crate::lexer::Lexer;
use crate::slug::{anchor_base, slugify, AnchorIds};

/// Deepest heading level.
pub const MAX_LEVEL: u8 = 6;

/// A heading found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Display text with inline formatting removed.
    pub text: String,
    /// Anchor identifier, unique within the document.
    pub id: String,
}

impl Heading {
    /// The `#id` fragment linking to this heading.
    pub fn fragment(&self) -> String {
        format!("#{}", self.id)
    }
}

/// Extract every heading of a Markdown document, in document order.
///
/// Lines inside fenced code blocks are skipped. Each heading gets its
/// display text with inline markup removed and an anchor identifier: the
/// explicit `{#id}` when the heading ends with one, otherwise the
/// [`slugify`]d text. Identifiers starting with a digit are prefixed with
/// `heading-`, and duplicates get `-1`, `-2`, ... suffixes.
///
/// Input is read as UTF-8 on a best-effort basis; invalid sequences become
/// U+FFFD. This never fails: input without headings yields an empty vector.
///
/// # Example
///
/// ```rust
/// use mdtoc_core::extract_headings;
///
/// let doc = "# Intro\n\n```\n# not a heading\n```\n\n## Setup\n## Setup\n";
/// let ids: Vec<_> = extract_headings(doc).into_iter().map(|h| h.id).collect();
/// assert_eq!(ids, ["intro", "setup", "setup-1"]);
/// ```
pub fn extract_headings(input: impl AsRef<[u8]>) -> Vec<Heading> {
    let input = input.as_ref();
    let mut headings = Vec::new();
    let mut ids = AnchorIds::new();
    let mut fences = FenceTracker::new();

    for line in Lexer::new(input) {
        if fences.observe(line.text) != LineKind::Text {
            continue;
        }

        let text = String::from_utf8_lossy(line.text);
        let Some((level, raw)) = parse_atx(text.trim()) else {
            continue;
        };

        let heading = build_heading(&mut ids, level, raw);
        trace!(
            "line {}: h{} {:?} -> #{}",
            line.number + 1,
            heading.level,
            heading.text,
            heading.id
        );
        headings.push(heading);
    }

    headings
}

/// Turn the raw text of one heading line into a [`Heading`].
fn build_heading(ids: &mut AnchorIds, level: u8, raw: &str) -> Heading {
    let (text, base) = text_and_anchor(raw);
    Heading {
        level,
        id: ids.claim(&base),
        text,
    }
}

/// Display text and anchor base for the text of a single heading.
///
/// A trailing `{#id}` marker supplies the anchor and is dropped from the
/// text; otherwise the cleaned text is slugged. The anchor gets the digit
/// prefix or fallback but is not deduplicated.
///
/// # Example
///
/// ```rust
/// use mdtoc_core::heading::text_and_anchor;
///
/// assert_eq!(
///     text_and_anchor("**Intro** {#start}"),
///     ("Intro".to_string(), "start".to_string())
/// );
/// assert_eq!(text_and_anchor("2.0 Release").1, "heading-2-0-release");
/// ```
pub fn text_and_anchor(raw: &str) -> (String, String) {
    let raw = raw.trim();
    let (raw, explicit) = match split_explicit_id(raw) {
        Some((rest, id)) => (rest, Some(id)),
        None => (raw, None),
    };

    let text = clean_heading_text(raw);
    let base = match explicit {
        Some(id) => anchor_base(id.to_string()),
        None => anchor_base(slugify(&text)),
    };
    (text, base)
}

/// Match an ATX heading on an already trimmed line.
///
/// Returns the level and the trimmed heading text.
pub(crate) fn parse_atx(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > MAX_LEVEL as usize {
        return None;
    }

    let rest = &line[level..];
    let text = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
    if text.len() == rest.len() {
        return None;
    }

    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some((level as u8, text))
}

/// Split a trailing `{#id}` marker off heading text.
///
/// The marker may be preceded by whitespace and followed by whitespace.
/// The id is everything between the leftmost `{#` that reaches the final
/// `}` without crossing another `}`; it must be non-empty and contain no
/// whitespace. Returns the remaining text (trimmed) and the id.
pub(crate) fn split_explicit_id(text: &str) -> Option<(&str, &str)> {
    let body = text.trim_end_matches(|c: char| c.is_ascii_whitespace());
    let body = body.strip_suffix('}')?;

    let search_from = body.rfind('}').map_or(0, |pos| pos + 1);
    let open = search_from + body[search_from..].find("{#")?;
    let id = &body[open + 2..];

    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return None;
    }

    let rest = body[..open].trim_end_matches(|c: char| c.is_ascii_whitespace());
    Some((rest.trim(), id))
}

//! Inline markup removal for heading text.
//!
//! Headings are shown in the table of contents as plain text, so emphasis,
//! code spans, links, images, strikethrough and inline HTML are unwrapped to
//! their visible text. Each pass is a greedy left-to-right scan with no
//! backtracking; a pass that finds nothing returns its input borrowed.
//!
//! Matching rules shared by all passes: matches are leftmost and
//! non-overlapping, and the wrapped text must be non-empty and must not
//! contain the delimiter character. `**a*b**` is therefore not bold, and
//! `*x*` inside `**` is handled by the bold pass first.

use std::borrow::Cow;

use memchr::memchr;

type Pass = for<'t> fn(&'t str) -> Cow<'t, str>;

/// Cleaning passes, in the order they run.
const PASSES: [Pass; 9] = [
    strip_code_spans,
    strip_strong_asterisk,
    strip_emphasis_asterisk,
    strip_strong_underscore,
    strip_emphasis_underscore,
    strip_images,
    strip_links,
    strip_strikethrough,
    strip_html_tags,
];

/// Remove inline Markdown formatting from heading text.
///
/// Runs, in order: inline code (`` `x` ``), `**x**`, `*x*`, `__x__`,
/// `_x_`, images (`![alt](url)` → `alt`), links (`[text](url)` → `text`),
/// `~~x~~`, then drops anything that looks like an HTML tag. The result is
/// trimmed.
///
/// # Example
///
/// ```rust
/// use mdtoc_core::clean_heading_text;
///
/// assert_eq!(clean_heading_text("Using `cargo` **fast**"), "Using cargo fast");
/// assert_eq!(clean_heading_text("See [the docs](https://x.y)"), "See the docs");
/// ```
pub fn clean_heading_text(text: &str) -> String {
    let mut current: Cow<'_, str> = Cow::Borrowed(text);
    for pass in PASSES {
        current = chain(current, pass);
    }
    current.trim().to_string()
}

/// Apply `pass`, keeping the existing buffer when it changes nothing.
fn chain<'a>(text: Cow<'a, str>, pass: Pass) -> Cow<'a, str> {
    let replaced = match pass(&text) {
        Cow::Borrowed(_) => None,
        Cow::Owned(s) => Some(s),
    };
    match replaced {
        Some(s) => Cow::Owned(s),
        None => text,
    }
}

/// Incremental builder that copies untouched input lazily.
struct Rewriter<'a> {
    text: &'a str,
    out: Option<String>,
    /// Input consumed into `out` so far.
    copied: usize,
}

impl<'a> Rewriter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            out: None,
            copied: 0,
        }
    }

    /// Replace `text[start..end]` with `replacement`.
    fn replace(&mut self, start: usize, end: usize, replacement: &str) {
        let text = self.text;
        let out = self.out.get_or_insert_with(|| String::with_capacity(text.len()));
        out.push_str(&text[self.copied..start]);
        out.push_str(replacement);
        self.copied = end;
    }

    fn finish(self) -> Cow<'a, str> {
        match self.out {
            Some(mut out) => {
                out.push_str(&self.text[self.copied..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(self.text),
        }
    }
}

/// Unwrap `marker × width` delimited runs, keeping the inner text.
///
/// Implements the pattern `M{w}([^M]+)M{w}` for an ASCII marker byte.
fn unwrap_delimited(text: &str, marker: u8, width: usize) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut rewriter = Rewriter::new(text);
    let mut pos = 0;

    while let Some(offset) = memchr(marker, &bytes[pos..]) {
        let start = pos + offset;
        if let Some(inner_end) = delimited_end(bytes, start, marker, width) {
            let inner_start = start + width;
            rewriter.replace(start, inner_end + width, &text[inner_start..inner_end]);
            pos = inner_end + width;
        } else {
            pos = start + 1;
        }
    }

    rewriter.finish()
}

/// End of the inner text for a delimited run opening at `start`.
fn delimited_end(bytes: &[u8], start: usize, marker: u8, width: usize) -> Option<usize> {
    let inner_start = start + width;
    if !has_run(bytes, start, marker, width) || inner_start >= bytes.len() {
        return None;
    }
    let inner_end = inner_start + memchr(marker, &bytes[inner_start..])?;
    if inner_end == inner_start || !has_run(bytes, inner_end, marker, width) {
        return None;
    }
    Some(inner_end)
}

#[inline]
fn has_run(bytes: &[u8], at: usize, marker: u8, width: usize) -> bool {
    bytes
        .get(at..at + width)
        .is_some_and(|run| run.iter().all(|&b| b == marker))
}

fn strip_code_spans(text: &str) -> Cow<'_, str> {
    unwrap_delimited(text, b'`', 1)
}

fn strip_strong_asterisk(text: &str) -> Cow<'_, str> {
    unwrap_delimited(text, b'*', 2)
}

fn strip_emphasis_asterisk(text: &str) -> Cow<'_, str> {
    unwrap_delimited(text, b'*', 1)
}

fn strip_strong_underscore(text: &str) -> Cow<'_, str> {
    unwrap_delimited(text, b'_', 2)
}

fn strip_emphasis_underscore(text: &str) -> Cow<'_, str> {
    unwrap_delimited(text, b'_', 1)
}

fn strip_strikethrough(text: &str) -> Cow<'_, str> {
    unwrap_delimited(text, b'~', 2)
}

/// `![alt](url)` → `alt`. The alt text may be empty.
fn strip_images(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut rewriter = Rewriter::new(text);
    let mut pos = 0;

    while let Some(offset) = memchr(b'!', &bytes[pos..]) {
        let start = pos + offset;
        if bytes.get(start + 1) == Some(&b'[') {
            if let Some((label_end, end)) = bracket_target(bytes, start + 1, true) {
                rewriter.replace(start, end, &text[start + 2..label_end]);
                pos = end;
                continue;
            }
        }
        pos = start + 1;
    }

    rewriter.finish()
}

/// `[text](url)` → `text`.
fn strip_links(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut rewriter = Rewriter::new(text);
    let mut pos = 0;

    while let Some(offset) = memchr(b'[', &bytes[pos..]) {
        let start = pos + offset;
        if let Some((label_end, end)) = bracket_target(bytes, start, false) {
            rewriter.replace(start, end, &text[start + 1..label_end]);
            pos = end;
        } else {
            pos = start + 1;
        }
    }

    rewriter.finish()
}

/// Match `[label](target)` with `[` at `open`.
///
/// Returns the offset of the closing `]` and the offset just past `)`.
/// The label stops at the first `]`, the target at the first `)`; the
/// target must be non-empty, and so must the label unless `empty_label`.
fn bracket_target(bytes: &[u8], open: usize, empty_label: bool) -> Option<(usize, usize)> {
    let label_start = open + 1;
    let label_end = label_start + memchr(b']', bytes.get(label_start..)?)?;
    if label_end == label_start && !empty_label {
        return None;
    }
    if bytes.get(label_end + 1) != Some(&b'(') {
        return None;
    }
    let target_start = label_end + 2;
    let target_end = target_start + memchr(b')', bytes.get(target_start..)?)?;
    if target_end == target_start {
        return None;
    }
    Some((label_end, target_end + 1))
}

/// Drop `<...>` runs with a non-empty body.
fn strip_html_tags(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut rewriter = Rewriter::new(text);
    let mut pos = 0;

    while let Some(offset) = memchr(b'<', &bytes[pos..]) {
        let start = pos + offset;
        match memchr(b'>', &bytes[start + 1..]) {
            Some(len) if len > 0 => {
                let end = start + 1 + len + 1;
                rewriter.replace(start, end, "");
                pos = end;
            }
            _ => pos = start + 1,
        }
    }

    rewriter.finish()
}

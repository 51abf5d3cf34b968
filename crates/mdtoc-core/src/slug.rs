//! Anchor identifiers for headings.
//!
//! [`slugify`] reproduces the auto-identifier scheme of the HTML renderer
//! the extracted headings are paired with, so the anchors in the table of
//! contents line up with the `id` attributes in the rendered page.
//! [`AnchorIds`] resolves duplicates in the same order the page script uses
//! when it re-derives identifiers from rendered headings.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::heading::split_explicit_id;

/// Prefix for identifiers that would otherwise start with a digit.
pub const DIGIT_PREFIX: &str = "heading-";

/// Identifier used when a heading has no sluggable characters at all.
pub const FALLBACK_ID: &str = "heading";

/// Derive an anchor slug from cleaned heading text.
///
/// Each character is lower-cased on its own, one character in and one out
/// (`İ` becomes a plain `i`). Then every run of characters other than ASCII
/// letters, ASCII digits, `_` and `-` becomes a single hyphen, runs of
/// hyphens collapse to one, and leading/trailing hyphens are removed.
/// Non-ASCII letters do not survive.
///
/// # Examples
///
/// ```rust
/// use mdtoc_core::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("What's new in 2.0?"), "what-s-new-in-2-0");
/// assert_eq!(slugify("--Hello--World--"), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        let c = c.to_lowercase().next().unwrap_or(c);
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Turn a raw identifier into a valid anchor base.
///
/// Identifiers starting with an ASCII digit get [`DIGIT_PREFIX`]; an empty
/// identifier becomes [`FALLBACK_ID`].
pub fn anchor_base(id: String) -> String {
    match id.as_bytes().first() {
        None => FALLBACK_ID.to_string(),
        Some(b) if b.is_ascii_digit() => {
            debug!("prefixing digit-leading id {id:?}");
            format!("{DIGIT_PREFIX}{id}")
        }
        Some(_) => id,
    }
}

/// Per-document duplicate-identifier registry.
///
/// The first claim of a base identifier returns it unchanged. The Nth
/// repeat returns `base-N`. A candidate that some earlier claim already
/// returned (an explicit `{#id}` that looks like a suffixed one, say) is
/// skipped by advancing the counter, so every identifier handed out is
/// distinct.
///
/// Create one registry per document; it is never shared between documents.
///
/// # Example
///
/// ```rust
/// use mdtoc_core::AnchorIds;
///
/// let mut ids = AnchorIds::new();
/// assert_eq!(ids.claim("setup"), "setup");
/// assert_eq!(ids.claim("setup"), "setup-1");
/// assert_eq!(ids.claim("setup"), "setup-2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnchorIds {
    /// Claims seen so far per base identifier.
    counts: HashMap<String, usize>,
    /// Every identifier returned so far.
    issued: HashSet<String>,
}

impl AnchorIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a unique identifier derived from `base`.
    pub fn claim(&mut self, base: &str) -> String {
        let count = self.counts.entry(base.to_string()).or_insert(0);
        let mut candidate = if *count == 0 {
            base.to_string()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;

        while self.issued.contains(&candidate) {
            candidate = format!("{base}-{count}");
            *count += 1;
        }

        if candidate != base {
            debug!("duplicate id {base:?} renamed to {candidate:?}");
        }
        self.issued.insert(candidate.clone());
        candidate
    }

    /// Whether `id` has already been handed out.
    pub fn is_issued(&self, id: &str) -> bool {
        self.issued.contains(id)
    }

    /// Number of identifiers handed out.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

/// A rendered heading after its identifier has been fixed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeading {
    /// Display text, with any `{#id}` marker removed.
    pub text: String,
    /// Final identifier, or `None` if the heading carries none.
    pub id: Option<String>,
}

/// Fix up the identifier of a heading as it appears in rendered HTML.
///
/// Mirrors what the page does after rendering: a heading whose text still
/// ends in a `{#id}` marker takes that id (unless the renderer already
/// assigned one) and loses the marker from its text; ids starting with a
/// digit get [`DIGIT_PREFIX`]; duplicates go through `ids`. Headings with
/// neither a renderer id nor a marker keep no id and do not touch `ids`.
///
/// When every rendered heading carries a renderer id or a marker, feeding
/// them through this function in order yields the same identifiers as
/// [`extract_headings`] on the source. A heading with neither (say `!!!`,
/// which has nothing to slug) gets `None` here but the `heading` fallback
/// from [`extract_headings`].
///
/// [`extract_headings`]: crate::extract_headings
pub fn resolve_rendered_id(
    ids: &mut AnchorIds,
    text: &str,
    renderer_id: Option<&str>,
) -> RenderedHeading {
    let text = text.trim();
    let (text, explicit) = match split_explicit_id(text) {
        Some((rest, id)) => (rest, Some(id)),
        None => (text, None),
    };

    let id = renderer_id
        .filter(|id| !id.is_empty())
        .or(explicit)
        .map(|id| {
            let base = match id.as_bytes().first() {
                Some(b) if b.is_ascii_digit() => format!("{DIGIT_PREFIX}{id}"),
                _ => id.to_string(),
            };
            ids.claim(&base)
        });

    RenderedHeading {
        text: text.to_string(),
        id,
    }
}

//! One-call pipeline: fix, extract, nest.

use std::borrow::Cow;

use log::debug;

use crate::fixer::fix_indented_code_blocks;
use crate::heading::{extract_headings, Heading};
use crate::toc::{build_toc, TocNode};

/// Everything the presentation layer needs for one document.
///
/// `content` is the document after the indent fix and is what should be
/// handed to the HTML renderer; `headings` and `toc` are derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline<'a> {
    content: Cow<'a, [u8]>,
    headings: Vec<Heading>,
    toc: Vec<TocNode>,
}

impl<'a> Outline<'a> {
    /// Run the indent fix, heading extraction and TOC construction.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mdtoc_core::Outline;
    ///
    /// let outline = Outline::from_markdown(b"# Guide\n## Install\n## Usage\n");
    /// assert_eq!(outline.headings().len(), 3);
    /// assert_eq!(outline.toc().len(), 1);
    /// assert!(!outline.was_fixed());
    /// ```
    pub fn from_markdown(input: &'a [u8]) -> Self {
        let content = fix_indented_code_blocks(input);
        let headings = extract_headings(&content);
        let toc = build_toc(&headings);
        debug!(
            "outline: {} headings, {} top-level entries, fixed: {}",
            headings.len(),
            toc.len(),
            matches!(content, Cow::Owned(_))
        );
        Self {
            content,
            headings,
            toc,
        }
    }

    /// The document after the indent fix.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Headings in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// Top-level table-of-contents entries.
    pub fn toc(&self) -> &[TocNode] {
        &self.toc
    }

    /// Whether the indent fix changed the document.
    pub fn was_fixed(&self) -> bool {
        matches!(self.content, Cow::Owned(_))
    }

    pub fn into_parts(self) -> (Cow<'a, [u8]>, Vec<Heading>, Vec<TocNode>) {
        (self.content, self.headings, self.toc)
    }
}

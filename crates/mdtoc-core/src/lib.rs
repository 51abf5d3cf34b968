//! # mdtoc Core
//!
//! Heading extraction and table-of-contents construction for Markdown.
//!
//! The crate scans raw Markdown for ATX headings (ignoring anything inside
//! fenced code), gives each one an anchor identifier that matches the one
//! an HTML renderer assigns, and nests the result into a tree for
//! collapsible navigation. It also ships the indent fix that keeps fenced
//! code blocks inside their list items when the document is rendered.
//!
//! Nothing here performs I/O or fails: every function takes bytes or text
//! and returns owned records.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdtoc_core::{build_toc, extract_headings, fix_indented_code_blocks};
//!
//! let input = b"# Guide\n\n## Install\n\n- step\n\n  ```sh\n  make\n\n  ```\n\n## Usage\n";
//!
//! // Hand `fixed` to the renderer, derive the navigation from it too.
//! let fixed = fix_indented_code_blocks(input);
//! let headings = extract_headings(&fixed);
//! let toc = build_toc(&headings);
//!
//! assert_eq!(headings[1].id, "install");
//! assert_eq!(toc[0].children.len(), 2);
//! ```
//!
//! Or in one call with [`Outline`]:
//!
//! ```rust
//! use mdtoc_core::Outline;
//!
//! let outline = Outline::from_markdown(b"# A\n## B\n## B\n");
//! let ids: Vec<_> = outline.headings().iter().map(|h| h.id.as_str()).collect();
//! assert_eq!(ids, ["a", "b", "b-1"]);
//! ```

pub mod fence;
pub mod fixer;
pub mod heading;
pub mod inline;
pub mod lexer;
pub mod outline;
pub mod slug;
pub mod span;
pub mod toc;

pub use fence::{is_fence_boundary, next_state, Fence, FenceTracker, LineKind};
pub use fixer::fix_indented_code_blocks;
pub use heading::{extract_headings, Heading};
pub use inline::clean_heading_text;
pub use outline::Outline;
pub use slug::{resolve_rendered_id, slugify, AnchorIds, RenderedHeading};
pub use toc::{build_toc, walk, TocNode};

//! Indent fix for fenced code blocks inside list items.
//!
//! Some CommonMark-family renderers fail to keep a fenced code block inside
//! its list item when the fence is indented by only two to four spaces and
//! the block body contains blank lines. [`fix_indented_code_blocks`] shifts
//! every line of such a block two columns to the right so the renderer
//! treats it as list content.

use std::borrow::Cow;
use std::ops::RangeInclusive;

use log::debug;

use crate::fence::Fence;
use crate::lexer::Lexer;

/// Opening-fence indents that are ambiguous between list content and
/// top-level code.
pub const LIST_FENCE_INDENT: RangeInclusive<usize> = 2..=4;

/// Extra indentation added to every line of a shifted block.
const SHIFT: &[u8] = b"  ";

/// Shift list-embedded fenced code blocks two columns to the right.
///
/// A fence opens when a line outside any tracked block starts with 2–4
/// whitespace bytes followed by three or more backticks (any language tag
/// or trailing text is accepted). From then on every line, blank or not,
/// gets two leading spaces, up to and including the first bare fence line
/// with exactly the opening indent. All other lines pass through untouched.
///
/// A block that is never closed keeps shifting to the end of the input.
///
/// Returns the input borrowed when nothing needed shifting.
///
/// # Example
///
/// ```rust
/// use mdtoc_core::fix_indented_code_blocks;
///
/// let input = b"- item\n  ```\n  code\n\n  ```\n";
/// let fixed = fix_indented_code_blocks(input);
/// assert_eq!(&fixed[..], b"- item\n    ```\n    code\n  \n    ```\n");
/// ```
pub fn fix_indented_code_blocks(input: &[u8]) -> Cow<'_, [u8]> {
    let mut out: Option<Vec<u8>> = None;
    // Indent of the block currently being shifted.
    let mut open: Option<usize> = None;

    for line in Lexer::new(input) {
        let shift = match open {
            None => match Fence::parse(line.text) {
                Some(fence) if LIST_FENCE_INDENT.contains(&fence.indent) => {
                    debug!(
                        "shifting list code block opened at line {} (indent {})",
                        line.number + 1,
                        fence.indent
                    );
                    open = Some(fence.indent);
                    true
                }
                _ => false,
            },
            Some(indent) => {
                let closes = Fence::parse(line.text)
                    .is_some_and(|fence| fence.indent == indent && fence.is_bare());
                if closes {
                    debug!("list code block closed at line {}", line.number + 1);
                    open = None;
                }
                true
            }
        };

        if shift {
            let buf = out.get_or_insert_with(|| {
                let mut buf = Vec::with_capacity(input.len() + 64);
                buf.extend_from_slice(&input[..line.span.start]);
                buf
            });
            buf.extend_from_slice(SHIFT);
            buf.extend_from_slice(line.text);
        } else if let Some(buf) = out.as_mut() {
            buf.extend_from_slice(line.text);
        } else {
            continue;
        }

        if line.newline {
            if let Some(buf) = out.as_mut() {
                buf.push(b'\n');
            }
        }
    }

    if let Some(indent) = open {
        debug!("list code block with indent {indent} never closed");
    }

    match out {
        Some(buf) => Cow::Owned(buf),
        None => Cow::Borrowed(input),
    }
}

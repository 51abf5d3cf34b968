//! Line splitting with SIMD-accelerated newline scanning.
//!
//! Every component in this crate works line by line, so the lexer is the
//! single place that decides what a line is. It follows split-on-`\n`
//! semantics: the input `"a\nb\n"` yields the lines `"a"`, `"b"` and a final
//! empty line, and joining the lines back with `\n` restores the input byte
//! for byte. Carriage returns are left on the line; callers that care trim
//! them.
//!
//! # Performance
//!
//! - Zero-copy: lines borrow directly from the input
//! - Newline scanning via `memchr`
//! - Works on raw bytes, so invalid UTF-8 never stops a scan

use memchr::memchr;

use crate::span::Span;

/// A single line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line bytes, without the trailing `\n`.
    pub text: &'a [u8],
    /// Byte span of `text` in the original input.
    pub span: Span,
    /// Zero-based line index.
    pub number: usize,
    /// Whether a `\n` follows this line in the input.
    pub newline: bool,
}

impl Line<'_> {
    /// Check if this line holds nothing but spaces, tabs or a carriage return.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.text.iter().all(|&b| b == b' ' || b == b'\t' || b == b'\r')
    }
}

/// Line iterator over a byte buffer.
pub struct Lexer<'a> {
    bytes: &'a [u8],
    /// Offset of the next line start.
    offset: usize,
    number: usize,
    /// Set once the final (unterminated) line has been produced.
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            bytes: input,
            offset: 0,
            number: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Line<'a>> {
        if self.done {
            return None;
        }

        let start = self.offset;
        let (end, newline) = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => (start + pos, true),
            None => (self.bytes.len(), false),
        };

        if newline {
            self.offset = end + 1;
        } else {
            self.offset = end;
            self.done = true;
        }

        let line = Line {
            text: &self.bytes[start..end],
            span: Span::new(start, end),
            number: self.number,
            newline,
        };
        self.number += 1;
        Some(line)
    }
}

/// Iterate over the lines of `input`.
#[inline]
pub fn lines(input: &[u8]) -> Lexer<'_> {
    Lexer::new(input)
}

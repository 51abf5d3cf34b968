//! Code-fence detection.
//!
//! A fence line is any line that, after leading whitespace, starts with
//! three or more backticks. Heading and inline syntax inside a fenced block
//! is inert, so both the indent fixer and the heading extractor consult this
//! module before interpreting a line.

/// A parsed fence marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence<'a> {
    /// Number of leading whitespace bytes before the backticks.
    pub indent: usize,
    /// Number of backticks (always at least 3).
    pub ticks: usize,
    /// Everything after the backticks (language tag, trailing text).
    pub info: &'a [u8],
}

impl<'a> Fence<'a> {
    /// Minimum run of backticks that forms a fence.
    pub const MIN_TICKS: usize = 3;

    /// Parse `line` as a fence marker.
    ///
    /// Leading whitespace is space, tab, line feed, form feed or carriage
    /// return. Returns `None` if fewer than three backticks follow it.
    #[inline]
    pub fn parse(line: &'a [u8]) -> Option<Self> {
        let indent = line.iter().take_while(|b| b.is_ascii_whitespace()).count();
        let rest = &line[indent..];
        let ticks = rest.iter().take_while(|&&b| b == b'`').count();
        if ticks < Self::MIN_TICKS {
            return None;
        }
        Some(Self {
            indent,
            ticks,
            info: &rest[ticks..],
        })
    }

    /// A fence with nothing after its backticks.
    ///
    /// A lone trailing `\r` from a CRLF line ending still counts as bare.
    #[inline]
    pub fn is_bare(&self) -> bool {
        self.info.is_empty() || self.info == b"\r"
    }

    /// The language tag of an opening fence, if it starts with one.
    ///
    /// The tag is the leading run of ASCII alphanumerics and underscores.
    pub fn lang(&self) -> Option<&'a str> {
        let len = self
            .info
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        if len == 0 {
            return None;
        }
        std::str::from_utf8(&self.info[..len]).ok()
    }
}

/// Check whether `line` opens or closes a fenced code block.
#[inline]
pub fn is_fence_boundary(line: &[u8]) -> bool {
    Fence::parse(line).is_some()
}

/// Advance the "inside a fence" state by one line.
///
/// Pure: a fence boundary flips the state, any other line keeps it.
#[inline]
pub fn next_state(inside: bool, line: &[u8]) -> bool {
    if is_fence_boundary(line) {
        !inside
    } else {
        inside
    }
}

/// How a line relates to fenced code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The line is itself a fence marker.
    Fence,
    /// The line lies inside a fenced block.
    Code,
    /// Ordinary Markdown text.
    Text,
}

/// Stateful fence tracking over consecutive lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct FenceTracker {
    inside: bool,
}

impl FenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last observed line left us inside a fenced block.
    #[inline]
    pub fn inside(&self) -> bool {
        self.inside
    }

    /// Classify `line` and update the state.
    #[inline]
    pub fn observe(&mut self, line: &[u8]) -> LineKind {
        if is_fence_boundary(line) {
            self.inside = !self.inside;
            LineKind::Fence
        } else if self.inside {
            LineKind::Code
        } else {
            LineKind::Text
        }
    }
}

//! Source spans and markup locations.
//!
//! Markup nodes arrive from the external parser with a line/column
//! [`Location`]. Text inside an attribute (a binding path, a property path) is
//! addressed with byte [`Span`]s relative to the start of that text; the two
//! are combined with [`Location::offset_in`] when reporting.

use std::fmt;

/// Byte range inside a parsed text value.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from the start of the text
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from a byte range, saturating offsets that exceed `u32::MAX`.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        let start = u32::try_from(range.start).unwrap_or(u32::MAX);
        let end = u32::try_from(range.end).unwrap_or(u32::MAX);
        Span { start, end }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Convert to a `std::ops::Range`.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// 1-based line/column position of a markup node.
///
/// `Location::UNKNOWN` (0:0) marks nodes synthesized by the compiler that
/// have no source position of their own.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// Position of synthesized nodes.
    pub const UNKNOWN: Location = Location { line: 0, column: 0 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Location { line, column }
    }

    /// Whether this location points into real source text.
    #[inline]
    pub const fn is_known(&self) -> bool {
        self.line != 0
    }

    /// Advance the column by `offset` characters.
    ///
    /// Attribute values are single-line in practice. Unknown locations stay
    /// unknown.
    #[inline]
    #[must_use]
    pub fn offset_by(self, offset: u32) -> Location {
        if !self.is_known() {
            return self;
        }
        Location {
            line: self.line,
            column: self.column.saturating_add(offset),
        }
    }

    /// Location of the byte offset `offset` inside `text`, where `text`
    /// starts here. Columns count characters, not bytes.
    #[must_use]
    pub fn offset_in(self, text: &str, offset: u32) -> Location {
        let chars = text
            .char_indices()
            .take_while(|&(i, _)| i < offset as usize)
            .count();
        self.offset_by(u32::try_from(chars).unwrap_or(u32::MAX))
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Location, Span};
    crate::static_assert_size!(Span, 8);
    crate::static_assert_size!(Location, 8);
}

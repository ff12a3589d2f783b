//! Byte-offset spans into the source text.

use std::fmt;

/// Half-open byte range `[start, end)` into the source.
///
/// Layout: 8 bytes. Sources are limited to `u32::MAX` bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Zero-width span at `offset`.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Span from the start of `first` to the end of `last`.
    ///
    /// Used for nodes whose children are ordered by position.
    #[inline]
    #[must_use]
    pub fn cover(first: Span, last: Span) -> Span {
        Span {
            start: first.start,
            end: last.end.max(first.start),
        }
    }

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

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic() {
        let span = Span::new(3, 9);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::point(7).is_empty());
    }

    #[test]
    fn test_span_cover() {
        assert_eq!(
            Span::cover(Span::new(4, 8), Span::new(12, 15)),
            Span::new(4, 15)
        );
    }

    #[test]
    fn test_span_cover_zero_width_tail() {
        // a missing child at the end of its parent
        assert_eq!(
            Span::cover(Span::new(4, 8), Span::point(8)),
            Span::new(4, 8)
        );
    }

    #[test]
    fn test_span_formatting() {
        let span = Span::new(10, 20);
        assert_eq!(span.to_range(), 10..20);
        assert_eq!(format!("{span:?}"), "10..20");
        assert_eq!(format!("{span}"), "10..20");
    }
}

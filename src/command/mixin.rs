//! Byte spans of the chart source, attached to tokens, warnings and errors.

use std::ops::Range;

/// A value together with the byte span of the source text it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRangeMixin<T> {
    /// Wrapped content value
    content: T,
    /// Start index in the source string (0-based, inclusive)
    start: usize,
    /// End index in the source string (0-based, exclusive)
    end: usize,
}

impl<T> SourceRangeMixin<T> {
    /// Wraps `content` with the span `start..end`.
    pub const fn new(content: T, start: usize, end: usize) -> Self {
        Self {
            content,
            start,
            end,
        }
    }

    /// Returns the wrapped content.
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Drops the span.
    pub fn into_content(self) -> T {
        self.content
    }

    /// Returns the source span as a tuple of (start, end).
    pub const fn as_span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Returns the source span as a range.
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Maps the content of the wrapper.
    pub fn map<U, F>(self, f: F) -> SourceRangeMixin<U>
    where
        F: FnOnce(T) -> U,
    {
        SourceRangeMixin::new(f(self.content), self.start, self.end)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for SourceRangeMixin<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at indices [{}, {})",
            self.content, self.start, self.end
        )
    }
}

impl<T: std::error::Error + 'static> std::error::Error for SourceRangeMixin<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.content)
    }
}

/// Extension methods to wrap any value into a [`SourceRangeMixin`].
pub trait SourceRangeMixinExt: Sized {
    /// Wraps `self` with the given span.
    fn into_wrapper_range(self, range: Range<usize>) -> SourceRangeMixin<Self> {
        SourceRangeMixin::new(self, range.start, range.end)
    }

    /// Wraps `self` with the span of another wrapper.
    fn into_wrapper<U>(self, other: &SourceRangeMixin<U>) -> SourceRangeMixin<Self> {
        SourceRangeMixin::new(self, other.start, other.end)
    }
}

impl<T> SourceRangeMixinExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_and_maps() {
        let wrapped = "1 0 2 120".into_wrapper_range(4..13);
        assert_eq!(wrapped.as_span(), (4, 13));
        let mapped = wrapped.map(str::len);
        assert_eq!(*mapped.content(), 9);
        assert_eq!(mapped.range(), 4..13);
        assert_eq!(mapped.to_string(), "9 at indices [4, 13)");
    }
}

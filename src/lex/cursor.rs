//! Line cursor over the chart source.

/// A line-wise cursor over the chart source.
pub struct Cursor<'a> {
    /// The line position, starts with 1.
    line: usize,
    /// The index position.
    index: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `source`.
    pub const fn new(source: &'a str) -> Self {
        Self {
            line: 1,
            index: 0,
            source,
        }
    }

    /// Whether every line has been read.
    pub const fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }

    /// The line number of the next line to be read, starts with 1.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Determine the end of the current line and handle CRLF (\r\n) correctly.
    ///
    /// Returns a tuple `(remaining_end, line_end_index)` where:
    /// - `remaining_end` is the byte offset from current `index` to the first `\n` if any,
    ///   otherwise the remaining source length from `index` to the end.
    /// - `line_end_index` is the absolute byte index where the line content ends (exclusive),
    ///   excluding a `\r` right before the `\n`.
    fn current_line_bounds(&self) -> (usize, usize) {
        let rest = self.source.get(self.index..).unwrap_or("");
        let remaining_end = rest.find('\n').unwrap_or(rest.len());
        let line = rest.get(..remaining_end).unwrap_or("");
        let line_end_index = self.index + line.strip_suffix('\r').unwrap_or(line).len();
        (remaining_end, line_end_index)
    }

    /// Move cursor through the current line, and return it with its byte range. The trailing line
    /// feed is consumed but not returned.
    pub fn next_line_with_range(&mut self) -> Option<(std::ops::Range<usize>, &'a str)> {
        if self.is_end() {
            return None;
        }
        let (remaining_end, line_end_index) = self.current_line_bounds();
        let range = self.index..line_end_index;
        let line = self.source.get(range.clone()).unwrap_or("");
        self.index += remaining_end + 1;
        self.line += 1;
        Some((range, line))
    }
}

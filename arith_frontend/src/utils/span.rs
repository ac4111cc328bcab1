//! Source locations for tokens and diagnostics
//!
//! Offsets are byte offsets into the source text; lines and columns are
//! 1-based and count characters.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Position just after `ch`
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self::new(self.offset + 1, self.line + 1, 1)
        } else {
            Self::new(self.offset + ch.len_utf8(), self.line, self.column + 1)
        }
    }

    /// Position just after every character of `text`
    pub fn advance_str(self, text: &str) -> Self {
        text.chars().fold(self, Position::advance)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range of source text: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    /// Zero-width span at `pos`
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Placeholder span for values with no source location
    pub fn dummy() -> Self {
        Self::point(Position::start())
    }

    /// Smallest span covering both
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text covered by this span
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start.offset..self.end.offset]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over a source text, used to render diagnostics
#[derive(Debug, Clone)]
pub struct SourceMap {
    source: String,
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resolve a byte offset to a full position
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Text of a 1-based line, without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Cargo-style rendering of `message` pointing at `span`
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut out = format!("error: {}\n", message);
        out.push_str(&format!("  --> {}:{}\n", span.start.line, span.start.column));

        if let Some(line) = self.get_line(span.start.line) {
            let gutter = span.start.line.to_string();
            let pad = " ".repeat(gutter.len());

            let width = if span.start.line == span.end.line {
                span.end.column.saturating_sub(span.start.column) as usize
            } else {
                line.chars().count() + 1 - span.start.column as usize
            };

            out.push_str(&format!("{} |\n", pad));
            out.push_str(&format!("{} | {}\n", gutter, line));
            out.push_str(&format!(
                "{} | {}{}\n",
                pad,
                " ".repeat(span.start.column as usize - 1),
                "^".repeat(width.max(1))
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_lines() {
        let pos = Position::start().advance_str("1 +\n 2");
        assert_eq!(pos, Position::new(6, 2, 3));
    }

    #[test]
    fn test_span_slice_and_merge() {
        let source = "12.5 + 3.0";
        let a = Span::new(Position::start(), Position::new(4, 1, 5));
        let b = Span::new(Position::new(7, 1, 8), Position::new(10, 1, 11));

        assert_eq!(a.slice(source), "12.5");
        assert_eq!(a.merge(b).slice(source), source);
        assert_eq!(a.to_string(), "1:1-5");
    }

    #[test]
    fn test_source_map_positions() {
        let map = SourceMap::new("1.0 +\n  2.0");
        assert_eq!(map.position_at(0), Position::new(0, 1, 1));
        assert_eq!(map.position_at(8), Position::new(8, 2, 3));
        assert_eq!(map.get_line(2), Some("  2.0"));
        assert_eq!(map.get_line(3), None);
        assert_eq!(map.get_line(0), None);
    }

    #[test]
    fn test_format_error_underlines_span() {
        let map = SourceMap::new("1.0 @ 2.0");
        let start = map.position_at(4);
        let span = Span::new(start, start.advance('@'));

        let rendered = map.format_error(&span, "unrecognized input");
        assert!(rendered.starts_with("error: unrecognized input\n  --> 1:5\n"));
        assert!(rendered.contains("1 | 1.0 @ 2.0\n"));
        assert!(rendered.ends_with("  |     ^\n"));
    }
}

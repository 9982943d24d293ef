//! Source files, locations, spans and recoverable parse errors.
//!
//! Every fragment parser in this package reports positions through these
//! types. A `ParseSourceFile` is shared behind an `Arc` so that locations
//! and spans stay cheap to clone while a single fragment is being parsed
//! and visited.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<String>, url: impl Into<String>) -> Arc<Self> {
        Arc::new(ParseSourceFile {
            content: content.into(),
            url: url.into(),
        })
    }
}

/// Convert a byte offset into a zero-based `(line, col)` pair.
pub fn line_col_at(content: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let before = &content[..offset];
    let line = before.bytes().filter(|b| *b == b'\n').count();
    let col = match before.rfind('\n') {
        Some(nl) => offset - nl - 1,
        None => offset,
    };
    (line, col)
}

/// Convert a zero-based `(line, col)` pair back into a byte offset.
///
/// A column past the end of its line clamps to the line end; a line past
/// the end of the content clamps to the content length.
pub fn offset_at(content: &str, line: usize, col: usize) -> usize {
    let mut start = 0usize;
    for _ in 0..line {
        match content[start..].find('\n') {
            Some(nl) => start += nl + 1,
            None => return content.len(),
        }
    }
    let line_end = content[start..]
        .find('\n')
        .map_or_else(|| content.len(), |nl| start + nl);
    (start + col).min(line_end)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseLocation {
    pub file: Arc<ParseSourceFile>,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: Arc<ParseSourceFile>, offset: usize) -> Self {
        let (line, col) = line_col_at(&file.content, offset);
        ParseLocation { file, offset, line, col }
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    pub fn from_offsets(file: &Arc<ParseSourceFile>, start: usize, end: usize) -> Self {
        ParseSourceSpan {
            start: ParseLocation::new(file.clone(), start),
            end: ParseLocation::new(file.clone(), end),
        }
    }

    pub fn text(&self) -> &str {
        &self.start.file.content[self.start.offset..self.end.offset]
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }

    pub fn warning(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Warning,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.msg, self.span.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_round_trip() {
        let content = "first\nsecond\nthird";
        assert_eq!(line_col_at(content, 0), (0, 0));
        assert_eq!(line_col_at(content, 6), (1, 0));
        assert_eq!(line_col_at(content, 8), (1, 2));
        assert_eq!(offset_at(content, 1, 2), 8);
        assert_eq!(offset_at(content, 2, 0), 13);
    }

    #[test]
    fn test_offset_clamps_to_line_end() {
        let content = "ab\ncd";
        assert_eq!(offset_at(content, 0, 10), 2);
        assert_eq!(offset_at(content, 9, 0), content.len());
    }

    #[test]
    fn test_span_text() {
        let file = ParseSourceFile::new("<div></div>", "test.html");
        let span = ParseSourceSpan::from_offsets(&file, 1, 4);
        assert_eq!(span.text(), "div");
        assert_eq!(span.len(), 3);
    }
}

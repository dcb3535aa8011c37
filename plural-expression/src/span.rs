use std::fmt;

/// Location of a token in the expression source.
///
/// `line` and `column` are 1-based and count characters, `start` and `end`
/// are byte offsets into the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Moves a cursor (a zero-width span) past `text`, tracking line breaks.
    pub fn advance(self, text: &str) -> Self {
        let offset = self.end + text.len();
        let mut next = Self {
            start: offset,
            end: offset,
            ..self
        };
        for ch in text.chars() {
            if ch == '\n' {
                next.line += 1;
                next.column = 1;
            } else {
                next.column += 1;
            }
        }
        next
    }

    /// Span covering `len` bytes starting where `self` ends.
    pub fn following(self, len: usize) -> Self {
        Self {
            start: self.end,
            end: self.end + len,
            ..self
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            start: 0,
            end: 0,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

use std::fmt::{self, Display, Formatter};
use unicode_width::UnicodeWidthStr;

/// A single rendered line of markdown. Pieces are appended as inline
/// content is written out; prefixes are inserted in front when the line is
/// nested inside a quote or list item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    buf: String,
}

impl Line {
    pub fn new() -> Self {
        Line { buf: String::new() }
    }

    pub fn from_str(s: &str) -> Self {
        Line { buf: s.to_owned() }
    }

    /// Append text to the end of the line.
    pub fn push<S: AsRef<str>>(&mut self, s: S) -> &mut Self {
        self.buf.push_str(s.as_ref());
        self
    }

    /// Insert text at the start of the line.
    pub fn prepend<S: AsRef<str>>(&mut self, s: S) -> &mut Self {
        self.buf.insert_str(0, s.as_ref());
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_blank(&self) -> bool {
        self.buf.trim().is_empty()
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.buf.as_str())
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line::from_str(s)
    }
}

impl From<String> for Line {
    fn from(buf: String) -> Self {
        Line { buf }
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

use super::Line;
use std::fmt::{self, Display, Formatter, Write};

// Empty lines only take the visible part of a prefix, so nesting never
// leaves trailing whitespace.
fn prefix_line(line: &mut Line, prefix: &str) {
    if line.as_str().is_empty() {
        line.prepend(prefix.trim_end());
    } else {
        line.prepend(prefix);
    }
}

/// A block of rendered lines. Operations mutate in place and return
/// `&mut Self` so nesting (quotes, list items, code indentation) can be
/// applied as a chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    lines: Vec<Line>,
    // Lines emitted after the main body (reference link definitions). They
    // take part in prefixing so definitions inside a quote stay quoted.
    suffix: Vec<Line>,
}

impl Region {
    pub fn new() -> Self {
        Region::default()
    }

    /// Split a multiline string on `\n`. An empty string gives an empty region.
    pub fn from_str(s: &str) -> Self {
        let lines = if s.is_empty() {
            Vec::new()
        } else {
            s.split('\n').map(Line::from_str).collect()
        };
        Region {
            lines,
            suffix: Vec::new(),
        }
    }

    pub fn push_back_line(&mut self, line: Line) -> &mut Self {
        self.lines.push(line);
        self
    }

    pub fn push_back_suffix_line(&mut self, line: Line) -> &mut Self {
        self.suffix.push(line);
        self
    }

    /// Append every line of `other`, suffix included, to the main body.
    pub fn append(&mut self, other: Region) -> &mut Self {
        self.lines.extend(other.into_lines());
        self
    }

    pub fn prefix_each_line(&mut self, prefix: &str) -> &mut Self {
        for line in self.lines.iter_mut().chain(self.suffix.iter_mut()) {
            prefix_line(line, prefix);
        }
        self
    }

    pub fn indent_each_line(&mut self, n: usize) -> &mut Self {
        if n > 0 {
            let pad = " ".repeat(n);
            self.prefix_each_line(&pad);
        }
        self
    }

    /// Prefix the first line and indent the rest so they line up under the
    /// text after the prefix: `"- "` on `["a", "b"]` gives `["- a", "  b"]`.
    pub fn prefix_first_then_indent_rest(&mut self, prefix: &str) -> &mut Self {
        let pad = " ".repeat(prefix.chars().count());
        let mut rest = self.lines.iter_mut().chain(self.suffix.iter_mut());
        if let Some(first) = rest.next() {
            first.prepend(prefix);
        }
        for line in rest {
            prefix_line(line, &pad);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.suffix.is_empty()
    }

    /// Write the lines joined by `\n` (no trailing newline).
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        for (i, line) in self.lines.iter().chain(self.suffix.iter()).enumerate() {
            if i > 0 {
                out.write_char('\n')?;
            }
            out.write_str(line.as_str())?;
        }
        Ok(())
    }

    pub fn into_lines(self) -> Vec<Line> {
        let mut out = self.lines;
        out.extend(self.suffix);
        out
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

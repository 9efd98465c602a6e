use crate::ast::inline::Inline;
use crate::text::Region;
use pulldown_cmark::{Alignment, CodeBlockKind, HeadingLevel};

/// A markdown heading: its rank and inline content.
#[derive(Clone, Debug, PartialEq)]
pub struct Heading {
    pub level: HeadingLevel,
    pub id: Option<String>,
    pub children: Vec<Inline>,
}

impl Heading {
    pub fn new(level: HeadingLevel, children: Vec<Inline>) -> Self {
        Heading {
            level,
            id: None,
            children,
        }
    }

    /// Markdown rank, `#` = 1.
    pub fn depth(&self) -> usize {
        match self.level {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }

    /// Zero-based nesting level (`depth - 1`).
    pub fn level(&self) -> usize {
        self.depth() - 1
    }

    /// Text content with all markup removed.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for c in &self.children {
            c.push_plain_text(&mut out);
        }
        out
    }
}

/// Block level AST nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading(Heading),
    BlockQuote(Vec<Block>),
    CodeBlock {
        kind: CodeBlockKind<'static>,
        content: Region,
    },
    HtmlBlock(Region),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Item(Vec<Block>),
    Rule,
    /// Alignments and rows; the first row is the header.
    Table(Vec<Alignment>, Vec<Vec<Vec<Inline>>>),
    /// Only seen while a table is being parsed.
    TableRow(Vec<Vec<Inline>>),
}

impl Block {
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading(_))
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Block::Heading(h) => Some(h),
            _ => None,
        }
    }

    /// Visit every inline directly owned by this block or any nested block.
    pub fn for_each_inline<'a>(&'a self, f: &mut dyn FnMut(&'a Inline)) {
        match self {
            Block::Paragraph(inls) => inls.iter().for_each(|i| f(i)),
            Block::Heading(h) => h.children.iter().for_each(|i| f(i)),
            Block::BlockQuote(children) | Block::Item(children) => {
                for b in children {
                    b.for_each_inline(f);
                }
            }
            Block::List { items, .. } => {
                for b in items.iter().flatten() {
                    b.for_each_inline(f);
                }
            }
            Block::Table(_, rows) => {
                for cell in rows.iter().flatten() {
                    cell.iter().for_each(|i| f(i));
                }
            }
            Block::TableRow(cells) => {
                for cell in cells {
                    cell.iter().for_each(|i| f(i));
                }
            }
            Block::CodeBlock { .. } | Block::HtmlBlock(_) | Block::Rule => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_are_zero_based() {
        let h = Heading::new(HeadingLevel::H3, vec![Inline::Text("x".into())]);
        assert_eq!(h.depth(), 3);
        assert_eq!(h.level(), 2);
    }

    #[test]
    fn plain_text_drops_markup() {
        let h = Heading::new(
            HeadingLevel::H2,
            vec![
                Inline::Code("tool run".into()),
                Inline::Text(" ".into()),
                Inline::Emphasis(vec![Inline::Text("fast".into())]),
            ],
        );
        assert_eq!(h.plain_text(), "tool run fast");
    }
}

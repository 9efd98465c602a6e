use pulldown_cmark::LinkType;

/// Inline level AST nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Inline {
    Text(String),
    Code(String),
    Html(String),
    SoftBreak,
    HardBreak,
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        link_type: LinkType,
        dest: String,
        title: String,
        id: String,
        children: Vec<Inline>,
    },
    Image {
        link_type: LinkType,
        dest: String,
        title: String,
        id: String,
        children: Vec<Inline>,
    },
}

impl Inline {
    /// Child inlines of container nodes; empty for leaves.
    pub fn children(&self) -> &[Inline] {
        match self {
            Inline::Emphasis(c)
            | Inline::Strong(c)
            | Inline::Strikethrough(c)
            | Inline::Link { children: c, .. }
            | Inline::Image { children: c, .. } => c,
            _ => &[],
        }
    }

    pub(crate) fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(s) | Inline::Code(s) => out.push_str(s),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
            Inline::Html(_) => {}
            _ => {
                for c in self.children() {
                    c.push_plain_text(out);
                }
            }
        }
    }

    /// True for text that renders as nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(s) => s.trim().is_empty(),
            Inline::SoftBreak | Inline::HardBreak => true,
            _ => false,
        }
    }
}

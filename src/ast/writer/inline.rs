use crate::ast::Inline;
use crate::text::Line;
use pulldown_cmark::LinkType;

/// A reference definition (`[id]: dest "title"`) that must be emitted after
/// the block containing a reference-style link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefDef {
    pub id: String,
    pub dest: String,
    pub title: String,
}

impl RefDef {
    pub fn to_line(&self) -> Line {
        if self.title.is_empty() {
            Line::from(format!("[{}]: {}", self.id, self.dest))
        } else {
            Line::from(format!("[{}]: {} \"{}\"", self.id, self.dest, self.title))
        }
    }
}

fn code_span(s: &str) -> String {
    let ticks = if s.contains('`') { "``" } else { "`" };
    let pad = if s.starts_with('`') || s.ends_with('`') { " " } else { "" };
    format!("{ticks}{pad}{s}{pad}{ticks}")
}

fn write_children(line: &mut Line, children: &[Inline], defs: &mut Vec<RefDef>) {
    for c in children {
        write_inline(line, c, defs);
    }
}

fn link_label(children: &[Inline], defs: &mut Vec<RefDef>) -> String {
    let mut inner = Line::new();
    write_children(&mut inner, children, defs);
    inner.into_string()
}

fn push_def(defs: &mut Vec<RefDef>, id: &str, dest: &str, title: &str) {
    if !defs.iter().any(|d| d.id == id) {
        defs.push(RefDef {
            id: id.to_string(),
            dest: dest.to_string(),
            title: title.to_string(),
        });
    }
}

/// Render one inline node onto `line`. Hard breaks and display content may
/// embed `\n`; the block writer splits on it.
pub fn write_inline(line: &mut Line, inl: &Inline, defs: &mut Vec<RefDef>) {
    match inl {
        Inline::Text(s) | Inline::Html(s) => {
            line.push(s);
        }
        Inline::Code(s) => {
            line.push(code_span(s));
        }
        Inline::SoftBreak => {
            line.push(" ");
        }
        Inline::HardBreak => {
            line.push("  \n");
        }
        Inline::Emphasis(children) => {
            line.push("*");
            write_children(line, children, defs);
            line.push("*");
        }
        Inline::Strong(children) => {
            line.push("**");
            write_children(line, children, defs);
            line.push("**");
        }
        Inline::Strikethrough(children) => {
            line.push("~~");
            write_children(line, children, defs);
            line.push("~~");
        }
        Inline::Link {
            link_type,
            dest,
            title,
            id,
            children,
        } => {
            let inner = link_label(children, defs);
            match link_type {
                LinkType::Reference if !id.is_empty() => {
                    line.push(format!("[{inner}][{id}]"));
                    push_def(defs, id, dest, title);
                }
                LinkType::Shortcut | LinkType::Collapsed if !id.is_empty() => {
                    line.push(format!("[{inner}]"));
                    push_def(defs, id, dest, title);
                }
                LinkType::Autolink | LinkType::Email => {
                    line.push(format!("<{dest}>"));
                }
                _ => {
                    let safe_dest = dest
                        .replace('\\', "\\\\")
                        .replace('(', "\\(")
                        .replace(')', "\\)");
                    if title.is_empty() {
                        line.push(format!("[{inner}]({safe_dest})"));
                    } else {
                        let safe_title = title.replace('\\', "\\\\").replace('"', "\\\"");
                        line.push(format!("[{inner}]({safe_dest} \"{safe_title}\")"));
                    }
                }
            }
        }
        Inline::Image {
            link_type,
            dest,
            title,
            id,
            children,
        } => {
            let inner = link_label(children, defs);
            match link_type {
                LinkType::Reference if !id.is_empty() => {
                    line.push(format!("![{inner}][{id}]"));
                    push_def(defs, id, dest, title);
                }
                LinkType::Shortcut | LinkType::Collapsed if !id.is_empty() => {
                    line.push(format!("![{inner}]"));
                    push_def(defs, id, dest, title);
                }
                _ if title.is_empty() => {
                    line.push(format!("![{inner}]({dest})"));
                }
                _ => {
                    line.push(format!("![{inner}]({dest} \"{title}\")"));
                }
            }
        }
    }
}

/// Render a run of inlines as a single line of markdown text.
pub fn inlines_to_line(inlines: &[Inline], defs: &mut Vec<RefDef>) -> Line {
    let mut line = Line::new();
    write_children(&mut line, inlines, defs);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(inls: &[Inline]) -> String {
        let mut defs = Vec::new();
        inlines_to_line(inls, &mut defs).into_string()
    }

    #[test]
    fn code_spans_pick_fence() {
        assert_eq!(render(&[Inline::Code("a`b".into())]), "``a`b``");
        assert_eq!(render(&[Inline::Code("tool run".into())]), "`tool run`");
    }

    #[test]
    fn reference_links_emit_definitions() {
        let link = Inline::Link {
            link_type: LinkType::Reference,
            dest: "./docs/api.md".into(),
            title: String::new(),
            id: "api".into(),
            children: vec![Inline::Text("API".into())],
        };
        let mut defs = Vec::new();
        let line = inlines_to_line(&[link.clone(), link], &mut defs);
        assert_eq!(line.as_str(), "[API][api][API][api]");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].to_line().as_str(), "[api]: ./docs/api.md");
    }

    #[test]
    fn inline_links_escape_parens() {
        let link = Inline::Link {
            link_type: LinkType::Inline,
            dest: "a(b).md".into(),
            title: "t".into(),
            id: String::new(),
            children: vec![Inline::Strong(vec![Inline::Text("x".into())])],
        };
        assert_eq!(render(&[link]), "[**x**](a\\(b\\).md \"t\")");
    }
}

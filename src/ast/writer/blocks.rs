use crate::ast::{Block, Heading, Inline};
use crate::text::{Line, Region};
use pulldown_cmark::{Alignment, CodeBlockKind};
use unicode_width::UnicodeWidthStr;

use super::inline::{RefDef, inlines_to_line};
use super::utils::{delimiter_cell, pad_to_width};

// Split rendered inline text on embedded newlines into region lines.
fn push_split(r: &mut Region, text: &str) {
    for part in text.split('\n') {
        r.push_back_line(Line::from_str(part));
    }
}

fn push_defs(r: &mut Region, defs: Vec<RefDef>) {
    if defs.is_empty() {
        return;
    }
    r.push_back_suffix_line(Line::new());
    for d in defs {
        r.push_back_suffix_line(d.to_line());
    }
}

fn render_paragraph(inls: &[Inline]) -> Region {
    let mut r = Region::new();
    let mut defs = Vec::new();
    let line = inlines_to_line(inls, &mut defs);
    push_split(&mut r, line.as_str());
    push_defs(&mut r, defs);
    r
}

pub(crate) fn render_heading(h: &Heading) -> Region {
    let mut defs = Vec::new();
    let mut line = inlines_to_line(&h.children, &mut defs);
    line.prepend(format!("{} ", "#".repeat(h.depth())));
    // a heading is a single line; breaks collapse to spaces
    let mut r = Region::new();
    r.push_back_line(Line::from(line.as_str().replace("  \n", " ")));
    push_defs(&mut r, defs);
    r
}

fn render_codeblock(kind: &CodeBlockKind<'static>, content: &Region) -> Region {
    let mut r = Region::new();
    match kind {
        CodeBlockKind::Fenced(lang) => {
            let text = content.to_string();
            let mut longest = 0usize;
            let mut run = 0usize;
            for ch in text.chars() {
                run = if ch == '`' { run + 1 } else { 0 };
                longest = longest.max(run);
            }
            let fence = "`".repeat((longest + 1).max(3));
            r.push_back_line(Line::from(format!("{fence}{lang}")));
            r.append(content.clone());
            r.push_back_line(Line::from(fence));
        }
        CodeBlockKind::Indented => {
            let mut inner = content.clone();
            inner.indent_each_line(4);
            r.append(inner);
        }
    }
    r
}

// Children separated by blank lines, as in a quote or list item body.
fn render_children(children: &[Block]) -> Region {
    let mut inner = Region::new();
    for (i, b) in children.iter().enumerate() {
        if i > 0 {
            inner.push_back_line(Line::new());
        }
        inner.append(block_to_region(b));
    }
    inner
}

fn render_blockquote(children: &[Block]) -> Region {
    let mut inner = render_children(children);
    inner.prefix_each_line("> ");
    inner
}

fn render_list(start: Option<u64>, items: &[Vec<Block>]) -> Region {
    let mut r = Region::new();
    for (i, item) in items.iter().enumerate() {
        let marker = match start {
            Some(n) => format!("{}. ", n + i as u64),
            None => "- ".to_string(),
        };
        let mut item_region = render_children(item);
        if item_region.is_empty() {
            item_region.push_back_line(Line::new());
        }
        item_region.prefix_first_then_indent_rest(&marker);
        r.append(item_region);
    }
    r
}

fn render_table(aligns: &[Alignment], rows: &[Vec<Vec<Inline>>]) -> Region {
    let mut reg = Region::new();
    let cols = aligns
        .len()
        .max(rows.iter().map(|r| r.len()).max().unwrap_or(0));
    if cols == 0 || rows.is_empty() {
        return reg;
    }

    let mut defs = Vec::new();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..cols)
                .map(|c| match row.get(c) {
                    Some(cell) => inlines_to_line(cell, &mut defs)
                        .into_string()
                        .replace('\n', " ")
                        .replace('|', "\\|"),
                    None => String::new(),
                })
                .collect()
        })
        .collect();

    let mut widths = vec![3usize; cols];
    for row in &cells {
        for (c, text) in row.iter().enumerate() {
            widths[c] = widths[c].max(UnicodeWidthStr::width(text.as_str()));
        }
    }

    let join = |parts: Vec<String>| Line::from(format!("| {} |", parts.join(" | ")));
    let row_line = |row: &Vec<String>| {
        join(
            row.iter()
                .enumerate()
                .map(|(c, text)| pad_to_width(text, widths[c], aligns.get(c)))
                .collect(),
        )
    };

    reg.push_back_line(row_line(&cells[0]));
    reg.push_back_line(join(
        (0..cols)
            .map(|c| delimiter_cell(widths[c], aligns.get(c)))
            .collect(),
    ));
    for row in &cells[1..] {
        reg.push_back_line(row_line(row));
    }
    push_defs(&mut reg, defs);
    reg
}

pub fn block_to_region(b: &Block) -> Region {
    match b {
        Block::Paragraph(inls) => render_paragraph(inls),
        Block::Heading(h) => render_heading(h),
        Block::CodeBlock { kind, content } => render_codeblock(kind, content),
        Block::HtmlBlock(r) => r.clone(),
        Block::BlockQuote(children) => render_blockquote(children),
        Block::Item(children) => render_children(children),
        Block::List { start, items } => render_list(*start, items),
        Block::Rule => Region::from_str("---"),
        Block::Table(aligns, rows) => render_table(aligns, rows),
        Block::TableRow(cells) => render_table(&[], std::slice::from_ref(cells)),
    }
}

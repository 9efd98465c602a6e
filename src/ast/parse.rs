use crate::ast::block::{Block, Heading};
use crate::ast::inline::Inline;
use crate::text::Region;
use pulldown_cmark::{Event, Options, Parser, Tag};

/// Extensions enabled when parsing README-style documents.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parse markdown source into a flat list of top-level blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    let events: Vec<Event> = Parser::new_ext(markdown, parser_options()).collect();
    parse_events_to_blocks(&events)
}

// One open Start/End pair while walking the event stream.
struct Frame<'a> {
    tag: Tag<'a>,
    inlines: Vec<Inline>,
    blocks: Vec<Block>,
    collect_inlines: bool,
}

impl Frame<'_> {
    // Inline content reaching a block container (tight list items) is
    // gathered into a trailing paragraph so runs of text stay together.
    fn push_inline(&mut self, inl: Inline) {
        if self.collect_inlines {
            self.inlines.push(inl);
            return;
        }
        match self.blocks.last_mut() {
            Some(Block::Paragraph(inls)) => inls.push(inl),
            _ => self.blocks.push(Block::Paragraph(vec![inl])),
        }
    }

    fn push_block(&mut self, b: Block) {
        match b {
            // span containers collapse into the surrounding inline run
            Block::Paragraph(inls) if self.collect_inlines => self.inlines.extend(inls),
            other => self.blocks.push(other),
        }
    }
}

fn collects_inlines(tag: &Tag) -> bool {
    matches!(
        tag,
        Tag::Paragraph
            | Tag::Heading { .. }
            | Tag::CodeBlock(_)
            | Tag::HtmlBlock
            | Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::Subscript
            | Tag::Superscript
            | Tag::Link { .. }
            | Tag::Image { .. }
            | Tag::TableCell
            | Tag::MetadataBlock(_)
    )
}

fn raw_text(inlines: Vec<Inline>) -> String {
    let mut combined = String::new();
    for inl in inlines {
        match inl {
            Inline::Text(s) | Inline::Html(s) | Inline::Code(s) => combined.push_str(&s),
            Inline::SoftBreak | Inline::HardBreak => combined.push('\n'),
            _ => {}
        }
    }
    combined
}

enum Closed {
    Block(Block),
    Inline(Inline),
}

fn close_frame(frame: Frame) -> Closed {
    let Frame {
        tag,
        inlines,
        blocks,
        ..
    } = frame;
    let block = match tag {
        Tag::Paragraph => Block::Paragraph(inlines),
        Tag::Heading { level, id, .. } => Block::Heading(Heading {
            level,
            id: id.map(|c| c.to_string()),
            children: inlines,
        }),
        Tag::BlockQuote(_) => Block::BlockQuote(blocks),
        Tag::CodeBlock(kind) => {
            let mut text = raw_text(inlines);
            if text.ends_with('\n') {
                text.pop();
            }
            Block::CodeBlock {
                kind: kind.into_static(),
                content: Region::from_str(&text),
            }
        }
        Tag::HtmlBlock => {
            let text = raw_text(inlines);
            Block::HtmlBlock(Region::from_str(text.trim_end_matches('\n')))
        }
        Tag::List(start) => {
            let items = blocks
                .into_iter()
                .map(|b| match b {
                    Block::Item(children) => children,
                    other => vec![other],
                })
                .collect();
            Block::List { start, items }
        }
        Tag::Item => Block::Item(blocks),
        Tag::Table(aligns) => {
            let rows = blocks
                .into_iter()
                .filter_map(|b| match b {
                    Block::TableRow(cells) => Some(cells),
                    Block::Paragraph(inls) => Some(vec![inls]),
                    _ => None,
                })
                .collect();
            Block::Table(aligns, rows)
        }
        Tag::TableHead | Tag::TableRow => Block::TableRow(
            blocks
                .into_iter()
                .filter_map(|b| match b {
                    Block::Paragraph(inls) => Some(inls),
                    _ => None,
                })
                .collect(),
        ),
        Tag::Emphasis => return Closed::Inline(Inline::Emphasis(inlines)),
        Tag::Strong => return Closed::Inline(Inline::Strong(inlines)),
        Tag::Strikethrough => return Closed::Inline(Inline::Strikethrough(inlines)),
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } => {
            return Closed::Inline(Inline::Link {
                link_type,
                dest: dest_url.to_string(),
                title: title.to_string(),
                id: id.to_string(),
                children: inlines,
            });
        }
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } => {
            return Closed::Inline(Inline::Image {
                link_type,
                dest: dest_url.to_string(),
                title: title.to_string(),
                id: id.to_string(),
                children: inlines,
            });
        }
        // footnotes, definition lists, sub/superscript and metadata are not
        // modelled; nested blocks are kept as a quote, bare text as a paragraph
        _ if !blocks.is_empty() => Block::BlockQuote(blocks),
        _ => Block::Paragraph(inlines),
    };
    Closed::Block(block)
}

/// Convert a pulldown-cmark `Event` slice into `Block` AST nodes. Unknown
/// structures are kept conservatively as paragraphs.
pub fn parse_events_to_blocks(events: &[Event<'_>]) -> Vec<Block> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut out: Vec<Block> = Vec::new();

    for ev in events {
        let inline = match ev {
            Event::Start(tag) => {
                stack.push(Frame {
                    collect_inlines: collects_inlines(tag),
                    tag: tag.clone(),
                    inlines: Vec::new(),
                    blocks: Vec::new(),
                });
                continue;
            }
            Event::End(_) => {
                let Some(frame) = stack.pop() else {
                    continue;
                };
                match (close_frame(frame), stack.last_mut()) {
                    (Closed::Inline(inl), Some(parent)) => parent.push_inline(inl),
                    (Closed::Inline(inl), None) => out.push(Block::Paragraph(vec![inl])),
                    (Closed::Block(b), Some(parent)) => parent.push_block(b),
                    (Closed::Block(b), None) => out.push(b),
                }
                continue;
            }
            Event::Rule => {
                match stack.last_mut() {
                    Some(top) => top.blocks.push(Block::Rule),
                    None => out.push(Block::Rule),
                }
                continue;
            }
            Event::Html(t) => {
                let in_html_block = matches!(stack.last(), Some(f) if f.collect_inlines);
                if !in_html_block {
                    let b = Block::HtmlBlock(Region::from_str(t.trim_end_matches('\n')));
                    match stack.last_mut() {
                        Some(top) => top.blocks.push(b),
                        None => out.push(b),
                    }
                    continue;
                }
                Inline::Html(t.to_string())
            }
            Event::Text(t) => Inline::Text(t.to_string()),
            Event::Code(t) => Inline::Code(t.to_string()),
            Event::InlineHtml(t) => Inline::Html(t.to_string()),
            Event::InlineMath(t) | Event::DisplayMath(t) => Inline::Text(t.to_string()),
            Event::SoftBreak => Inline::SoftBreak,
            Event::HardBreak => Inline::HardBreak,
            Event::TaskListMarker(done) => Inline::Text(if *done { "[x] " } else { "[ ] " }.into()),
            Event::FootnoteReference(label) => Inline::Text(format!("[^{label}]")),
        };
        match stack.last_mut() {
            Some(top) => top.push_inline(inline),
            None => out.push(Block::Paragraph(vec![inline])),
        }
    }

    out
}

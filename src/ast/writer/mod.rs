//! Markdown writer: renders the block AST back to markdown text.
//!
//! Rendering goes through [`Region`](crate::text::Region) buffers and is
//! written into any [`fmt::Write`] sink, so every entry point returns a
//! `fmt::Result` instead of assuming the sink is infallible.

mod blocks;
mod inline;
mod utils;

use std::fmt::{self, Write};

use crate::ast::{Block, Heading, Inline};

pub use blocks::block_to_region;
pub use inline::RefDef;

/// Write blocks separated by one blank line, each terminated by `\n`.
pub fn write_blocks<W: Write>(out: &mut W, blocks: &[Block]) -> fmt::Result {
    for (i, b) in blocks.iter().enumerate() {
        if i > 0 {
            out.write_char('\n')?;
        }
        let r = block_to_region(b);
        if r.is_empty() {
            continue;
        }
        r.write_to(out)?;
        out.write_char('\n')?;
    }
    Ok(())
}

/// Render blocks to a markdown string.
pub fn to_markdown(blocks: &[Block]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_blocks(&mut out, blocks)?;
    Ok(out)
}

/// Render a heading including its `#` markers, without a trailing newline.
pub fn heading_to_markdown(heading: &Heading) -> Result<String, fmt::Error> {
    let mut out = String::new();
    blocks::render_heading(heading).write_to(&mut out)?;
    Ok(out)
}

/// Render inline content on its own, e.g. the text of a heading.
pub fn inlines_to_markdown(inlines: &[Inline]) -> Result<String, fmt::Error> {
    let mut defs = Vec::new();
    let line = inline::inlines_to_line(inlines, &mut defs);
    let mut out = String::new();
    write!(out, "{line}")?;
    Ok(out)
}

//! Decorative markup removal applied before a README is folded.

use regex::Regex;
use std::sync::LazyLock;

use crate::ast::{Block, Inline};

static ANCHORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<a\b[^>]*>(.*?)</a>").unwrap());
static BOLDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<b>(.*?)</b>").unwrap());
static ITALICS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<i>(.*?)</i>").unwrap());

const BADGE_MARKERS: &[&str] = &[
    "shields.io",
    "badge.fury.io",
    "travis-ci.",
    "/badge.svg",
    "/badges/",
    "coveralls.io",
    "codecov.io",
    "david-dm.org",
];

/// Replace inline HTML anchors, bold and italic tags with their markdown
/// equivalents.
pub fn strip_html(md: &str) -> String {
    let md = ANCHORS.replace_all(md, "${1}");
    let md = BOLDS.replace_all(&md, "**${1}**");
    ITALICS.replace_all(&md, "*${1}*").into_owned()
}

pub fn is_badge_url(url: &str) -> bool {
    let url = url.to_lowercase();
    BADGE_MARKERS.iter().any(|m| url.contains(m))
}

fn is_badge(inl: &Inline) -> bool {
    match inl {
        Inline::Image { dest, .. } => is_badge_url(dest),
        Inline::Link { children, .. } => {
            children.iter().any(is_badge) && children.iter().all(|c| is_badge(c) || c.is_blank())
        }
        _ => false,
    }
}

fn strip_inlines(inlines: &mut Vec<Inline>) {
    inlines.retain(|i| !is_badge(i));
}

/// Remove badge images (and links wrapping nothing but badges) from
/// paragraphs and headings. Paragraphs left blank are removed.
pub fn strip_badges(blocks: &mut Vec<Block>) {
    for block in blocks.iter_mut() {
        match block {
            Block::Paragraph(inls) => strip_inlines(inls),
            Block::Heading(h) => strip_inlines(&mut h.children),
            Block::BlockQuote(children) | Block::Item(children) => strip_badges(children),
            Block::List { items, .. } => items.iter_mut().for_each(strip_badges),
            _ => {}
        }
    }
    blocks.retain(|b| !matches!(b, Block::Paragraph(inls) if inls.iter().all(Inline::is_blank)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn html_tags_become_markdown() {
        assert_eq!(
            strip_html(r#"<a href="x">vorpal</a> is <B>fast</B> and <i>small</i>"#),
            "vorpal is **fast** and *small*"
        );
    }

    #[test]
    fn badge_only_paragraph_is_removed() {
        let mut blocks = parse(
            "[![Build](https://travis-ci.org/a/b.svg)](https://travis-ci.org/a/b) ![npm](https://img.shields.io/npm/v/b.svg)\n\n# b\n\nText ![logo](logo.png)\n",
        );
        strip_badges(&mut blocks);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].is_heading());
        let Block::Paragraph(inls) = &blocks[1] else {
            panic!("expected paragraph");
        };
        assert!(matches!(&inls[1], Inline::Image { dest, .. } if dest == "logo.png"));
    }

    #[test]
    fn heading_badges_are_removed() {
        let mut blocks = parse("## `tool run` ![v](https://badge.fury.io/js/tool.svg)\n");
        strip_badges(&mut blocks);
        let h = blocks[0].as_heading().unwrap();
        assert_eq!(h.plain_text().trim(), "tool run");
    }
}

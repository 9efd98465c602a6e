//! Owned markdown block AST built from pulldown-cmark events, and the
//! writer that turns it back into markdown.

pub mod block;
pub mod inline;
pub mod parse;
pub mod writer;

pub use block::{Block, Heading};
pub use inline::Inline;
pub use parse::{parse, parse_events_to_blocks, parser_options};
pub use writer::{heading_to_markdown, inlines_to_markdown, to_markdown, write_blocks};

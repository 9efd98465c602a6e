//! Heading tree builder.
//!
//! Folds the flat block list of a document into a forest of [`Section`]s
//! keyed by heading depth. Content between two headings becomes the `junk`
//! of the first one; content before the first heading is dropped.
//!
//! Heading depths in real documents skip levels and jump back up freely, so
//! the builder does not assume a strict outline. It keeps a depth index of
//! the most recent section seen at every level and resolves each heading
//! against it:
//!
//! - a heading shallower than the previous one attaches to the nearest
//!   indexed ancestor, or starts a new root;
//! - a sibling at the same level does the same;
//! - a deeper heading attaches to the section indexed one level above it.
//!   When that level is empty the document skipped a level (`#` then
//!   `###`); the heading is dropped and reported as an
//!   [`OutlineWarning::DepthSkip`].

use log::{trace, warn};
use std::cmp::Ordering;

use crate::ast::{Block, Heading};

/// A heading together with the headings nested under it (`fold`) and the
/// non-heading blocks that follow it (`junk`).
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub heading: Heading,
    pub fold: Vec<Section>,
    pub junk: Vec<Block>,
}

impl Section {
    pub fn new(heading: Heading) -> Self {
        Section {
            heading,
            fold: Vec::new(),
            junk: Vec::new(),
        }
    }

    /// Zero-based level of the heading.
    pub fn level(&self) -> usize {
        self.heading.level()
    }

    /// Number of sections in this subtree, this one included.
    pub fn len(&self) -> usize {
        1 + self.fold.iter().map(Section::len).sum::<usize>()
    }
}

/// Recoverable problems found while folding a document.
#[derive(Clone, Debug, PartialEq)]
pub enum OutlineWarning {
    /// A heading deeper than the previous one with no section at the level
    /// above it. The dropped section keeps the content that followed it.
    DepthSkip {
        level: usize,
        previous_level: usize,
        dropped: Section,
    },
}

impl std::fmt::Display for OutlineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutlineWarning::DepthSkip {
                level,
                previous_level,
                dropped,
            } => write!(
                f,
                "heading {:?} at depth {} follows depth {} with no parent heading; dropped",
                dropped.heading.plain_text(),
                level + 1,
                previous_level + 1
            ),
        }
    }
}

/// Result of folding one document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    pub sections: Vec<Section>,
    pub warnings: Vec<OutlineWarning>,
}

type NodeId = usize;

struct Node {
    heading: Heading,
    fold: Vec<NodeId>,
    junk: Vec<Block>,
}

/// Most recent section per level. Entries deeper than the current heading
/// are always closed, so the index is a prefix that only grows one level at
/// a time and shrinks by truncation.
#[derive(Default)]
struct DepthIndex {
    slots: Vec<Option<NodeId>>,
}

impl DepthIndex {
    fn get(&self, level: usize) -> Option<NodeId> {
        self.slots.get(level).copied().flatten()
    }

    fn register(&mut self, level: usize, id: NodeId) {
        if self.slots.len() <= level {
            self.slots.resize(level + 1, None);
        }
        self.slots[level] = Some(id);
    }

    /// Close every entry deeper than `level`.
    fn truncate_after(&mut self, level: usize) {
        self.slots.truncate(level + 1);
    }

    fn clear(&mut self) {
        self.slots.clear();
    }

    /// Nearest registered entry strictly above `level`.
    fn ancestor(&self, level: usize) -> Option<NodeId> {
        (0..level.min(self.slots.len())).rev().find_map(|l| self.get(l))
    }
}

enum Placement {
    Root,
    Child(NodeId),
    Dropped { previous_level: usize },
}

#[derive(Default)]
struct Builder {
    arena: Vec<Node>,
    roots: Vec<NodeId>,
    index: DepthIndex,
    previous: Option<usize>,
    last: Option<NodeId>,
    dropped: Vec<(NodeId, usize)>,
}

impl Builder {
    fn place(&mut self, id: NodeId, level: usize) -> Placement {
        let ordering = match self.previous {
            None => Ordering::Less,
            Some(prev) => level.cmp(&prev),
        };
        match ordering {
            Ordering::Less => match self.index.ancestor(level) {
                Some(parent) => {
                    self.index.register(level, id);
                    self.index.truncate_after(level);
                    Placement::Child(parent)
                }
                None => {
                    self.index.clear();
                    self.index.register(level, id);
                    Placement::Root
                }
            },
            Ordering::Equal => {
                self.index.register(level, id);
                match self.index.ancestor(level) {
                    Some(parent) => Placement::Child(parent),
                    None => Placement::Root,
                }
            }
            Ordering::Greater => {
                let previous_level = self.previous.unwrap_or_default();
                match level.checked_sub(1).and_then(|l| self.index.get(l)) {
                    Some(parent) => {
                        self.index.register(level, id);
                        Placement::Child(parent)
                    }
                    None => Placement::Dropped { previous_level },
                }
            }
        }
    }

    fn push_heading(&mut self, heading: Heading) {
        let level = heading.level();
        let id = self.arena.len();
        self.arena.push(Node {
            heading,
            fold: Vec::new(),
            junk: Vec::new(),
        });
        match self.place(id, level) {
            Placement::Root => self.roots.push(id),
            Placement::Child(parent) => self.arena[parent].fold.push(id),
            Placement::Dropped { previous_level } => {
                warn!(
                    "dropping heading {:?}: depth {} follows depth {} with no heading in between",
                    self.arena[id].heading.plain_text(),
                    level + 1,
                    previous_level + 1
                );
                self.dropped.push((id, previous_level));
            }
        }
        self.previous = Some(level);
        self.last = Some(id);
    }

    fn push_block(&mut self, block: Block) {
        match self.last {
            Some(id) => self.arena[id].junk.push(block),
            None => trace!("dropping block before first heading: {block:?}"),
        }
    }

    // Children always have larger ids than their parents, so building the
    // owned sections from the highest id down never needs recursion.
    fn finish(self) -> Outline {
        let mut built: Vec<Option<Section>> = Vec::with_capacity(self.arena.len());
        built.resize_with(self.arena.len(), || None);
        for (id, node) in self.arena.into_iter().enumerate().rev() {
            let fold = node
                .fold
                .iter()
                .filter_map(|child| built[*child].take())
                .collect();
            built[id] = Some(Section {
                heading: node.heading,
                fold,
                junk: node.junk,
            });
        }
        let sections = self
            .roots
            .iter()
            .filter_map(|id| built[*id].take())
            .collect();
        let warnings = self
            .dropped
            .into_iter()
            .filter_map(|(id, previous_level)| {
                let dropped = built[id].take()?;
                Some(OutlineWarning::DepthSkip {
                    level: dropped.level(),
                    previous_level,
                    dropped,
                })
            })
            .collect();
        Outline { sections, warnings }
    }
}

/// Fold a flat block list into a heading forest.
pub fn build_outline<I>(blocks: I) -> Outline
where
    I: IntoIterator<Item = Block>,
{
    let mut builder = Builder::default();
    for block in blocks {
        match block {
            Block::Heading(h) => builder.push_heading(h),
            other => builder.push_block(other),
        }
    }
    builder.finish()
}

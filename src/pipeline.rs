//! One-call processing of a markdown document into a command catalog.

use log::info;

use crate::ast::{self, Block};
use crate::cleanup;
use crate::config::Config;
use crate::error::Result;
use crate::extract::{ApiRecord, Extractor};
use crate::grammar::{self, CommandGrammar};
use crate::outline::{self, OutlineWarning};
use crate::paths::{self, PathTally};

/// Everything produced for one document.
#[derive(Debug, Default)]
pub struct Report {
    pub catalog: Vec<ApiRecord>,
    pub tally: PathTally,
    pub warnings: Vec<OutlineWarning>,
}

/// A configured pipeline. Holds no per-document state, so a single value
/// can process any number of documents, including from several threads.
pub struct Autodoc {
    grammar: Box<dyn CommandGrammar>,
    config: Config,
}

impl Autodoc {
    pub fn new(grammar: Box<dyn CommandGrammar>, config: Config) -> Self {
        Autodoc { grammar, config }
    }

    /// Resolve the configured language into a grammar.
    pub fn from_config(config: &Config) -> Result<Self> {
        let grammar = grammar::for_language(&config.language)?;
        Ok(Autodoc::new(grammar, config.clone()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grammar(&self) -> &dyn CommandGrammar {
        self.grammar.as_ref()
    }

    /// Parse markdown, applying the configured cleanup.
    pub fn parse(&self, markdown: &str) -> Vec<Block> {
        let mut blocks = if self.config.strip_html {
            ast::parse(&cleanup::strip_html(markdown))
        } else {
            ast::parse(markdown)
        };
        if self.config.strip_badges {
            cleanup::strip_badges(&mut blocks);
        }
        blocks
    }

    pub fn process(&self, markdown: &str) -> Result<Report> {
        self.process_blocks(self.parse(markdown))
    }

    pub fn process_blocks(&self, blocks: Vec<Block>) -> Result<Report> {
        let outline = outline::build_outline(blocks);
        let mut catalog = Extractor::new(self.grammar(), self.config.repo_name.as_str())
            .capture_content(self.config.capture_content)
            .extract(&outline.sections)?;
        let tally = paths::build_api_paths(
            &mut catalog,
            &self.config.repo_name,
            &self.config.output_root,
        );
        info!(
            "{} commands in {} sections ({} warnings)",
            catalog.len(),
            outline.sections.iter().map(|s| s.len()).sum::<usize>(),
            outline.warnings.len()
        );
        Ok(Report {
            catalog,
            tally,
            warnings: outline.warnings,
        })
    }
}

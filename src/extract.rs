//! API extractor: walks a heading forest and catalogs every heading the
//! grammar recognises as a command declaration.

use log::debug;
use serde::Serialize;
use std::path::PathBuf;

use crate::ast::{self, Block, Heading};
use crate::error::Result;
use crate::grammar::{CommandGrammar, CommandSyntax};
use crate::outline::Section;

/// A heading recognised as a command declaration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiRecord {
    #[serde(skip)]
    pub heading: Heading,
    #[serde(skip)]
    pub junk: Vec<Block>,
    pub syntax: CommandSyntax,
    /// Canonical rendering produced by the grammar.
    pub formatted: String,
    /// Heading text as it was handed to the grammar.
    pub original: String,
    /// Markdown of the heading's junk when content capture is on.
    pub content: String,
    /// The heading visited just before this one in the depth-first walk.
    /// This is the previous heading in document order among the kept
    /// sections, not necessarily the structural parent.
    #[serde(skip)]
    pub parent: Option<Heading>,
    pub path: Option<PathBuf>,
}

/// Lower-case, trim and drop every character outside `[A-Za-z0-9_]`.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Remove the first parent when it names the repository itself.
/// Returns whether a segment was removed.
pub fn strip_self_reference(parents: &mut Vec<String>, repo_name: &str) -> bool {
    let repo = normalize_name(repo_name);
    if repo.is_empty() {
        return false;
    }
    match parents.first() {
        Some(first) if normalize_name(first) == repo => {
            parents.remove(0);
            true
        }
        _ => false,
    }
}

pub struct Extractor<'g> {
    grammar: &'g dyn CommandGrammar,
    repo_name: String,
    capture_content: bool,
}

impl<'g> Extractor<'g> {
    pub fn new(grammar: &'g dyn CommandGrammar, repo_name: impl Into<String>) -> Self {
        Extractor {
            grammar,
            repo_name: repo_name.into(),
            capture_content: false,
        }
    }

    /// Render each record's junk into [`ApiRecord::content`].
    pub fn capture_content(mut self, capture: bool) -> Self {
        self.capture_content = capture;
        self
    }

    fn record(&self, section: &Section, parent: Option<&Heading>) -> Result<Option<ApiRecord>> {
        let original = ast::inlines_to_markdown(&section.heading.children)?;
        if !self.grammar.is_command_syntax(&original) {
            return Ok(None);
        }
        let mut syntax = self.grammar.parse_command_syntax(&original)?;
        let formatted = self.grammar.stringify_command_syntax(&syntax)?;
        if strip_self_reference(&mut syntax.parents, &self.repo_name) {
            debug!("stripped repository prefix from {original:?}");
        }
        let content = if self.capture_content {
            ast::to_markdown(&section.junk)?
        } else {
            String::new()
        };
        debug!("api {formatted:?} (parents {:?})", syntax.parents);
        Ok(Some(ApiRecord {
            heading: section.heading.clone(),
            junk: section.junk.clone(),
            syntax,
            formatted,
            original,
            content,
            parent: parent.cloned(),
            path: None,
        }))
    }

    /// Walk the forest depth-first in document order. Grammar failures
    /// abort the walk; nested declarations under non-matching headings are
    /// still found.
    pub fn extract(&self, sections: &[Section]) -> Result<Vec<ApiRecord>> {
        let mut api = Vec::new();
        let mut stack: Vec<&Section> = sections.iter().rev().collect();
        let mut previous: Option<&Heading> = None;
        while let Some(section) = stack.pop() {
            if let Some(record) = self.record(section, previous)? {
                api.push(record);
            }
            previous = Some(&section.heading);
            stack.extend(section.fold.iter().rev());
        }
        Ok(api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  My-Repo ", "myrepo")]
    #[case("vorpal.js", "vorpaljs")]
    #[case("snake_case", "snake_case")]
    #[case("", "")]
    fn normalizes_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_name(input), expected);
    }

    #[test]
    fn strips_only_matching_first_segment() {
        let mut parents = vec!["MyRepo".to_string(), "foo".to_string()];
        assert!(strip_self_reference(&mut parents, "myrepo"));
        assert_eq!(parents, vec!["foo"]);

        let mut parents = vec!["foo".to_string(), "myrepo".to_string()];
        assert!(!strip_self_reference(&mut parents, "myrepo"));
        assert_eq!(parents.len(), 2);
    }

    #[test]
    fn empty_repo_name_never_strips() {
        let mut parents = vec!["--".to_string()];
        assert!(!strip_self_reference(&mut parents, " "));
        assert_eq!(parents.len(), 1);
    }
}

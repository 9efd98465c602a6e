//! Command syntax grammars.
//!
//! A grammar decides whether a heading's text declares a command, parses it
//! into a [`CommandSyntax`] and renders the canonical form back. The
//! extractor only relies on [`CommandSyntax::name`] and
//! [`CommandSyntax::parents`]; arguments and flags are carried through to
//! the catalog as the grammar produced them.

mod cli;
mod javascript;

use serde::Serialize;

use crate::error::GrammarError;

pub use cli::CliGrammar;
pub use javascript::JavascriptGrammar;

/// A positional argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    pub required: bool,
    pub variadic: bool,
}

impl Argument {
    pub fn required(name: impl Into<String>) -> Self {
        Argument {
            name: name.into(),
            required: true,
            variadic: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Argument {
            name: name.into(),
            required: false,
            variadic: false,
        }
    }
}

/// An option flag such as `-f, --force` or `--out <dir>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub short: Option<String>,
    pub long: Option<String>,
    pub value: Option<String>,
}

/// Structured form of a command declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CommandSyntax {
    pub name: String,
    /// Enclosing command path, outermost first.
    pub parents: Vec<String>,
    pub args: Vec<Argument>,
    pub flags: Vec<Flag>,
}

impl CommandSyntax {
    pub fn new(name: impl Into<String>, parents: Vec<String>) -> Self {
        CommandSyntax {
            name: name.into(),
            parents,
            ..Default::default()
        }
    }
}

pub trait CommandGrammar: Send + Sync {
    /// Language key this grammar is registered under.
    fn language(&self) -> &'static str;

    fn is_command_syntax(&self, text: &str) -> bool;

    fn parse_command_syntax(&self, text: &str) -> Result<CommandSyntax, GrammarError>;

    fn stringify_command_syntax(&self, syntax: &CommandSyntax) -> Result<String, GrammarError>;
}

/// Known language keys, primary names first.
pub const LANGUAGES: &[&str] = &["cli", "javascript"];

/// Look up a grammar by language key.
pub fn for_language(key: &str) -> Result<Box<dyn CommandGrammar>, GrammarError> {
    match key.trim().to_ascii_lowercase().as_str() {
        "cli" | "shell" | "sh" => Ok(Box::new(CliGrammar)),
        "javascript" | "js" => Ok(Box::new(JavascriptGrammar)),
        _ => Err(GrammarError::UnknownLanguage(key.to_string())),
    }
}

/// Remove a surrounding code span and stray heading markers from heading
/// text, reporting whether the whole text was a single code span.
pub(crate) fn unwrap_code_span(text: &str) -> (&str, bool) {
    let t = text.trim().trim_start_matches('#').trim();
    let ticks = t.len() - t.trim_start_matches('`').len();
    if ticks > 0 && t.len() > 2 * ticks && t.ends_with(&"`".repeat(ticks)) {
        let inner = &t[ticks..t.len() - ticks];
        if !inner.contains('`') {
            return (inner.trim(), true);
        }
    }
    (t, false)
}

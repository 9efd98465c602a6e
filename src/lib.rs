//! Fold markdown documents into a heading tree and extract the command
//! syntax declarations written as headings.
//!
//! ```
//! use md_autodoc::{Autodoc, Config};
//!
//! let config = Config {
//!     repo_name: "tool".into(),
//!     ..Config::default()
//! };
//! let autodoc = Autodoc::from_config(&config).unwrap();
//! let report = autodoc
//!     .process("# tool\n\n## `tool remote add <name>`\n\nAdds a remote.\n")
//!     .unwrap();
//!
//! assert_eq!(report.catalog.len(), 1);
//! assert_eq!(report.catalog[0].syntax.parents, vec!["remote"]);
//! ```

pub mod ast;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod extract;
pub mod grammar;
pub mod links;
pub mod outline;
pub mod paths;
pub mod pipeline;
pub mod text;

pub use config::Config;
pub use error::{ConfigError, Error, GrammarError, Result};
pub use extract::{ApiRecord, Extractor};
pub use grammar::{CommandGrammar, CommandSyntax};
pub use outline::{Outline, OutlineWarning, Section, build_outline};
pub use paths::{PathTally, build_api_paths};
pub use pipeline::{Autodoc, Report};
pub use text::{Line, Region};

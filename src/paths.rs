//! Output paths for cataloged commands.
//!
//! A record lands at `<output_root>/<repo_name>[/<parent>...]/<name>`. The
//! tally counts records per parent suffix (`""`, `"/remote"`, ...).

use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::ast;
use crate::extract::ApiRecord;

/// Number of records sharing each parent path suffix.
pub type PathTally = BTreeMap<String, usize>;

/// `"/a/b"` for parents `[a, b]`, empty when there are none.
pub fn parent_suffix(parents: &[String]) -> String {
    if parents.is_empty() {
        String::new()
    } else {
        format!("/{}", parents.join("/"))
    }
}

pub fn api_path(output_root: &Path, repo_name: &str, parents: &[String], name: &str) -> PathBuf {
    let mut path = output_root.join(repo_name);
    path.extend(parents);
    path.push(name);
    path
}

/// Assign [`ApiRecord::path`] to every record and tally parent suffixes.
///
/// The walk predecessor of each record is rendered for the debug log; a
/// record whose predecessor cannot be rendered loses it and processing
/// continues.
pub fn build_api_paths(api: &mut [ApiRecord], repo_name: &str, output_root: &Path) -> PathTally {
    let mut tally = PathTally::new();
    for record in api.iter_mut() {
        if let Some(parent) = &record.parent {
            match ast::heading_to_markdown(parent) {
                Ok(text) => debug!("{:?} follows {text:?}", record.formatted),
                Err(e) => {
                    warn!("failed to render heading before {:?}: {e}", record.formatted);
                    record.parent = None;
                }
            }
        }

        let suffix = parent_suffix(&record.syntax.parents);
        let path = api_path(output_root, repo_name, &record.syntax.parents, &record.syntax.name);
        debug!("{} -> {}", record.formatted, path.display());
        record.path = Some(path);
        *tally.entry(suffix).or_insert(0) += 1;
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_has_leading_slash_only_when_present() {
        assert_eq!(parent_suffix(&[]), "");
        assert_eq!(parent_suffix(&["a".to_string(), "b".to_string()]), "/a/b");
    }

    #[test]
    fn path_layout() {
        let p = api_path(Path::new("out"), "myrepo", &["foo".to_string()], "bar");
        assert_eq!(p, Path::new("out/myrepo/foo/bar"));
        let p = api_path(Path::new("out"), "myrepo", &[], "bar");
        assert_eq!(p, Path::new("out/myrepo/bar"));
    }
}

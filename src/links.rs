//! Link helpers used to find the other markdown documents of a repository
//! referenced from a README.

use std::collections::HashSet;

use crate::ast::{Block, Inline};

/// Owner and name of a GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GithubRepo {
    pub owner: String,
    pub name: String,
}

const REMOTE_MARKERS: &[&str] = &["https://", "http://", ".com", ".net", ".io"];

/// Drop the `#fragment` and `?query` parts and surrounding whitespace.
pub fn clean_link(url: &str) -> &str {
    let url = url.split('#').next().unwrap_or_default();
    let url = url.split('?').next().unwrap_or_default();
    url.trim()
}

/// A link is local unless it mentions a scheme or a common public domain.
pub fn is_local_link(url: &str) -> bool {
    let url = url.to_lowercase();
    !REMOTE_MARKERS.iter().any(|m| url.contains(m))
}

pub fn is_markdown_link(url: &str) -> bool {
    url.rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Owner and repository from `...//github.com/<owner>/<name>/...`.
pub fn parse_github_link(url: &str) -> Option<GithubRepo> {
    let (_, rest) = url.split_once("//github.com/")?;
    let mut parts = rest.split('/');
    let owner = parts.next().filter(|s| !s.is_empty())?;
    let name = parts.next().filter(|s| !s.is_empty())?;
    Some(GithubRepo {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

fn collect_inline_urls(inl: &Inline, urls: &mut Vec<String>, seen: &mut HashSet<String>) {
    if let Inline::Link { dest, .. } = inl {
        let href = clean_link(dest);
        if !href.is_empty() && seen.insert(href.to_string()) {
            urls.push(href.to_string());
        }
    }
    for child in inl.children() {
        collect_inline_urls(child, urls, seen);
    }
}

/// Every distinct non-empty link destination in the document, cleaned with
/// [`clean_link`], in order of first appearance.
pub fn urls_from_blocks(blocks: &[Block]) -> Vec<String> {
    let mut urls = Vec::new();
    let mut seen = HashSet::new();
    for block in blocks {
        block.for_each_inline(&mut |inl| collect_inline_urls(inl, &mut urls, &mut seen));
    }
    urls
}

/// Keep markdown links that are either local or point into the given
/// GitHub repository. `None` filters match any owner or name. Issue links
/// are never kept.
pub fn filter_urls_by_github_repo<S: AsRef<str>>(
    urls: &[S],
    owner: Option<&str>,
    name: Option<&str>,
) -> Vec<String> {
    urls.iter()
        .map(S::as_ref)
        .filter(|url| is_markdown_link(url))
        .filter(|url| {
            if is_local_link(url) {
                return true;
            }
            let same_repo = parse_github_link(url).is_some_and(|repo| {
                owner.is_none_or(|o| repo.owner == o) && name.is_none_or(|n| repo.name == n)
            });
            same_repo && !url.contains("/issues/")
        })
        .map(str::to_string)
        .collect()
}

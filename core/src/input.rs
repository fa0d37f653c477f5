use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// An `owner/repo` pair the activity is fetched for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
}

impl RepoTarget {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

const URL_PREFIXES: [&str; 4] = [
    "https://github.com/",
    "http://github.com/",
    "www.github.com/",
    "github.com/",
];

/// Parses what the user typed into the search box.
///
/// Accepts `owner/repo`, optionally as a github.com URL and with a
/// trailing `.git` or `/`.
pub fn parse_target(input: &str) -> Result<RepoTarget> {
    let mut rest = input.trim();
    if rest.is_empty() {
        return Err(anyhow!("Repository is required (expected owner/repo)"));
    }

    // 1. Strip URL decorations
    for prefix in URL_PREFIXES {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
            break;
        }
    }
    rest = rest.trim_end_matches('/');
    rest = rest.strip_suffix(".git").unwrap_or(rest);

    // 2. Split owner/repo
    let parts: Vec<&str> = rest.split('/').collect();
    match parts.as_slice() {
        [owner, repo] if is_valid_segment(owner) && is_valid_segment(repo) => {
            Ok(RepoTarget::new(*owner, *repo))
        }
        [_, _] => Err(anyhow!("Invalid repository name: '{}'", input.trim())),
        _ => Err(anyhow!("Expected owner/repo, got '{}'", input.trim())),
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let target = parse_target("rust-lang/rust").unwrap();
        assert_eq!(target, RepoTarget::new("rust-lang", "rust"));
        assert_eq!(target.to_string(), "rust-lang/rust");
    }

    #[test]
    fn test_parse_decorated() {
        let expected = RepoTarget::new("tokio-rs", "tokio");
        assert_eq!(parse_target("  tokio-rs/tokio  ").unwrap(), expected);
        assert_eq!(parse_target("https://github.com/tokio-rs/tokio").unwrap(), expected);
        assert_eq!(parse_target("github.com/tokio-rs/tokio/").unwrap(), expected);
        assert_eq!(parse_target("https://github.com/tokio-rs/tokio.git").unwrap(), expected);
    }

    #[test]
    fn test_parse_keeps_dots_in_names() {
        assert_eq!(
            parse_target("someone/someone.github.io").unwrap(),
            RepoTarget::new("someone", "someone.github.io")
        );
    }

    #[test]
    fn test_parse_rejects() {
        assert!(parse_target("").is_err());
        assert!(parse_target("   ").is_err());
        assert!(parse_target("just-owner").is_err());
        assert!(parse_target("/repo").is_err());
        assert!(parse_target("owner/").is_err());
        assert!(parse_target("a/b/c").is_err());
        assert!(parse_target("owner/re po").is_err());
    }
}

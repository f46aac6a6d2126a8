//! Registry references (`repo/name:tag`)

use std::fmt;

use crate::error::{DeckhandError, Result};

/// A parsed registry reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub repo: String,
    pub name: String,
    pub tag: String,
}

impl Reference {
    /// Parse a `repo/name[:tag]` reference; the tag defaults to `latest`
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = |reason: &str| DeckhandError::ResolutionFailed {
            reference: input.to_string(),
            reason: reason.to_string(),
        };

        let (path, tag) = match input.rsplit_once(':') {
            Some((path, tag)) => (path, tag),
            None => (input, "latest"),
        };
        let (repo, name) = path
            .rsplit_once('/')
            .ok_or_else(|| malformed("expected a repo/name:tag reference"))?;

        for segment in [repo, name, tag] {
            let ok = !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_./".contains(c));
            if !ok {
                return Err(malformed("reference contains an empty or invalid segment"));
            }
        }

        Ok(Self {
            repo: repo.to_string(),
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.repo, self.name, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_reference() {
        let reference = Reference::parse("myrepo/myapp:v1").unwrap();
        assert_eq!(reference.repo, "myrepo");
        assert_eq!(reference.name, "myapp");
        assert_eq!(reference.tag, "v1");
        assert_eq!(reference.to_string(), "myrepo/myapp:v1");
    }

    #[test]
    fn test_parse_defaults_tag_to_latest() {
        let reference = Reference::parse("myrepo/myapp").unwrap();
        assert_eq!(reference.tag, "latest");
    }

    #[test]
    fn test_parse_nested_repo_path() {
        let reference = Reference::parse("registry.example.com/team/myapp:2.0").unwrap();
        assert_eq!(reference.repo, "registry.example.com/team");
        assert_eq!(reference.name, "myapp");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["myapp", "/myapp:v1", "repo/:v1", "repo/app:", "repo/my app"] {
            let err = Reference::parse(input).unwrap_err();
            assert!(matches!(err, DeckhandError::ResolutionFailed { .. }), "{input}");
        }
    }
}

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Extracts owner and repository name from a hosting URL.
    ///
    /// Deliberately permissive: malformed input yields malformed owner/name
    /// strings rather than an error, and the network call fails downstream.
    pub fn parse(url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        let path = trimmed
            .strip_prefix("https://github.com/")
            .or_else(|| trimmed.strip_prefix("http://github.com/"))
            .or_else(|| trimmed.strip_prefix("github.com/"))
            .unwrap_or(trimmed);

        let segments = path.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>();

        let (owner, name) = match segments.as_slice() {
            [] => ("", ""),
            [only] => ("", *only),
            [.., owner, name] => (*owner, *name),
        };

        Self {
            owner: owner.to_string(),
            name: name.strip_suffix(".git").unwrap_or(name).to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

/// The requested date window, inclusive semantics delegated to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_repository_url() {
        let repo = RepoRef::parse("https://github.com/facebook/react");
        assert_eq!(repo.owner, "facebook");
        assert_eq!(repo.name, "react");
        assert_eq!(repo.full_name(), "facebook/react");
    }

    #[test]
    fn strips_git_suffix() {
        let repo = RepoRef::parse("https://github.com/facebook/react.git");
        assert_eq!(repo.owner, "facebook");
        assert_eq!(repo.name, "react");
    }

    #[test]
    fn strips_only_one_trailing_git_suffix() {
        let repo = RepoRef::parse("https://github.com/owner/repo.git.git");
        assert_eq!(repo.name, "repo.git");
    }

    #[test]
    fn tolerates_trailing_slash_and_bare_host() {
        let repo = RepoRef::parse("github.com/vercel/next.js/");
        assert_eq!(repo.owner, "vercel");
        assert_eq!(repo.name, "next.js");
    }

    #[test]
    fn malformed_input_does_not_panic() {
        let repo = RepoRef::parse("not a url");
        assert_eq!(repo.owner, "");
        assert_eq!(repo.name, "not a url");
    }

    #[test]
    fn deep_paths_take_last_two_segments() {
        let repo = RepoRef::parse("https://github.com/orgs/teams/facebook/react");
        assert_eq!(repo.owner, "facebook");
        assert_eq!(repo.name, "react");
    }
}

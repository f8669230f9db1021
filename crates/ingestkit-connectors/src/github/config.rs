//! GitHub source configuration and validation.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use ingestkit_core::{Error, Result};

pub const GITHUB_HOST: &str = "github.com";

/// Raw, unvalidated GitHub source options (as read from a config file or CLI).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubSourceOptions {
    /// `https://github.com/<owner>/<name>` or `<owner>/<name>`.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Comma-separated glob patterns, e.g. `*.md,docs/**/*.txt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_glob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Validated GitHub source configuration.
///
/// Construction fails on a malformed URL or glob, so a value of this type
/// always names exactly one repository.
#[derive(Debug, Clone)]
pub struct SimpleGitHubConfig {
    url: String,
    repo_path: String,
    owner: String,
    name: String,
    branch: Option<String>,
    file_glob: Option<String>,
    globs: Option<GlobSet>,
    access_token: Option<String>,
}

impl SimpleGitHubConfig {
    pub fn new(options: GitHubSourceOptions) -> Result<Self> {
        let repo_path = parse_repo_path(&options.url)?;
        let fragments: Vec<&str> = repo_path.split('/').filter(|f| !f.is_empty()).collect();
        let (owner, name) = match fragments.as_slice() {
            [owner, name] => (owner.to_string(), name.to_string()),
            _ => return Err(invalid_url()),
        };

        let file_glob = options.file_glob.filter(|g| !g.trim().is_empty());
        let globs = file_glob.as_deref().map(build_globs).transpose()?;

        Ok(Self {
            url: options.url,
            repo_path,
            owner,
            name,
            branch: options.branch.filter(|b| !b.is_empty()),
            file_glob,
            globs,
            access_token: options.access_token.filter(|t| !t.is_empty()),
        })
    }

    /// Shorthand for a repository with no branch, glob or token.
    pub fn from_url(url: impl Into<String>) -> Result<Self> {
        Self::new(GitHubSourceOptions {
            url: url.into(),
            ..Default::default()
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path component of the configured URL, verbatim.
    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<owner>/<name>`, as the REST API expects it.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn file_glob(&self) -> Option<&str> {
        self.file_glob.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// True when no glob is configured or any configured glob matches.
    pub fn matches_glob(&self, path: &str) -> bool {
        match &self.globs {
            Some(globs) => globs.is_match(path),
            None => true,
        }
    }
}

/// Extract the repository path, checking scheme and host when present.
///
/// The authority must be exactly `github.com`: no port, no user info, and
/// no case folding.
fn parse_repo_path(raw: &str) -> Result<String> {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) => {
            if url.scheme() != "https"
                || url.port().is_some()
                || !url.username().is_empty()
                || url.password().is_some()
                || authority(raw) != GITHUB_HOST
            {
                return Err(invalid_url());
            }
            Ok(url.path().to_string())
        }
        // No scheme: treat the whole string as an `<owner>/<name>` path.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Ok(raw.split(['?', '#']).next().unwrap_or_default().to_string())
        }
        Err(_) => Err(invalid_url()),
    }
}

/// Authority as written in the input, before `Url` normalizes it.
fn authority(raw: &str) -> &str {
    raw.split_once("://")
        .and_then(|(_, rest)| rest.split(['/', '?', '#']).next())
        .unwrap_or_default()
}

fn build_globs(patterns: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let glob = Glob::new(pattern)
            .map_err(|e| Error::Config(format!("invalid file glob {:?}: {}", pattern, e)))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::Config(format!("invalid file glob {:?}: {}", patterns, e)))
}

fn invalid_url() -> Error {
    Error::Config(
        "Please provide a valid URL, e.g. \"https://github.com/rust-lang/cargo\" \
         or a repository owner/name pair, e.g. \"rust-lang/cargo\"."
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url() {
        let config = SimpleGitHubConfig::from_url("https://github.com/Org/Repo").unwrap();
        assert_eq!(config.repo_path(), "/Org/Repo");
        assert_eq!(config.owner(), "Org");
        assert_eq!(config.name(), "Repo");
        assert_eq!(config.full_name(), "Org/Repo");
    }

    #[test]
    fn test_owner_name_pair() {
        let config = SimpleGitHubConfig::from_url("Org/Repo").unwrap();
        assert_eq!(config.repo_path(), "Org/Repo");
        assert_eq!(config.full_name(), "Org/Repo");
    }

    #[test]
    fn test_trailing_slash_allowed() {
        let config = SimpleGitHubConfig::from_url("https://github.com/Org/Repo/").unwrap();
        assert_eq!(config.full_name(), "Org/Repo");
    }

    #[test]
    fn test_wrong_host() {
        let err = SimpleGitHubConfig::from_url("https://gitlab.com/Org/Repo").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("owner/name pair"));
    }

    #[test]
    fn test_host_must_match_exactly() {
        for url in [
            "https://github.com:8443/Org/Repo",
            "https://github.com:443/Org/Repo",
            "https://user:pw@github.com/Org/Repo",
            "https://user@github.com/Org/Repo",
            "https://GITHUB.COM/Org/Repo",
            "https://www.github.com/Org/Repo",
        ] {
            let err = SimpleGitHubConfig::from_url(url).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{} should be rejected", url);
        }
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(SimpleGitHubConfig::from_url("http://github.com/Org/Repo").is_err());
        assert!(SimpleGitHubConfig::from_url("ssh://github.com/Org/Repo").is_err());
    }

    #[test]
    fn test_wrong_segment_count() {
        assert!(SimpleGitHubConfig::from_url("Org/Repo/extra").is_err());
        assert!(SimpleGitHubConfig::from_url("Org").is_err());
        assert!(SimpleGitHubConfig::from_url("https://github.com/Org").is_err());
        assert!(SimpleGitHubConfig::from_url("https://github.com/Org/Repo/tree/main").is_err());
        // Without a scheme the host is part of the path.
        assert!(SimpleGitHubConfig::from_url("github.com/Org/Repo").is_err());
    }

    #[test]
    fn test_empty_options_are_none() {
        let config = SimpleGitHubConfig::new(GitHubSourceOptions {
            url: "Org/Repo".into(),
            branch: Some(String::new()),
            file_glob: Some("  ".into()),
            access_token: Some(String::new()),
        })
        .unwrap();
        assert_eq!(config.branch(), None);
        assert_eq!(config.file_glob(), None);
        assert_eq!(config.access_token(), None);
        assert!(config.matches_glob("anything/at/all.txt"));
    }

    #[test]
    fn test_comma_separated_globs() {
        let config = SimpleGitHubConfig::new(GitHubSourceOptions {
            url: "Org/Repo".into(),
            file_glob: Some("*.md, docs/*.txt".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(config.matches_glob("README.md"));
        // `*` crosses directory separators.
        assert!(config.matches_glob("guide/intro.md"));
        assert!(config.matches_glob("docs/notes.txt"));
        assert!(!config.matches_glob("notes.txt"));
        assert!(!config.matches_glob("report.pdf"));
    }

    #[test]
    fn test_invalid_glob_is_config_error() {
        let err = SimpleGitHubConfig::new(GitHubSourceOptions {
            url: "Org/Repo".into(),
            file_glob: Some("docs/[".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_options_deserialize() {
        let options: GitHubSourceOptions = serde_json::from_value(serde_json::json!({
            "url": "Org/Repo",
            "branch": "dev",
        }))
        .unwrap();
        let config = SimpleGitHubConfig::new(options).unwrap();
        assert_eq!(config.branch(), Some("dev"));
        assert_eq!(config.file_glob(), None);
    }
}

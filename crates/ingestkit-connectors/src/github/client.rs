//! GitHub REST v3 client over reqwest.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use ingestkit_core::{Error, Result};

use super::api::{ContentFile, GitHubApi, GitTree, RawDownload, RepoInfo};
use super::config::SimpleGitHubConfig;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

/// Authenticated (or anonymous) GitHub API client.
///
/// Without a token, requests are subject to the unauthenticated rate limit.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_api_url(DEFAULT_API_URL, token)
    }

    /// Client against a different API root (GitHub Enterprise).
    pub fn with_api_url(api_url: &str, token: Option<String>) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| Error::Config(format!("invalid GitHub API URL {:?}: {}", api_url, e)))?;
        if api_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "GitHub API URL {:?} cannot have path segments",
                api_url.as_str()
            )));
        }
        let http = Client::builder()
            .user_agent(concat!("ingestkit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(http_err)?;

        Ok(Self {
            http,
            api_url,
            token,
        })
    }

    pub fn from_config(config: &SimpleGitHubConfig) -> Result<Self> {
        Self::new(config.access_token().map(str::to_string))
    }

    /// `<api>/repos/<owner>/<name>/<segments...>`, each segment percent-encoded.
    fn repo_url<'a>(
        &self,
        full_name: &'a str,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("repos")
                .extend(full_name.split('/'))
                .extend(segments);
        }
        url
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        self.authorize(request)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.get(url.clone()).send().await.map_err(http_err)?;
        let status = response.status();
        let body = response.text().await.map_err(http_err)?;

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(Error::Http(format!("GitHub API error {}: {}", status, body)));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl GitHubApi for GitHubClient {
    async fn get_repo(&self, full_name: &str) -> Result<RepoInfo> {
        self.get_json(self.repo_url(full_name, [])).await
    }

    async fn get_git_tree(&self, full_name: &str, sha: &str, recursive: bool) -> Result<GitTree> {
        let mut url = self.repo_url(full_name, tree_segments(sha));
        if recursive {
            url.query_pairs_mut().append_pair("recursive", "1");
        }
        self.get_json(url).await
    }

    async fn get_contents(&self, full_name: &str, path: &str, git_ref: &str) -> Result<ContentFile> {
        let mut url = self.repo_url(full_name, std::iter::once("contents").chain(path.split('/')));
        url.query_pairs_mut().append_pair("ref", git_ref);
        let response: ContentsResponse = self.get_json(url).await?;
        response.into_content_file()
    }

    async fn download(&self, url: &str) -> Result<RawDownload> {
        debug!("GET {} (direct download)", url);
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(http_err)?;
        let status = response.status();
        let body = if status.is_success() {
            response.bytes().await.map_err(http_err)?.to_vec()
        } else {
            Vec::new()
        };
        Ok(RawDownload {
            status: status.as_u16(),
            body,
        })
    }
}

/// Wire shape of `GET /repos/{owner}/{repo}/contents/{path}` for a file.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    path: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
}

impl ContentsResponse {
    fn into_content_file(self) -> Result<ContentFile> {
        let encoding = self.encoding.unwrap_or_else(|| "none".to_string());
        let content = match self.content.as_deref() {
            None | Some("") => Vec::new(),
            Some(data) if encoding == "base64" => {
                // The API wraps base64 payloads at 60 columns.
                let packed: String = data.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD.decode(packed).map_err(|e| {
                    Error::Http(format!("invalid base64 content for {}: {}", self.path, e))
                })?
            }
            Some(data) => data.as_bytes().to_vec(),
        };

        Ok(ContentFile {
            path: self.path,
            size: self.size,
            encoding,
            content,
            download_url: self.download_url,
        })
    }
}

/// `git/trees/<ref>`, with a slashed branch name kept as nested segments.
fn tree_segments(git_ref: &str) -> impl Iterator<Item = &str> {
    ["git", "trees"].into_iter().chain(git_ref.split('/'))
}

fn http_err(e: reqwest::Error) -> Error {
    Error::Http(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_url_encodes_segments() {
        let client = GitHubClient::new(None).unwrap();
        let url = client.repo_url("Org/Repo", ["contents", "docs", "my notes.md"]);
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/Org/Repo/contents/docs/my%20notes.md"
        );
    }

    #[test]
    fn test_enterprise_api_root() {
        let client = GitHubClient::with_api_url("https://ghe.example.com/api/v3/", None).unwrap();
        let url = client.repo_url("Org/Repo", ["git", "trees", "main"]);
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/Org/Repo/git/trees/main"
        );
    }

    #[test]
    fn test_tree_url_keeps_slashed_branch() {
        let client = GitHubClient::new(None).unwrap();
        let url = client.repo_url("Org/Repo", tree_segments("feature/x"));
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/Org/Repo/git/trees/feature/x"
        );
    }

    #[test]
    fn test_invalid_api_root() {
        assert!(matches!(
            GitHubClient::with_api_url("not a url", None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_decode_base64_contents() {
        let response: ContentsResponse = serde_json::from_value(serde_json::json!({
            "type": "file",
            "path": "README.md",
            "size": 11,
            "encoding": "base64",
            "content": "aGVsbG8g\nd29ybGQ=\n",
            "download_url": "https://raw.githubusercontent.com/Org/Repo/main/README.md"
        }))
        .unwrap();

        let file = response.into_content_file().unwrap();
        assert_eq!(file.content, b"hello world");
        assert!(!file.is_too_large_for_api());
    }

    #[test]
    fn test_large_file_has_no_content() {
        let response: ContentsResponse = serde_json::from_value(serde_json::json!({
            "type": "file",
            "path": "big.pdf",
            "size": 2_000_000,
            "encoding": "none",
            "content": "",
            "download_url": "https://raw.githubusercontent.com/Org/Repo/main/big.pdf"
        }))
        .unwrap();

        let file = response.into_content_file().unwrap();
        assert!(file.content.is_empty());
        assert!(file.is_too_large_for_api());
    }

    #[test]
    fn test_bad_base64_is_error() {
        let response = ContentsResponse {
            path: "x.md".into(),
            size: 3,
            encoding: Some("base64".into()),
            content: Some("!!!".into()),
            download_url: None,
        };
        assert!(response.into_content_file().is_err());
    }
}

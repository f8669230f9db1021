//! Remote operations the GitHub connector depends on.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ingestkit_core::{Error, Result};

use super::config::SimpleGitHubConfig;

/// Repository metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub full_name: String,
    pub default_branch: String,
}

/// Kind of a git tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeEntryKind {
    /// A file.
    Blob,
    /// A directory.
    Tree,
    /// A submodule.
    Commit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: TreeEntryKind,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub sha: String,
}

impl TreeEntry {
    pub fn blob(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: TreeEntryKind::Blob,
            size: None,
            sha: String::new(),
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: TreeEntryKind::Tree,
            size: None,
            sha: String::new(),
        }
    }
}

/// A recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitTree {
    pub sha: String,
    pub tree: Vec<TreeEntry>,
    /// Set by the API when the listing exceeded its entry limit.
    #[serde(default)]
    pub truncated: bool,
}

/// File contents as returned by the contents endpoint, already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    pub path: String,
    /// Size of the file in the repository, in bytes.
    pub size: u64,
    /// Transfer encoding reported by the API (`base64`, or `none` for large files).
    pub encoding: String,
    /// Decoded bytes. Empty when the API did not inline the file.
    pub content: Vec<u8>,
    pub download_url: Option<String>,
}

impl ContentFile {
    /// The API omits content for files above its inline size limit and
    /// reports encoding `none`; those must be fetched from `download_url`.
    pub fn is_too_large_for_api(&self) -> bool {
        self.content.is_empty() && self.encoding == "none" && self.size > 0
    }
}

/// Response of a direct download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDownload {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawDownload {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GitHub REST operations used by the connector.
///
/// Repositories are addressed by `<owner>/<name>`.
pub trait GitHubApi: Send + Sync {
    fn get_repo(&self, full_name: &str) -> impl Future<Output = Result<RepoInfo>> + Send;

    fn get_git_tree(
        &self,
        full_name: &str,
        sha: &str,
        recursive: bool,
    ) -> impl Future<Output = Result<GitTree>> + Send;

    fn get_contents(
        &self,
        full_name: &str,
        path: &str,
        git_ref: &str,
    ) -> impl Future<Output = Result<ContentFile>> + Send;

    fn download(&self, url: &str) -> impl Future<Output = Result<RawDownload>> + Send;
}

/// A resolved repository shared by every document listed from it.
#[derive(Debug)]
pub struct Repository<A> {
    api: Arc<A>,
    info: RepoInfo,
}

impl<A: GitHubApi> Repository<A> {
    /// Resolve a repository by `<owner>/<name>`.
    pub async fn open(api: Arc<A>, full_name: &str) -> Result<Self> {
        let info = api.get_repo(full_name).await?;
        Ok(Self { api, info })
    }

    pub fn full_name(&self) -> &str {
        &self.info.full_name
    }

    pub fn default_branch(&self) -> &str {
        &self.info.default_branch
    }

    pub async fn get_git_tree(&self, sha: &str, recursive: bool) -> Result<GitTree> {
        self.api
            .get_git_tree(&self.info.full_name, sha, recursive)
            .await
    }

    pub async fn get_contents(&self, path: &str, git_ref: &str) -> Result<ContentFile> {
        self.api
            .get_contents(&self.info.full_name, path, git_ref)
            .await
    }

    pub async fn download(&self, url: &str) -> Result<RawDownload> {
        self.api.download(url).await
    }
}

/// Placeholder API for builds without the `github` feature. It has no
/// values, so a connector over it can never be constructed.
#[derive(Debug, Clone, Copy)]
pub enum Unavailable {}

impl Unavailable {
    pub fn from_config(_config: &SimpleGitHubConfig) -> Result<Self> {
        Err(Error::MissingCapability {
            capability: "GitHub API client",
            feature: "github",
        })
    }
}

impl GitHubApi for Unavailable {
    async fn get_repo(&self, _full_name: &str) -> Result<RepoInfo> {
        match *self {}
    }

    async fn get_git_tree(&self, _full_name: &str, _sha: &str, _recursive: bool) -> Result<GitTree> {
        match *self {}
    }

    async fn get_contents(&self, _full_name: &str, _path: &str, _git_ref: &str) -> Result<ContentFile> {
        match *self {}
    }

    async fn download(&self, _url: &str) -> Result<RawDownload> {
        match *self {}
    }
}

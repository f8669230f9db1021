//! In-memory [`GitHubApi`] for connector tests.

use std::collections::HashMap;
use std::sync::Mutex;

use ingestkit_core::{Error, Result};

use super::api::{ContentFile, GitHubApi, GitTree, RawDownload, RepoInfo, TreeEntry};

#[derive(Debug, Default)]
pub(crate) struct FakeGitHub {
    pub default_branch: String,
    pub tree: Vec<TreeEntry>,
    pub contents: HashMap<String, ContentFile>,
    pub downloads: HashMap<String, RawDownload>,
    /// One line per API call in call order, e.g. `"repo Org/Repo"`,
    /// `"tree main recursive=true"`, `"contents a.md@main"`, `"download <url>"`.
    pub calls: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new(default_branch: &str, tree: Vec<TreeEntry>) -> Self {
        Self {
            default_branch: default_branch.to_string(),
            tree,
            ..Default::default()
        }
    }

    /// Register a small file the API returns inline.
    pub fn with_inline(mut self, path: &str, bytes: &[u8]) -> Self {
        self.contents.insert(
            path.to_string(),
            ContentFile {
                path: path.to_string(),
                size: bytes.len() as u64,
                encoding: "base64".to_string(),
                content: bytes.to_vec(),
                download_url: Some(raw_url(path)),
            },
        );
        self
    }

    /// Register a file above the inline limit, served by direct download.
    pub fn with_large(mut self, path: &str, size: u64, download: RawDownload) -> Self {
        self.contents.insert(
            path.to_string(),
            ContentFile {
                path: path.to_string(),
                size,
                encoding: "none".to_string(),
                content: Vec::new(),
                download_url: Some(raw_url(path)),
            },
        );
        self.downloads.insert(raw_url(path), download);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub(crate) fn raw_url(path: &str) -> String {
    format!("https://raw.example/{}", path)
}

impl GitHubApi for FakeGitHub {
    async fn get_repo(&self, full_name: &str) -> Result<RepoInfo> {
        self.record(format!("repo {}", full_name));
        Ok(RepoInfo {
            full_name: full_name.to_string(),
            default_branch: self.default_branch.clone(),
        })
    }

    async fn get_git_tree(&self, _full_name: &str, sha: &str, recursive: bool) -> Result<GitTree> {
        self.record(format!("tree {} recursive={}", sha, recursive));
        Ok(GitTree {
            sha: sha.to_string(),
            tree: self.tree.clone(),
            truncated: false,
        })
    }

    async fn get_contents(&self, _full_name: &str, path: &str, git_ref: &str) -> Result<ContentFile> {
        self.record(format!("contents {}@{}", path, git_ref));
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    async fn download(&self, url: &str) -> Result<RawDownload> {
        self.record(format!("download {}", url));
        Ok(self.downloads.get(url).cloned().unwrap_or(RawDownload {
            status: 404,
            body: Vec::new(),
        }))
    }
}

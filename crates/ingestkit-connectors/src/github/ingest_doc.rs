//! One remote GitHub file pending download.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use ingestkit_core::{
    DownloadFailurePolicy, Error, FileHandler, LocalFileHandler, Result, StandardConfig,
};

use super::api::{GitHubApi, Repository};

/// Where the written bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadSource {
    /// Content inlined in the contents API response.
    Inline,
    /// Fetched from the raw download URL (file above the inline limit).
    DirectDownload,
    /// Direct download failed; an empty file was written.
    Skipped,
    /// A non-empty local copy already existed; nothing was fetched.
    Cached,
}

/// Result of materializing one document locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOutcome {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub source: DownloadSource,
}

/// A file in a GitHub repository, listed at a given ref.
pub struct GitHubIngestDoc<A> {
    standard_config: Arc<StandardConfig>,
    repo: Arc<Repository<A>>,
    path: String,
    git_ref: String,
    handler: LocalFileHandler,
}

impl<A> std::fmt::Debug for GitHubIngestDoc<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubIngestDoc")
            .field("path", &self.path)
            .field("git_ref", &self.git_ref)
            .finish()
    }
}

impl<A: GitHubApi> std::fmt::Display for GitHubIngestDoc<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:{}", self.repo.full_name(), self.git_ref, self.path)
    }
}

impl<A: GitHubApi> GitHubIngestDoc<A> {
    pub fn new(
        standard_config: Arc<StandardConfig>,
        repo: Arc<Repository<A>>,
        path: impl Into<String>,
        git_ref: impl Into<String>,
    ) -> Self {
        Self {
            standard_config,
            repo,
            path: path.into(),
            git_ref: git_ref.into(),
            handler: LocalFileHandler,
        }
    }

    /// Path relative to the repository root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    /// Local path of the raw download.
    pub fn filename(&self) -> PathBuf {
        self.standard_config.download_dir.join(&self.path)
    }

    /// Local path of the structured output for this document.
    pub fn output_filename(&self) -> PathBuf {
        self.standard_config
            .output_dir
            .join(format!("{}.json", self.path))
    }

    /// Download unless a non-empty local copy exists and re-download is off.
    pub async fn get_file(&self) -> Result<DownloadOutcome> {
        let filename = self.filename();
        if !self.standard_config.re_download {
            let stat = self.handler.stat(&filename)?;
            if stat.is_file && stat.size > 0 {
                debug!("{} already downloaded to {}", self, filename.display());
                return Ok(DownloadOutcome {
                    path: filename,
                    bytes_written: 0,
                    source: DownloadSource::Cached,
                });
            }
        }

        debug!("Fetching {}", self);
        self.fetch_and_write().await
    }

    /// Fetch the file and write it in binary mode, replacing any local copy.
    ///
    /// Files above the API's inline limit are fetched from their raw
    /// download URL. If that fails, the configured
    /// [`DownloadFailurePolicy`] decides between an empty file and an error.
    pub async fn fetch_and_write(&self) -> Result<DownloadOutcome> {
        let content_file = self.repo.get_contents(&self.path, &self.git_ref).await?;

        let (contents, source) = if content_file.is_too_large_for_api() {
            info!(
                "{} is too large for the GitHub API, using direct download link instead",
                self.path
            );
            let url = content_file
                .download_url
                .as_deref()
                .ok_or_else(|| Error::NotFound(format!("download URL for {}", self)))?;
            let response = self.repo.download(url).await?;

            if response.is_success() {
                (response.body, DownloadSource::DirectDownload)
            } else {
                match self.standard_config.download_failure_policy {
                    DownloadFailurePolicy::Skip => {
                        warn!(
                            "Direct download of {} failed with HTTP {}; skipping this file",
                            self.path, response.status
                        );
                        (Vec::new(), DownloadSource::Skipped)
                    }
                    DownloadFailurePolicy::Fail => {
                        return Err(Error::Download {
                            url: url.to_string(),
                            status: response.status,
                        });
                    }
                }
            }
        } else {
            (content_file.content, DownloadSource::Inline)
        };

        let filename = self.filename();
        if let Some(parent) = filename.parent() {
            self.handler.create_dir_all(parent)?;
        }
        self.handler.write_bytes(&contents, &filename)?;

        Ok(DownloadOutcome {
            path: filename,
            bytes_written: contents.len() as u64,
            source,
        })
    }

    /// Remove the raw download unless downloads are preserved.
    pub fn cleanup_file(&self) -> Result<()> {
        if self.standard_config.preserve_downloads {
            return Ok(());
        }
        let filename = self.filename();
        if self.handler.stat(&filename)?.is_file {
            debug!("Cleaning up {}", filename.display());
            self.handler.remove(&filename)?;
        }
        Ok(())
    }
}

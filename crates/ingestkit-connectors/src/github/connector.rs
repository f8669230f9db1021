//! GitHub connector - lists a repository and yields one ingest doc per file.

use std::sync::Arc;

use tracing::{debug, info, warn};

use ingestkit_core::{FileType, Result, StandardConfig};

use super::api::{GitHubApi, Repository, TreeEntryKind};
use super::config::SimpleGitHubConfig;
use super::ingest_doc::GitHubIngestDoc;

/// Lists the files of one GitHub repository for ingestion.
pub struct GitHubConnector<A> {
    standard_config: Arc<StandardConfig>,
    config: Arc<SimpleGitHubConfig>,
    api: Arc<A>,
}

impl<A> std::fmt::Debug for GitHubConnector<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConnector")
            .field("repo", &self.config.full_name())
            .field("branch", &self.config.branch())
            .field("file_glob", &self.config.file_glob())
            .finish()
    }
}

impl<A: GitHubApi> GitHubConnector<A> {
    pub fn with_api(standard_config: StandardConfig, config: SimpleGitHubConfig, api: A) -> Self {
        Self {
            standard_config: Arc::new(standard_config),
            config: Arc::new(config),
            api: Arc::new(api),
        }
    }

    pub fn config(&self) -> &SimpleGitHubConfig {
        &self.config
    }

    pub fn standard_config(&self) -> &StandardConfig {
        &self.standard_config
    }

    pub fn is_file_type_supported(&self, path: &str) -> bool {
        let supported = FileType::is_supported(path);
        if !supported {
            debug!("Discarding {:?}: unsupported file type", path);
        }
        supported
    }

    pub fn does_path_match_glob(&self, path: &str) -> bool {
        let matched = self.config.matches_glob(path);
        if !matched {
            debug!("Discarding {:?}: does not match any configured glob", path);
        }
        matched
    }

    /// Resolve the branch, list its full tree in one call, and keep the
    /// supported files that match the glob filter, in listing order.
    pub async fn get_ingest_docs(&self) -> Result<Vec<GitHubIngestDoc<A>>> {
        let repo = Arc::new(Repository::open(self.api.clone(), &self.config.full_name()).await?);

        let sha = match self.config.branch() {
            Some(branch) => branch.to_string(),
            None => repo.default_branch().to_string(),
        };

        let tree = repo.get_git_tree(&sha, true).await?;
        if tree.truncated {
            warn!(
                "Tree listing for {}@{} was truncated by the API; some files will be missing",
                repo.full_name(),
                sha
            );
        }

        let total = tree.tree.len();
        let docs: Vec<GitHubIngestDoc<A>> = tree
            .tree
            .into_iter()
            .filter(|entry| {
                entry.kind == TreeEntryKind::Blob
                    && self.is_file_type_supported(&entry.path)
                    && self.does_path_match_glob(&entry.path)
            })
            .map(|entry| {
                GitHubIngestDoc::new(
                    self.standard_config.clone(),
                    repo.clone(),
                    entry.path,
                    sha.clone(),
                )
            })
            .collect();

        info!(
            "GitHub {}@{}: {} of {} tree entries selected for ingestion",
            repo.full_name(),
            sha,
            docs.len(),
            total
        );
        Ok(docs)
    }
}

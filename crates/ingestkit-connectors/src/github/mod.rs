//! GitHub repository connector.

pub mod api;
#[cfg(feature = "github")]
pub mod client;
pub mod config;
pub mod connector;
pub mod ingest_doc;
#[cfg(test)]
pub(crate) mod testing;

pub use api::{
    ContentFile, GitHubApi, GitTree, RawDownload, RepoInfo, Repository, TreeEntry, TreeEntryKind,
};
#[cfg(feature = "github")]
pub use client::GitHubClient;
pub use config::{GitHubSourceOptions, SimpleGitHubConfig};
pub use connector::GitHubConnector;
pub use ingest_doc::{DownloadOutcome, DownloadSource, GitHubIngestDoc};

use ingestkit_core::{Result, StandardConfig};

use crate::capabilities::Capability;

/// API backing [`connect`]: the reqwest client when the `github` feature is
/// enabled, an uninhabited placeholder otherwise.
#[cfg(feature = "github")]
pub type DefaultGitHubApi = client::GitHubClient;
#[cfg(not(feature = "github"))]
pub type DefaultGitHubApi = api::Unavailable;

/// Build a connector backed by the GitHub REST API.
///
/// Fails with `Error::MissingCapability` when the crate was built without
/// the `github` feature.
pub fn connect(
    standard_config: StandardConfig,
    config: SimpleGitHubConfig,
) -> Result<GitHubConnector<DefaultGitHubApi>> {
    Capability::GitHub.require()?;
    let api = DefaultGitHubApi::from_config(&config)?;
    Ok(GitHubConnector::with_api(standard_config, config, api))
}

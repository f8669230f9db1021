//! Data connectors: GitHub repository download, Notion block parsing.
//!
//! The GitHub connector lists a repository tree, keeps supported files that
//! match the configured glob, and writes each one under the download
//! directory. The HTTP client is behind the `github` feature; without it,
//! [`github::connect`] fails with a missing-capability error.
//!
//! The Notion module decodes tagged block objects into the closed
//! [`notion::Block`] enum through a static tag registry.

pub mod capabilities;
pub mod github;
pub mod notion;

pub use capabilities::Capability;
pub use github::{GitHubConnector, GitHubIngestDoc, SimpleGitHubConfig};
pub use notion::{Block, BlockBase, NotionBlock, RichText};

//! `ingestkit github` - download a repository's supported files.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use ingestkit_connectors::github::{
    self, DownloadSource, GitHubApi, GitHubConnector, GitHubSourceOptions, SimpleGitHubConfig,
};
use ingestkit_core::{DownloadFailurePolicy, StandardConfig};

#[derive(Debug, clap::Args)]
pub struct GitHubArgs {
    /// Repository URL (`https://github.com/<owner>/<name>`) or `<owner>/<name>`
    pub url: String,

    /// Branch or ref (default: the repository default branch)
    #[arg(long)]
    pub branch: Option<String>,

    /// Comma-separated glob filter, e.g. "*.md,docs/*"
    #[arg(long)]
    pub glob: Option<String>,

    /// Where files are written
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Fetch files even if a local copy exists
    #[arg(long)]
    pub re_download: bool,

    /// Treat failed large-file downloads as errors
    #[arg(long)]
    pub fail_on_download_error: bool,
}

/// Per-run download tally.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub listed: usize,
    pub downloaded: usize,
    pub cached: usize,
    pub skipped: Vec<String>,
    pub errors: Vec<String>,
    pub bytes: u64,
}

/// Build settings and source options from command-line arguments.
pub fn configure(
    args: &GitHubArgs,
    data_dir: &Path,
) -> anyhow::Result<(StandardConfig, SimpleGitHubConfig)> {
    let mut standard = StandardConfig::from_env(data_dir)?;
    if let Some(dir) = &args.download_dir {
        standard.download_dir = dir.clone();
    }
    if args.re_download {
        standard.re_download = true;
    }
    if args.fail_on_download_error {
        standard.download_failure_policy = DownloadFailurePolicy::Fail;
    }

    let options = GitHubSourceOptions {
        url: args.url.clone(),
        branch: args.branch.clone(),
        file_glob: args.glob.clone(),
        access_token: args.token.clone(),
    };

    Ok((standard, SimpleGitHubConfig::new(options)?))
}

/// List the repository and fetch every selected file, one at a time.
///
/// A failed document is recorded and the run continues with the next one.
pub async fn download_all<A: GitHubApi>(
    connector: &GitHubConnector<A>,
) -> anyhow::Result<DownloadReport> {
    let docs = connector.get_ingest_docs().await?;
    let mut report = DownloadReport {
        listed: docs.len(),
        ..Default::default()
    };

    for doc in &docs {
        match doc.get_file().await {
            Ok(outcome) => {
                report.bytes += outcome.bytes_written;
                match outcome.source {
                    DownloadSource::Inline | DownloadSource::DirectDownload => {
                        report.downloaded += 1
                    }
                    DownloadSource::Cached => report.cached += 1,
                    DownloadSource::Skipped => report.skipped.push(doc.path().to_string()),
                }
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", doc, e);
                report.errors.push(format!("{}: {}", doc.path(), e));
            }
        }
    }

    Ok(report)
}

pub async fn run(args: &GitHubArgs, data_dir: &Path) -> anyhow::Result<DownloadReport> {
    let (standard, config) = configure(args, data_dir)?;
    info!(
        "Downloading {} into {}",
        config.full_name(),
        standard.download_dir.display()
    );

    let connector = github::connect(standard, config)?;
    download_all(&connector).await
}

pub fn print_report(report: &DownloadReport) {
    println!("Files listed:      {}", report.listed);
    println!("Downloaded:        {}", report.downloaded);
    println!("Already present:   {}", report.cached);
    println!("Bytes written:     {}", report.bytes);
    if !report.skipped.is_empty() {
        println!("Skipped (download failed, empty file written):");
        for path in &report.skipped {
            println!("  {}", path);
        }
    }
    if !report.errors.is_empty() {
        println!("Errors:");
        for error in &report.errors {
            println!("  {}", error);
        }
    }
}

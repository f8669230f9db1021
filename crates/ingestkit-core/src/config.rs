//! Connector-independent ingestion settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// What to do when a file cannot be downloaded from a remote source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFailurePolicy {
    /// Log the failure and write an empty file.
    #[default]
    Skip,
    /// Return an error for that document.
    Fail,
}

impl std::str::FromStr for DownloadFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(Error::Config(format!(
                "unknown download failure policy {:?}, expected \"skip\" or \"fail\"",
                other
            ))),
        }
    }
}

/// Settings shared by every connector: where files land and how
/// downloads behave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardConfig {
    /// Directory that raw downloaded files are written to.
    pub download_dir: PathBuf,
    /// Directory for structured output (`<path>.json` per document).
    pub output_dir: PathBuf,
    /// Fetch files again even if a non-empty local copy exists.
    #[serde(default)]
    pub re_download: bool,
    /// Keep downloaded files after processing.
    #[serde(default)]
    pub preserve_downloads: bool,
    #[serde(default)]
    pub download_failure_policy: DownloadFailurePolicy,
}

impl Default for StandardConfig {
    fn default() -> Self {
        Self::new("data")
    }
}

impl StandardConfig {
    /// Create settings rooted at `root` (`root/downloads`, `root/structured-output`).
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            download_dir: root.join("downloads"),
            output_dir: root.join("structured-output"),
            re_download: false,
            preserve_downloads: false,
            download_failure_policy: DownloadFailurePolicy::Skip,
        }
    }

    /// Load settings from a JSON file, falling back to defaults under `root`
    /// when the file is absent.
    pub fn load(config_path: &Path, root: impl AsRef<Path>) -> Result<Self> {
        match std::fs::read_to_string(config_path) {
            Ok(data) => {
                let config: StandardConfig = serde_json::from_str(&data)?;
                info!("Loaded ingest config from {}", config_path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new(root)),
            Err(e) => Err(e.into()),
        }
    }

    /// Create settings from `INGESTKIT_*` environment variables and defaults.
    pub fn from_env(root: impl AsRef<Path>) -> Result<Self> {
        Self::from_lookup(root, |key| std::env::var(key).ok())
    }

    /// Like [`StandardConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(
        root: impl AsRef<Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::new(root);

        if let Some(dir) = lookup("INGESTKIT_DOWNLOAD_DIR") {
            config.download_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("INGESTKIT_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("INGESTKIT_RE_DOWNLOAD") {
            config.re_download = parse_flag("INGESTKIT_RE_DOWNLOAD", &flag);
        }
        if let Some(flag) = lookup("INGESTKIT_PRESERVE_DOWNLOADS") {
            config.preserve_downloads = parse_flag("INGESTKIT_PRESERVE_DOWNLOADS", &flag);
        }
        if let Some(policy) = lookup("INGESTKIT_DOWNLOAD_FAILURE_POLICY") {
            config.download_failure_policy = policy.parse()?;
        }

        Ok(config)
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" | "" => false,
        other => {
            warn!("Ignoring unrecognised value {:?} for {}", other, key);
            false
        }
    }
}

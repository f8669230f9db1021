//! Error types for ingestkit.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Missing optional capability `{capability}`: rebuild with the `{feature}` feature \
         (e.g. `cargo install ingestkit-cli --features {feature}`)"
    )]
    MissingCapability {
        capability: &'static str,
        feature: &'static str,
    },

    #[error("Failed to parse `{block}` block: {message}")]
    BlockParse { block: String, message: String },

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Download failed: {url} returned HTTP {status}")]
    Download { url: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a block parse error from any displayable cause.
    pub fn block_parse(block: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::BlockParse {
            block: block.into(),
            message: cause.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

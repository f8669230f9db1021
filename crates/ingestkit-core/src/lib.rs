//! ingestkit core - error type, configuration, file types, file handlers.

pub mod config;
pub mod error;
pub mod file_handler;
pub mod file_type;

pub use config::{DownloadFailurePolicy, StandardConfig};
pub use error::{Error, Result};
pub use file_handler::{FileHandler, FileStat, LocalFileHandler};
pub use file_type::FileType;

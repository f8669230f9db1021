//! Storage backends for reading and writing pipeline files.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Point-in-time snapshot of a path. Not kept in sync afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub exists: bool,
    pub is_file: bool,
    /// Size in bytes (0 when the path does not exist).
    pub size: u64,
}

/// Whole-file access to a storage backend.
///
/// Reads and writes are not atomic: an interrupted write can leave a
/// partially written file behind.
pub trait FileHandler: Send + Sync {
    /// Snapshot a path. A missing path is reported, not an error.
    fn stat(&self, path: &Path) -> Result<FileStat>;

    fn read(&self, path: &Path) -> Result<String>;

    fn write(&self, data: &str, path: &Path) -> Result<()>;

    /// Binary write, replacing any existing content.
    fn write_bytes(&self, data: &[u8], path: &Path) -> Result<()>;

    /// Create a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Delete a file. Removing a missing file is not an error.
    fn remove(&self, path: &Path) -> Result<()>;

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T>
    where
        Self: Sized,
    {
        let data = self.read(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn write_json<T: Serialize>(&self, value: &T, path: &Path) -> Result<()>
    where
        Self: Sized,
    {
        let data = serde_json::to_string_pretty(value)?;
        self.write(&data, path)
    }
}

/// [`FileHandler`] over the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileHandler;

impl FileHandler for LocalFileHandler {
    fn stat(&self, path: &Path) -> Result<FileStat> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(FileStat {
                exists: true,
                is_file: meta.is_file(),
                size: meta.len(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileStat::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn read(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, data: &str, path: &Path) -> Result<()> {
        Ok(std::fs::write(path, data)?)
    }

    fn write_bytes(&self, data: &[u8], path: &Path) -> Result<()> {
        Ok(std::fs::write(path, data)?)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_stat_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let stat = LocalFileHandler.stat(&dir.path().join("missing.txt")).unwrap();
        assert_eq!(stat, FileStat::default());
        assert!(!stat.exists);
    }

    #[test]
    fn test_stat_file_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        LocalFileHandler.write("hello", &file).unwrap();

        let stat = LocalFileHandler.stat(&file).unwrap();
        assert!(stat.exists);
        assert!(stat.is_file);
        assert_eq!(stat.size, 5);

        let stat = LocalFileHandler.stat(dir.path()).unwrap();
        assert!(stat.exists);
        assert!(!stat.is_file);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        LocalFileHandler.write("a much longer first version", &file).unwrap();
        LocalFileHandler.write("short", &file).unwrap();
        assert_eq!(LocalFileHandler.read(&file).unwrap(), "short");

        LocalFileHandler.write_bytes(&[0xff, 0x00], &file).unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), vec![0xff, 0x00]);
    }

    #[test]
    fn test_read_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFileHandler.read(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_create_dir_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        LocalFileHandler.create_dir_all(&nested).unwrap();
        assert!(LocalFileHandler.stat(&nested).unwrap().exists);

        let file = nested.join("x.bin");
        LocalFileHandler.write_bytes(b"x", &file).unwrap();
        LocalFileHandler.remove(&file).unwrap();
        assert!(!LocalFileHandler.stat(&file).unwrap().exists);

        // Already gone.
        LocalFileHandler.remove(&file).unwrap();
    }

    #[test]
    fn test_json_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.json");
        let value = serde_json::json!({ "elements": [1, 2, 3] });

        LocalFileHandler.write_json(&value, &file).unwrap();
        let back: serde_json::Value = LocalFileHandler.read_json(&file).unwrap();
        assert_eq!(back, value);
    }
}

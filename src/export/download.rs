//! Saves exported files into a download directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::{ExportError, FileDownloader};

/// Writes downloads into a fixed directory, replacing same-named files.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the directory files are saved into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileDownloader for DirectoryDownloader {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "download saved");
        Ok(path)
    }
}

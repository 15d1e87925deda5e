//! Folder resume source

use crate::error::Result;
use crate::input::file_detector::FileType;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Lists candidate files directly inside a directory.
#[derive(Debug, Clone)]
pub struct FolderSource {
    dir: PathBuf,
    filter_extensions: bool,
}

impl FolderSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            filter_extensions: false,
        }
    }

    /// Drop anything that is not `.pdf`/`.docx` at listing time instead of
    /// leaving it to the loader.
    pub fn with_extension_filter(mut self, enable: bool) -> Self {
        self.filter_extensions = enable;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory when missing, like the first run of a fresh
    /// install would expect.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Files directly inside the folder, sorted by file name. Symlinks to
    /// files are listed; directories and dangling links are not.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        self.ensure_dir()?;

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            if self.filter_extensions && !FileType::from_path(&path).is_resume_format() {
                debug!("Ignoring non-resume file: {}", path.display());
                continue;
            }
            files.push(path);
        }

        files.sort();
        info!("Found {} candidate file(s) in {}", files.len(), self.dir.display());
        Ok(files)
    }
}

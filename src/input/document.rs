//! A candidate resume file as read from disk

use crate::error::Result;
use crate::input::file_detector::FileType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Unknown,
}

impl From<FileType> for DocumentFormat {
    fn from(file_type: FileType) -> Self {
        match file_type {
            FileType::Pdf => DocumentFormat::Pdf,
            FileType::Docx => DocumentFormat::Docx,
            _ => DocumentFormat::Unknown,
        }
    }
}

/// Read once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

impl ResumeDocument {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let path = path.into();
        let format = FileType::from_path(&path).into();
        Self { path, bytes, format }
    }

    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(path, bytes))
    }
}

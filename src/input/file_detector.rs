//! File type detection

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    /// Suffix match is case-sensitive: `CV.PDF` is `Unknown`.
    pub fn from_path(path: &Path) -> Self {
        let name = path.to_string_lossy();
        if name.ends_with(".pdf") {
            FileType::Pdf
        } else if name.ends_with(".docx") {
            FileType::Docx
        } else if name.ends_with(".txt") {
            FileType::Text
        } else if name.ends_with(".md") || name.ends_with(".markdown") {
            FileType::Markdown
        } else {
            FileType::Unknown
        }
    }

    /// Formats a resume may arrive in.
    pub fn is_resume_format(self) -> bool {
        matches!(self, FileType::Pdf | FileType::Docx)
    }
}

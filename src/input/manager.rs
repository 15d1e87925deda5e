//! Input manager: routes a file to the extractor for its format

use crate::error::{Result, ScreenerError};
use crate::input::document::{DocumentFormat, ResumeDocument};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{error, info};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Default, Clone, Copy)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Resume text for `path`, read once into a [`ResumeDocument`].
    /// Unsupported suffixes and every read or extraction failure yield
    /// `""`; callers must read an empty result as "could not read", not as
    /// an empty resume.
    pub async fn load_text(&self, path: &Path) -> String {
        if !FileType::from_path(path).is_resume_format() {
            info!("Skipping unsupported resume format: {}", path.display());
            return String::new();
        }

        match ResumeDocument::read(path).await {
            Ok(document) => self.document_text(&document),
            Err(e) => {
                error!("Error reading {}: {}", path.display(), e);
                String::new()
            }
        }
    }

    /// Same policy as [`load_text`](Self::load_text) for a document already
    /// in memory.
    pub fn document_text(&self, document: &ResumeDocument) -> String {
        let result = match document.format {
            DocumentFormat::Pdf => PdfExtractor.extract(&document.bytes),
            DocumentFormat::Docx => DocxExtractor.extract(&document.bytes),
            DocumentFormat::Unknown => return String::new(),
        };

        match result {
            Ok(text) => text,
            Err(e) => {
                error!("Error extracting text from {}: {}", document.path.display(), e);
                String::new()
            }
        }
    }

    /// The job description is required for a run, so failures propagate.
    pub async fn load_job_description(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "Job description does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let text = match FileType::from_path(path) {
            FileType::Pdf => PdfExtractor.extract(&bytes)?,
            FileType::Docx => DocxExtractor.extract(&bytes)?,
            FileType::Markdown => MarkdownExtractor.extract(&bytes)?,
            FileType::Text => PlainTextExtractor.extract(&bytes)?,
            FileType::Unknown => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "Job description must be .txt, .md, .pdf or .docx: {}",
                    path.display()
                )));
            }
        };

        if text.trim().is_empty() {
            return Err(ScreenerError::InvalidInput(format!(
                "Job description is empty: {}",
                path.display()
            )));
        }

        info!("Loaded job description from {} ({} characters)", path.display(), text.len());
        Ok(text)
    }
}

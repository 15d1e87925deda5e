//! Input processing module
//! Handles file detection, text extraction, and resume sources

pub mod file_detector;
pub mod document;
pub mod text_extractor;
pub mod manager;
pub mod source;
pub mod inbox;

pub use document::{DocumentFormat, ResumeDocument};
pub use manager::InputManager;

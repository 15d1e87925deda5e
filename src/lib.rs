//! Resume screening library: extraction, PII redaction, feature extraction,
//! LLM scoring and feedback delivery

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use error::{Result, ScreenerError};
pub use config::Config;

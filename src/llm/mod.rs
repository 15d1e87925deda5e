//! LLM integration module

pub mod client;
pub mod prompts;
pub mod scoring;

pub use client::LlmClient;
pub use scoring::{parse_score_report, ScoreReport, Scorer};

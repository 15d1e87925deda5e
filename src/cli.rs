//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cv-screener")]
#[command(about = "Screen resumes against a job description and email feedback")]
#[command(
    long_about = "Extract resume text, redact PII, score it with a language model and send \
                  candidates structured feedback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen every resume in the resume folder
    Screen(ScreenArgs),

    /// Fetch resume attachments from unread mail, then screen the folder
    Inbox(ScreenArgs),

    /// Print the normalized (masked) form of one resume without scoring it
    Normalize {
        /// Path to a resume file (PDF or DOCX)
        file: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console", value_parser = parse_output_format)]
        format: OutputFormat,
    },

    /// Show or initialise configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ScreenArgs {
    /// Resume folder (overrides RESUME_FOLDER)
    #[arg(short, long)]
    pub resumes: Option<PathBuf>,

    /// Job description file: TXT, MD, PDF or DOCX (overrides JOB_DESCRIPTION)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Compose feedback but do not send any email
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, write one file per resume here instead of printing
    #[arg(long, requires = "dry_run")]
    pub outbox: Option<PathBuf>,

    /// Summary format: console, json, markdown
    #[arg(short, long, value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration with secrets redacted
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the default configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

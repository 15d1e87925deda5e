//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const REDACTED: &str = "********";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mail: MailConfig,
    pub llm: LlmConfig,
    pub screening: ScreeningConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// Account used both to read the inbox and to send feedback
    pub address: String,
    pub app_password: String,
    pub feedback_recipient: String,
    pub subject: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Bound on one SMTP connect-and-send
    pub smtp_timeout_secs: u64,
    pub imap_host: String,
    pub imap_port: u16,
    pub mailbox: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    pub resume_dir: PathBuf,
    pub job_description: PathBuf,
    pub filter_extensions: bool,
    pub skip_unreadable: bool,
    pub continue_on_error: bool,
    /// Upper bound for one resume's load/score/send unit; 0 disables it
    pub resume_timeout_secs: u64,
    pub keyword_matching: KeywordMatching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatching {
    /// Keyword may appear anywhere inside a line, even inside another word
    #[default]
    Substring,
    WordBoundary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            app_password: String::new(),
            feedback_recipient: String::new(),
            subject: "Your Resume Evaluation Results".to_string(),
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
            smtp_timeout_secs: 60,
            imap_host: "imap.gmail.com".to_string(),
            imap_port: 993,
            mailbox: "INBOX".to_string(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            resume_dir: PathBuf::from("resumes"),
            job_description: PathBuf::from("job_description.txt"),
            filter_extensions: false,
            skip_unreadable: false,
            continue_on_error: true,
            resume_timeout_secs: 300,
            keyword_matching: KeywordMatching::Substring,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl Config {
    /// Load the TOML file (explicit path or the default location), then
    /// `.env`, then process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else if path.is_some() {
            return Err(ScreenerError::Configuration(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        } else {
            Self::default()
        };

        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Apply environment-style overrides. `lookup` is usually `std::env::var`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("EMAIL") {
            self.mail.address = v;
        }
        if let Some(v) = get("APP_PASSWORD") {
            self.mail.app_password = v;
        }
        if let Some(v) = get("FEEDBACK_RECIPIENT") {
            self.mail.feedback_recipient = v;
        }
        if let Some(v) = get("OPENAI_API_KEY") {
            self.llm.api_key = v;
        }
        if let Some(v) = get("OPENAI_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = get("OPENAI_API_BASE") {
            self.llm.api_base = v;
        }
        if let Some(v) = get("RESUME_FOLDER") {
            self.screening.resume_dir = PathBuf::from(v);
        }
        if let Some(v) = get("JOB_DESCRIPTION") {
            self.screening.job_description = PathBuf::from(v);
        }
    }

    /// Everything a network-facing run needs must be present before the
    /// first resume is touched.
    pub fn validate_for_screening(&self) -> Result<()> {
        let required = [
            ("EMAIL", &self.mail.address),
            ("APP_PASSWORD", &self.mail.app_password),
            ("FEEDBACK_RECIPIENT", &self.mail.feedback_recipient),
            ("OPENAI_API_KEY", &self.llm.api_key),
            ("OPENAI_MODEL", &self.llm.model),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ScreenerError::Configuration(format!(
                "Missing required settings: {}. Check your .env file.",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Copy safe to print: credentials replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for secret in [&mut copy.mail.app_password, &mut copy.llm.api_key] {
            if !secret.is_empty() {
                *secret = REDACTED.to_string();
            }
        }
        copy
    }

    /// Writes the config without credentials; those belong in `.env`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut to_write = self.clone();
        to_write.mail.app_password.clear();
        to_write.llm.api_key.clear();

        let content = toml::to_string_pretty(&to_write)
            .map_err(|e| {
                ScreenerError::Configuration(format!("Failed to serialize config: {}", e))
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-screener")
            .join("config.toml")
    }

    pub fn resume_timeout(&self) -> Option<std::time::Duration> {
        match self.screening.resume_timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}

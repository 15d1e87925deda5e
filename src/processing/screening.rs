//! End-to-end screening run: parse, evaluate, compose and deliver, one
//! resume at a time

use crate::config::Config;
use crate::error::{Result, ScreenerError};
use crate::llm::scoring::{ScoreReport, Scorer};
use crate::output::feedback::{compose_feedback, FeedbackMessage};
use crate::output::mailer::FeedbackSender;
use crate::processing::normalizer::ResumeNormalizer;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResumeOutcome {
    Delivered {
        path: String,
        overall_score: u32,
        jd_match_score: u32,
    },
    Skipped {
        path: String,
        reason: String,
    },
    Failed {
        path: String,
        error: String,
    },
}

impl ResumeOutcome {
    pub fn path(&self) -> &str {
        match self {
            ResumeOutcome::Delivered { path, .. }
            | ResumeOutcome::Skipped { path, .. }
            | ResumeOutcome::Failed { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<ResumeOutcome>,
}

impl ScreeningSummary {
    pub fn delivered(&self) -> usize {
        self.count(|o| matches!(o, ResumeOutcome::Delivered { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ResumeOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ResumeOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&ResumeOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

#[derive(Debug, Clone)]
pub struct ScreeningOptions {
    pub recipient: String,
    pub subject: String,
    pub skip_unreadable: bool,
    pub continue_on_error: bool,
    pub resume_timeout: Option<Duration>,
}

impl From<&Config> for ScreeningOptions {
    fn from(config: &Config) -> Self {
        Self {
            recipient: config.mail.feedback_recipient.clone(),
            subject: config.mail.subject.clone(),
            skip_unreadable: config.screening.skip_unreadable,
            continue_on_error: config.screening.continue_on_error,
            resume_timeout: config.resume_timeout(),
        }
    }
}

pub struct ScreeningPipeline<S, F> {
    normalizer: ResumeNormalizer,
    scorer: S,
    sender: F,
    job_description: String,
    options: ScreeningOptions,
}

impl<S: Scorer, F: FeedbackSender> ScreeningPipeline<S, F> {
    pub fn new(config: &Config, scorer: S, sender: F, job_description: String) -> Self {
        Self::with_options(
            ResumeNormalizer::new(config.screening.keyword_matching),
            scorer,
            sender,
            job_description,
            ScreeningOptions::from(config),
        )
    }

    pub fn with_options(
        normalizer: ResumeNormalizer,
        scorer: S,
        sender: F,
        job_description: String,
        options: ScreeningOptions,
    ) -> Self {
        Self {
            normalizer,
            scorer,
            sender,
            job_description,
            options,
        }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn sender(&self) -> &F {
        &self.sender
    }

    /// Screen every file in order. A failing resume is recorded and the run
    /// moves on, unless `continue_on_error` is off.
    pub async fn run(
        &self,
        files: &[PathBuf],
        progress: Option<&ProgressBar>,
    ) -> Result<ScreeningSummary> {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(files.len());

        for path in files {
            if let Some(bar) = progress {
                bar.set_message(display_name(path));
            }

            let outcome = match self.screen_file(path).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Error processing {}: {}", path.display(), e);
                    if !self.options.continue_on_error {
                        return Err(e);
                    }
                    ResumeOutcome::Failed {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                }
            };
            outcomes.push(outcome);

            if let Some(bar) = progress {
                bar.inc(1);
            }
        }

        Ok(ScreeningSummary {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        })
    }

    /// One resume as an independently failable unit. The configured timeout
    /// covers reading, scoring and composing; delivery starts only after
    /// that and is bounded by the sender itself.
    pub async fn screen_file(&self, path: &Path) -> Result<ResumeOutcome> {
        let prepared = match self.options.resume_timeout {
            Some(limit) => tokio::time::timeout(limit, self.prepare(path))
                .await
                .map_err(|_| ScreenerError::Timeout {
                    path: path.display().to_string(),
                    seconds: limit.as_secs(),
                })??,
            None => self.prepare(path).await?,
        };

        let (message, report) = match prepared {
            Prepared::Ready { message, report } => (message, report),
            Prepared::Skipped(outcome) => return Ok(outcome),
        };

        self.sender.send(&message).await?;

        info!("Completed processing: {}", message.resume);
        Ok(ResumeOutcome::Delivered {
            path: message.resume,
            overall_score: report.overall_score,
            jd_match_score: report.jd_match_score,
        })
    }

    async fn prepare(&self, path: &Path) -> Result<Prepared> {
        let name = path.display().to_string();
        info!("Processing resume: {}", name);

        let normalized = self.normalizer.normalize(path).await;
        if normalized.is_empty() && self.options.skip_unreadable {
            warn!("Skipping {}: no readable text", name);
            return Ok(Prepared::Skipped(ResumeOutcome::Skipped {
                path: name,
                reason: "no readable text".to_string(),
            }));
        }

        let report = self
            .scorer
            .score(&normalized.masked_text, &self.job_description)
            .await?;

        let message = compose_feedback(
            &name,
            &self.options.recipient,
            &self.options.subject,
            &report,
            &normalized,
        )?;
        Ok(Prepared::Ready { message, report })
    }
}

enum Prepared {
    Ready {
        message: FeedbackMessage,
        report: ScoreReport,
    },
    Skipped(ResumeOutcome),
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(outcomes: Vec<ResumeOutcome>) -> ScreeningSummary {
        ScreeningSummary {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            outcomes,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = summary(vec![
            ResumeOutcome::Delivered {
                path: "a.pdf".to_string(),
                overall_score: 80,
                jd_match_score: 70,
            },
            ResumeOutcome::Skipped {
                path: "b.txt".to_string(),
                reason: "no readable text".to_string(),
            },
            ResumeOutcome::Failed {
                path: "c.docx".to_string(),
                error: "boom".to_string(),
            },
            ResumeOutcome::Failed {
                path: "d.docx".to_string(),
                error: "boom".to_string(),
            },
        ]);

        assert_eq!(summary.delivered(), 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.outcomes[2].path(), "c.docx");
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = ResumeOutcome::Failed {
            path: "c.docx".to_string(),
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "failed", "path": "c.docx", "error": "boom"})
        );
    }

    #[test]
    fn test_options_follow_config() {
        let mut config = Config::default();
        config.mail.feedback_recipient = "jane@example.com".to_string();
        config.screening.resume_timeout_secs = 0;

        let options = ScreeningOptions::from(&config);
        assert_eq!(options.recipient, "jane@example.com");
        assert_eq!(options.subject, "Your Resume Evaluation Results");
        assert!(options.resume_timeout.is_none());
        assert!(options.continue_on_error);
    }
}

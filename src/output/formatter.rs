//! Rendering of run summaries and normalized resumes

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::normalizer::NormalizedResume;
use crate::processing::screening::{ResumeOutcome, ScreeningSummary};
use colored::{Color, Colorize};

pub trait OutputFormatter {
    fn format_summary(&self, summary: &ScreeningSummary) -> Result<String>;
    fn format_normalized(&self, path: &str, resume: &NormalizedResume) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{}\n", title.bold())
        } else {
            format!("\n{}\n", title)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_summary(&self, summary: &ScreeningSummary) -> Result<String> {
        let mut out = self.header("Screening summary");
        let elapsed = summary.finished_at - summary.started_at;

        out.push_str(&format!(
            "  {} delivered, {} skipped, {} failed in {}s\n\n",
            self.colorize(&summary.delivered().to_string(), Color::Green),
            self.colorize(&summary.skipped().to_string(), Color::Yellow),
            self.colorize(&summary.failed().to_string(), Color::Red),
            elapsed.num_seconds()
        ));

        for outcome in &summary.outcomes {
            let line = match outcome {
                ResumeOutcome::Delivered {
                    path,
                    overall_score,
                    jd_match_score,
                } => format!(
                    "  {} {} (overall {}/100, JD match {}/100)",
                    self.colorize("✓", Color::Green),
                    path,
                    overall_score,
                    jd_match_score
                ),
                ResumeOutcome::Skipped { path, reason } => {
                    format!("  {} {} ({})", self.colorize("-", Color::Yellow), path, reason)
                }
                ResumeOutcome::Failed { path, error } => {
                    format!("  {} {}: {}", self.colorize("✗", Color::Red), path, error)
                }
            };
            out.push_str(&line);
            out.push('\n');
        }

        Ok(out)
    }

    fn format_normalized(&self, path: &str, resume: &NormalizedResume) -> Result<String> {
        let mut out = self.header(&format!("Normalized resume: {}", path));
        out.push_str(&format!("  Batch year: {}\n", resume.batch_year));
        out.push_str(&format!(
            "  AI experience lines: {}\n",
            resume.ai_experience_lines.len()
        ));
        for line in &resume.ai_experience_lines {
            out.push_str(&format!("    - {}\n", line));
        }

        out.push_str(&self.header("Masked text"));
        if resume.masked_text.is_empty() {
            out.push_str(&self.colorize("  (no readable text)", Color::Yellow));
            out.push('\n');
        } else {
            out.push_str(&resume.masked_text);
            out.push('\n');
        }
        Ok(out)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        Ok(if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_summary(&self, summary: &ScreeningSummary) -> Result<String> {
        self.to_json(summary)
    }

    fn format_normalized(&self, path: &str, resume: &NormalizedResume) -> Result<String> {
        self.to_json(&serde_json::json!({ "path": path, "resume": resume }))
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_summary(&self, summary: &ScreeningSummary) -> Result<String> {
        let mut out = String::from("# Screening Summary\n\n");
        out.push_str(&format!(
            "Run started {} and finished {}.\n\n",
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            summary.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str("| Resume | Status | Overall | JD match | Details |\n");
        out.push_str("|---|---|---|---|---|\n");

        for outcome in &summary.outcomes {
            let row = match outcome {
                ResumeOutcome::Delivered {
                    path,
                    overall_score,
                    jd_match_score,
                } => format!("| {} | delivered | {} | {} | |", path, overall_score, jd_match_score),
                ResumeOutcome::Skipped { path, reason } => {
                    format!("| {} | skipped | | | {} |", path, escape_cell(reason))
                }
                ResumeOutcome::Failed { path, error } => {
                    format!("| {} | failed | | | {} |", path, escape_cell(error))
                }
            };
            out.push_str(&row);
            out.push('\n');
        }

        out.push_str(&format!(
            "\n**Totals:** {} delivered, {} skipped, {} failed\n",
            summary.delivered(),
            summary.skipped(),
            summary.failed()
        ));
        Ok(out)
    }

    fn format_normalized(&self, path: &str, resume: &NormalizedResume) -> Result<String> {
        let mut out = format!(
            "# {}\n\n**Batch year:** {}\n\n## AI experience\n\n",
            path, resume.batch_year
        );
        for line in &resume.ai_experience_lines {
            out.push_str(&format!("- {}\n", line));
        }
        out.push_str("\n## Masked text\n\n```\n");
        out.push_str(&resume.masked_text);
        out.push_str("\n```\n");
        Ok(out)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

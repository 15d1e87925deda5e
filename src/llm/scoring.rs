//! Score reports and strict parsing of model replies

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Structured evaluation of one resume against the job description.
/// All scores are in `0..=100`; list order is as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall_score: u32,
    pub component_scores: ComponentScores,
    pub jd_match_score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub relevant_keywords_found: Vec<String>,
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub work_experience: u32,
    pub education: u32,
    pub skills: u32,
    pub formatting: u32,
}

impl ScoreReport {
    fn validate(&self) -> Result<()> {
        let scores = [
            ("overall_score", self.overall_score),
            ("jd_match_score", self.jd_match_score),
            ("component_scores.work_experience", self.component_scores.work_experience),
            ("component_scores.education", self.component_scores.education),
            ("component_scores.skills", self.component_scores.skills),
            ("component_scores.formatting", self.component_scores.formatting),
        ];

        for (field, value) in scores {
            if value > 100 {
                return Err(ScreenerError::ScoreParse(format!(
                    "{} out of range: {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// Anything that can turn masked resume text into a [`ScoreReport`].
pub trait Scorer {
    fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> impl Future<Output = Result<ScoreReport>> + Send;
}

/// Parse a model reply into a report. The reply must be a JSON document of
/// the expected shape, optionally wrapped in a Markdown code fence; any
/// other content is rejected and never interpreted.
pub fn parse_score_report(reply: &str) -> Result<ScoreReport> {
    let body = strip_json_fences(reply);
    if body.is_empty() {
        return Err(ScreenerError::ScoreParse("empty reply".to_string()));
    }

    let report: ScoreReport = serde_json::from_str(body)
        .map_err(|e| ScreenerError::ScoreParse(format!("{} in reply: {}", e, preview(body))))?;
    report.validate()?;
    Ok(report)
}

fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim().strip_suffix("```").unwrap_or(rest).trim()
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 120;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(LIMIT).collect::<String>())
    }
}

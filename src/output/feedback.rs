//! Candidate feedback email composition

use crate::error::Result;
use crate::llm::scoring::ScoreReport;
use crate::processing::normalizer::NormalizedResume;
use askama::Template;

/// Section order is fixed: scores, breakdown, batch year, AI experience,
/// the model's lists, then the next-steps boilerplate.
#[derive(Template)]
#[template(
    ext = "txt",
    source = r#"Dear Candidate,

Thank you for submitting your resume. Here is your detailed evaluation:

OVERALL CV SCORE: {{ report.overall_score }}/100
JD MATCH SCORE: {{ report.jd_match_score }}/100

SCORE BREAKDOWN:
• Work Experience: {{ report.component_scores.work_experience }}/100
• Education: {{ report.component_scores.education }}/100
• Skills: {{ report.component_scores.skills }}/100
• Formatting: {{ report.component_scores.formatting }}/100

BATCH YEAR: {{ batch_year }}

RELEVANT AI EXPERIENCE:
{% for line in ai_experience -%}
- {{ line }}
{% endfor %}
KEY STRENGTHS:
{% for item in report.strengths -%}
- {{ item }}
{% endfor %}
AREAS FOR IMPROVEMENT:
{% for item in report.weaknesses -%}
- {{ item }}
{% endfor %}
SUGGESTIONS:
{% for item in report.suggestions -%}
- {{ item }}
{% endfor %}
MATCHING KEYWORDS FOUND:
{% for item in report.relevant_keywords_found -%}
- {{ item }}
{% endfor %}
MISSING KEYWORDS TO CONSIDER:
{% for item in report.missing_keywords -%}
- {{ item }}
{% endfor %}
NEXT STEPS:
1. Review the feedback and suggestions provided
2. Update your resume addressing the areas for improvement
3. Consider gaining experience in the missing technical areas
4. Resubmit your updated resume for another evaluation

Best regards,
AI Resume Screening Team
"#
)]
struct FeedbackBody<'a> {
    report: &'a ScoreReport,
    batch_year: &'a str,
    ai_experience: &'a [String],
}

/// A composed email, ready for a [`FeedbackSender`](crate::output::mailer::FeedbackSender).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    /// Resume file the feedback is about, used for logs and dry-run file names
    pub resume: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub fn render_feedback(
    report: &ScoreReport,
    batch_year: &str,
    ai_experience: &[String],
) -> Result<String> {
    let body = FeedbackBody {
        report,
        batch_year,
        ai_experience,
    };
    Ok(body.render()?)
}

pub fn compose_feedback(
    resume: &str,
    to: &str,
    subject: &str,
    report: &ScoreReport,
    normalized: &NormalizedResume,
) -> Result<FeedbackMessage> {
    let body = render_feedback(report, &normalized.batch_year, &normalized.ai_experience_lines)?;
    Ok(FeedbackMessage {
        resume: resume.to_string(),
        to: to.to_string(),
        subject: subject.to_string(),
        body,
    })
}

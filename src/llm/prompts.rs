//! Prompt template for resume scoring

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub scoring: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            scoring: SCORING_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Placeholders are filled in template order; inserted text is never
    /// scanned again, so a resume containing `{job}` stays literal.
    pub fn render_scoring(&self, resume_text: &str, job_description: &str) -> String {
        let mut rendered =
            String::with_capacity(self.scoring.len() + resume_text.len() + job_description.len());
        let mut rest = self.scoring.as_str();

        for (placeholder, value) in [("{job}", job_description), ("{resume}", resume_text)] {
            if let Some((head, tail)) = rest.split_once(placeholder) {
                rendered.push_str(head);
                rendered.push_str(value);
                rest = tail;
            }
        }

        rendered.push_str(rest);
        rendered
    }
}

const SCORING_TEMPLATE: &str =
    r#"Evaluate the resume below against the job description and score it.

[Job Description]
{job}

[Resume]
{resume}

Respond with JSON only, using exactly this structure:
{
    "overall_score": <integer 0-100>,
    "component_scores": {
        "work_experience": <integer 0-100>,
        "education": <integer 0-100>,
        "skills": <integer 0-100>,
        "formatting": <integer 0-100>
    },
    "jd_match_score": <integer 0-100>,
    "strengths": [<string>, ...],
    "weaknesses": [<string>, ...],
    "suggestions": [<string>, ...],
    "relevant_keywords_found": [<string>, ...],
    "missing_keywords": [<string>, ...]
}

Base the scores on:
1. Relevance and quality of work experience
2. Fit of education with the requirements
3. Match of technical skills
4. Formatting and clarity
5. Keywords shared with the job description"#;

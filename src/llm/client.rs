//! OpenAI-compatible chat completions client used for scoring

use crate::config::LlmConfig;
use crate::error::{Result, ScreenerError};
use crate::llm::prompts::PromptTemplates;
use crate::llm::scoring::{parse_score_report, ScoreReport, Scorer};
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// One request per call; no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    prompts: PromptTemplates,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: completions_url(&config.api_base),
            prompts: PromptTemplates::default(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single user message and return the reply text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ScreenerError::LlmApi {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        reply_content(&body)
    }
}

impl Scorer for LlmClient {
    async fn score(&self, resume_text: &str, job_description: &str) -> Result<ScoreReport> {
        let prompt = self.prompts.render_scoring(resume_text, job_description);
        debug!("Scoring prompt is {} characters", prompt.len());

        let reply = self.complete(&prompt).await?;
        let report = parse_score_report(&reply)?;

        info!(
            "Model {} scored resume: overall {}, JD match {}",
            self.model, report.overall_score, report.jd_match_score
        );
        Ok(report)
    }
}

fn completions_url(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

/// First choice's message text from a chat completions response body.
fn reply_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ScreenerError::ScoreParse(format!("Unexpected completions response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ScreenerError::ScoreParse("Model returned no content".to_string()))
}

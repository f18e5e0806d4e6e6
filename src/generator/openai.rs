// src/generator/openai.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::Config,
    generator::{ChallengeDraft, ContentGenerator, GenerationError},
    models::quiz::NewQuizQuestion,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CHALLENGE_SYSTEM_PROMPT: &str = "You write short, practical sustainability challenges \
    that one person can finish within a day or a week. Answer in Brazilian Portuguese.";

const QUESTION_SYSTEM_PROMPT: &str = "You write educational multiple-choice questions about \
    recycling, climate change and sustainable habits. Answer in Brazilian Portuguese.";

/// Chat-completions client for OpenAI-compatible APIs.
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChallengeEnvelope {
    #[serde(default)]
    challenges: Vec<ChallengeDraft>,
}

#[derive(Debug, Deserialize)]
struct QuestionEnvelope {
    #[serde(default)]
    questions: Vec<NewQuizQuestion>,
}

impl OpenAiGenerator {
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.openai_api_key.clone()?;
        Some(Self {
            client: Client::new(),
            api_key,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        })
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Status(status, error_text));
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

fn parse_challenges(content: &str) -> Result<Vec<ChallengeDraft>, GenerationError> {
    let envelope: ChallengeEnvelope = serde_json::from_str(content)?;
    Ok(envelope.challenges)
}

fn parse_questions(content: &str) -> Result<Vec<NewQuizQuestion>, GenerationError> {
    let envelope: QuestionEnvelope = serde_json::from_str(content)?;
    Ok(envelope.questions)
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
    async fn generate_challenges(
        &self,
        count: usize,
    ) -> Result<Vec<ChallengeDraft>, GenerationError> {
        let prompt = format!(
            "Generate {} new sustainability challenges. Respond with JSON in this format: \
             {{\"challenges\": [{{\"challenge\": string, \"points\": number}}]}}. \
             Points range from 5 to 15 according to difficulty.",
            count
        );
        let content = self.complete(CHALLENGE_SYSTEM_PROMPT, &prompt).await?;
        parse_challenges(&content)
    }

    async fn generate_quiz_questions(
        &self,
        count: usize,
    ) -> Result<Vec<NewQuizQuestion>, GenerationError> {
        let prompt = format!(
            "Generate {} quiz questions, each with exactly 4 options. Respond with JSON in this \
             format: {{\"questions\": [{{\"question\": string, \"options\": [string, string, \
             string, string], \"correct_answer\": number (0-3), \"points\": number}}]}}.",
            count
        );
        let content = self.complete(QUESTION_SYSTEM_PROMPT, &prompt).await?;
        parse_questions(&content)
    }
}

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};

use crate::domain::repo::RepoRef;
use crate::error::{AppError, AppResult};
use crate::services::GenerationService;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// General-purpose provider; sees only the instruction text, no repository
/// index.
pub struct OpenAiClient {
    http: Client,
    api_key: Option<String>,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("OpenAI API key not configured".to_string()))
    }
}

#[async_trait]
impl GenerationService for OpenAiClient {
    async fn generate(
        &self,
        _repo: &RepoRef,
        _branch: &str,
        instruction: &str,
    ) -> AppResult<String> {
        let api_key = self.api_key()?;
        let request_body = CompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: instruction,
            }],
        };

        let response = self
            .http
            .post(COMPLETIONS_URL)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::Provider(format!("failed to call OpenAI: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Provider(format!(
                "OpenAI responded with {status}: {body}"
            )));
        }

        let payload: CompletionResponse = response.json().await.map_err(|err| {
            AppError::Provider(format!("failed to parse OpenAI response: {err}"))
        })?;

        let content = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(AppError::EmptyResponse);
        }
        Ok(content)
    }

    fn label(&self) -> &'static str {
        "OpenAI"
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

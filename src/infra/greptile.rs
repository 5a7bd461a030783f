use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};

use crate::domain::repo::RepoRef;
use crate::error::{AppError, AppResult};
use crate::services::GenerationService;

const QUERY_URL: &str = "https://api.greptile.com/v2/query";

/// Repository-aware provider backed by an index of allow-listed
/// repositories; queries carry the repository reference so the backend can
/// pull extra context from its index.
pub struct GreptileClient {
    http: Client,
    api_key: Option<String>,
    github_token: Option<String>,
    genius: bool,
}

impl GreptileClient {
    pub fn new(api_key: Option<String>, github_token: Option<String>, genius: bool) -> Self {
        Self {
            http: Client::new(),
            api_key,
            github_token,
            genius,
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Greptile API key not configured".to_string()))
    }
}

#[async_trait]
impl GenerationService for GreptileClient {
    async fn generate(&self, repo: &RepoRef, branch: &str, instruction: &str) -> AppResult<String> {
        let api_key = self.api_key()?;
        let request_body = QueryRequest {
            messages: vec![QueryMessage {
                role: "user",
                content: instruction,
            }],
            repositories: vec![QueryRepository {
                remote: "github",
                repository: repo.full_name(),
                branch,
            }],
            genius: self.genius,
        };

        let mut request = self
            .http
            .post(QUERY_URL)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body);
        if let Some(token) = &self.github_token {
            request = request.header("X-GitHub-Token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AppError::Provider(format!("failed to call Greptile: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Provider(format!(
                "Greptile responded with {status}: {body}"
            )));
        }

        let payload: QueryResponse = response.json().await.map_err(|err| {
            AppError::Provider(format!("failed to parse Greptile response: {err}"))
        })?;

        if payload.message.trim().is_empty() {
            return Err(AppError::EmptyResponse);
        }
        Ok(payload.message)
    }

    fn label(&self) -> &'static str {
        "Greptile"
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    messages: Vec<QueryMessage<'a>>,
    repositories: Vec<QueryRepository<'a>>,
    genius: bool,
}

#[derive(Serialize)]
struct QueryMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct QueryRepository<'a> {
    remote: &'static str,
    repository: String,
    branch: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    message: String,
}

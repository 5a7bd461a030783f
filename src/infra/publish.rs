use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, header::CONTENT_TYPE};
use serde::Serialize;

use crate::domain::repo::Period;
use crate::error::{AppError, AppResult};
use crate::services::PublisherService;

/// Best-effort downstream store for finished changelogs. An unconfigured
/// base URL turns publishing into a no-op.
pub struct PublishClient {
    http: Client,
    base_url: Option<String>,
}

impl PublishClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn endpoint(base_url: &str) -> String {
        format!("{}/api/changelogs", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PublisherService for PublishClient {
    async fn publish(
        &self,
        repo_url: &str,
        content: &str,
        generated_at: DateTime<Utc>,
        period: &Period,
    ) -> AppResult<()> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Ok(());
        };

        let request_body = PublishRequest {
            repo_url,
            content,
            metadata: PublishMetadata {
                generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                period: PublishPeriod {
                    start: period.since.to_rfc3339_opts(SecondsFormat::Secs, true),
                    end: period.until.to_rfc3339_opts(SecondsFormat::Secs, true),
                },
            },
        };

        let response = self
            .http
            .post(Self::endpoint(base_url))
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::Publish(format!("failed to call publish target: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Publish(format!(
                "publish target responded with {status}"
            )));
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishRequest<'a> {
    repo_url: &'a str,
    content: &'a str,
    metadata: PublishMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishMetadata {
    generated_at: String,
    period: PublishPeriod,
}

#[derive(Serialize)]
struct PublishPeriod {
    start: String,
    end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_body_serializes_with_camel_case_wire_fields() {
        let body = PublishRequest {
            repo_url: "https://github.com/facebook/react",
            content: "# Changelog",
            metadata: PublishMetadata {
                generated_at: "2024-02-02T12:00:00Z".to_string(),
                period: PublishPeriod {
                    start: "2024-01-01T00:00:00Z".to_string(),
                    end: "2024-02-01T00:00:00Z".to_string(),
                },
            },
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["repoUrl"], "https://github.com/facebook/react");
        assert_eq!(value["content"], "# Changelog");
        assert_eq!(value["metadata"]["generatedAt"], "2024-02-02T12:00:00Z");
        assert_eq!(value["metadata"]["period"]["start"], "2024-01-01T00:00:00Z");
        assert_eq!(value["metadata"]["period"]["end"], "2024-02-01T00:00:00Z");
    }
}

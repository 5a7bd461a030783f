use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::repo::Period;
use crate::error::AppResult;

#[async_trait]
pub trait PublisherService: Send + Sync {
    /// Forwards a finished changelog downstream. Callers treat failures as
    /// advisory; the orchestration logs and swallows them.
    async fn publish(
        &self,
        repo_url: &str,
        content: &str,
        generated_at: DateTime<Utc>,
        period: &Period,
    ) -> AppResult<()>;
}

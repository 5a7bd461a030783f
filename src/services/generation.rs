use async_trait::async_trait;

use crate::domain::repo::RepoRef;
use crate::error::AppResult;

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Sends one user-role instruction to the backend and returns its text.
    /// An empty response is a hard failure, never an empty changelog.
    async fn generate(&self, repo: &RepoRef, branch: &str, instruction: &str)
    -> AppResult<String>;

    /// Attribution label appended to the changelog when enabled.
    fn label(&self) -> &'static str;
}

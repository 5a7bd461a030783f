use async_trait::async_trait;

use crate::domain::commit::CommitRecord;
use crate::domain::repo::{Period, RepoRef};
use crate::error::AppResult;

/// Hard ceiling on commits fetched for one request; results covering
/// at least this many commits are known-incomplete.
pub const MAX_TOTAL_COMMITS: usize = 3000;

#[async_trait]
pub trait CommitHostService: Send + Sync {
    /// Returns commits for the window in the order the host lists them
    /// (typically reverse-chronological), truncated at `MAX_TOTAL_COMMITS`.
    /// Any network or authorization failure fails the whole fetch.
    async fn fetch_commits(&self, repo: &RepoRef, period: &Period) -> AppResult<Vec<CommitRecord>>;
}

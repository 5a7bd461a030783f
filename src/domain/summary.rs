use crate::domain::repo::Period;

/// Aggregate of everything fetched for one changelog request.
#[derive(Debug, Clone)]
pub struct DiffSummary {
    pub additions: u64,
    pub deletions: u64,
    /// Always `additions - deletions`.
    pub net_diff: i64,
    /// One entry per changed file per commit, in fetch order.
    pub diff_blocks: Vec<String>,
    pub total_commits: usize,
    /// True when the commit ceiling was hit and older history exists.
    pub has_more: bool,
    pub period: Period,
}

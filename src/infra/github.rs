use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, LINK, USER_AGENT},
};
use serde::Deserialize;

use crate::domain::commit::{CommitFile, CommitRecord, CommitStats};
use crate::domain::repo::{Period, RepoRef};
use crate::error::{AppError, AppResult, HostError};
use crate::services::commit_host::{CommitHostService, MAX_TOTAL_COMMITS};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;
const PAGE_DELAY: Duration = Duration::from_millis(100);

pub struct GitHubClient {
    http: Client,
    api_base: String,
    token: Option<String>,
    detail_concurrency: usize,
}

impl GitHubClient {
    pub fn new(token: Option<String>, detail_concurrency: usize) -> Self {
        Self::with_api_base(DEFAULT_API_BASE.to_string(), token, detail_concurrency)
    }

    pub fn with_api_base(
        api_base: String,
        token: Option<String>,
        detail_concurrency: usize,
    ) -> Self {
        Self {
            http: Client::new(),
            api_base,
            token,
            detail_concurrency: detail_concurrency.max(1),
        }
    }

    fn token(&self) -> AppResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GitHub token not configured".to_string()))
    }

    fn commits_endpoint(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}/commits",
            self.api_base.trim_end_matches('/'),
            repo.owner,
            repo.name
        )
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> AppResult<Response> {
        let token = self.token()?;
        let response = self
            .http
            .get(url)
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, "chlog")
            .send()
            .await
            .map_err(|err| HostError::network(format!("request to {url} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(HostError::from_status(
                status.as_u16(),
                format!("GitHub responded with {status}: {body}"),
            )
            .into());
        }
        Ok(response)
    }

    async fn fetch_page(
        &self,
        repo: &RepoRef,
        period: &Period,
        page: usize,
    ) -> AppResult<(Vec<CommitListItem>, bool)> {
        let query = [
            ("since", format_instant(period.since)),
            ("until", format_instant(period.until)),
            ("per_page", PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ];
        let response = self.get(&self.commits_endpoint(repo), &query).await?;
        let has_next = has_next_page(response.headers());
        let items: Vec<CommitListItem> = response.json().await.map_err(|err| {
            HostError::network(format!("failed to parse commit list: {err}"))
        })?;
        Ok((items, has_next))
    }

    async fn fetch_detail(&self, item: CommitListItem) -> AppResult<CommitRecord> {
        let response = self.get(&item.url, &[]).await?;
        let detail: CommitDetail = response.json().await.map_err(|err| {
            HostError::network(format!("failed to parse commit detail: {err}"))
        })?;
        Ok(detail.into_record())
    }
}

#[async_trait]
impl CommitHostService for GitHubClient {
    async fn fetch_commits(&self, repo: &RepoRef, period: &Period) -> AppResult<Vec<CommitRecord>> {
        self.token()?;

        let mut commits = Vec::new();
        let mut page = 1;

        loop {
            let (items, has_next) = self.fetch_page(repo, period, page).await?;
            tracing::debug!(page, count = items.len(), "fetched commit page");

            // Detail requests for one page fan out together; `buffered`
            // bounds the in-flight count and preserves list order.
            let details: Vec<CommitRecord> = stream::iter(items)
                .map(|item| self.fetch_detail(item))
                .buffered(self.detail_concurrency)
                .try_collect()
                .await?;

            commits.extend(details);

            if commits.len() >= MAX_TOTAL_COMMITS {
                commits.truncate(MAX_TOTAL_COMMITS);
                break;
            }
            if !has_next {
                break;
            }

            page += 1;
            tokio::time::sleep(PAGE_DELAY).await;
        }

        Ok(commits)
    }
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// True when the Link response header advertises a `rel="next"` page.
fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|link| link.contains("rel=\"next\""))
}

#[derive(Debug, Deserialize)]
struct CommitListItem {
    url: String,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    sha: String,
    commit: CommitInfo,
    #[serde(default)]
    stats: DetailStats,
    #[serde(default)]
    files: Vec<DetailFile>,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    author: Option<CommitSignature>,
    committer: Option<CommitSignature>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    date: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailStats {
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct DetailFile {
    filename: String,
    patch: Option<String>,
}

impl CommitDetail {
    fn into_record(self) -> CommitRecord {
        let date = self
            .commit
            .author
            .as_ref()
            .or(self.commit.committer.as_ref())
            .map(|sig| sig.date)
            .unwrap_or_else(Utc::now);

        CommitRecord {
            sha: self.sha,
            date,
            message: self.commit.message,
            files: self
                .files
                .into_iter()
                .map(|file| CommitFile {
                    filename: file.filename,
                    patch: file.patch,
                })
                .collect(),
            stats: CommitStats {
                additions: self.stats.additions,
                deletions: self.stats.deletions,
                total: self.stats.total,
            },
        }
    }
}

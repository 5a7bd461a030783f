use std::sync::Arc;

use chrono::Utc;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::repo::{Period, RepoRef};
use crate::domain::summary::DiffSummary;
use crate::error::AppResult;
use crate::services::GenerationService;
use crate::workflow::aggregate::aggregate;
use crate::workflow::truncate::truncate_diffs;

/// Prepended to the changelog whenever the commit ceiling was hit.
pub(crate) const INCOMPLETE_HISTORY_NOTICE: &str = "> Note: only the most recent 3000 commits \
were analyzed. Earlier changes in this period are not reflected below.\n\n";

#[derive(Debug, Clone)]
pub struct ChangelogRequest {
    pub repo_url: String,
    pub period: Period,
    pub branch: String,
    pub publish: bool,
}

/// Which backend a request is routed to. A pure function of configuration
/// and repository identity so routing stays testable without the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderChoice {
    RepositoryAware,
    General,
    Preview,
}

pub fn select_provider(config: &AppConfig, repo_full_name: &str) -> ProviderChoice {
    if config.greptile_enabled && config.repo_is_indexed(repo_full_name) {
        ProviderChoice::RepositoryAware
    } else if config.openai_enabled {
        ProviderChoice::General
    } else {
        ProviderChoice::Preview
    }
}

/// Runs the whole pipeline: fetch, aggregate, truncate, generate, and
/// best-effort publish.
pub async fn generate_changelog(ctx: &AppContext, request: &ChangelogRequest) -> AppResult<String> {
    let repo = RepoRef::parse(&request.repo_url);

    let commits = ctx.commit_host.fetch_commits(&repo, &request.period).await?;
    tracing::debug!(commits = commits.len(), repo = %repo.full_name(), "history fetched");

    let summary = aggregate(&commits, request.period);
    let diff_text = truncate_diffs(&summary.diff_blocks, &ctx.config.truncation_budget());

    let mut content = match select_provider(&ctx.config, &repo.full_name()) {
        ProviderChoice::Preview => preview_changelog(&repo, &summary, &diff_text),
        choice => {
            let provider: &Arc<dyn GenerationService> = match choice {
                ProviderChoice::RepositoryAware => &ctx.repo_aware_provider,
                _ => &ctx.general_provider,
            };
            let instruction = build_instruction(&summary, &diff_text);
            let mut generated = provider
                .generate(&repo, &request.branch, &instruction)
                .await?;
            if ctx.config.attribution {
                generated.push_str(&format!("\n\n_Generated with {}_", provider.label()));
            }
            generated
        }
    };

    if summary.has_more {
        content = format!("{INCOMPLETE_HISTORY_NOTICE}{content}");
    }

    if request.publish {
        // Publishing is advisory; a failure must not block the changelog.
        if let Err(err) = ctx
            .publisher
            .publish(&repo.url(), &content, Utc::now(), &request.period)
            .await
        {
            tracing::warn!(error = %err, "publish failed, returning changelog anyway");
        }
    }

    Ok(content)
}

fn build_instruction(summary: &DiffSummary, diff_text: &str) -> String {
    format!(
        "Write a changelog for the changes below, covering {since} to {until} \
         ({commits} commits, +{additions}/-{deletions} lines).\n\
         Group entries under these categories, in this order, skipping empty ones: \
         Breaking Changes, Features, Improvements, Bug Fixes, Security, Performance, \
         Documentation, Dependencies, Refactor, Tests, Other.\n\
         Use bulleted lists, never numbered lists. Reference pull request numbers \
         and contributors when the commit messages make them inferable. \
         Keep each entry to one line of plain language.\n\n\
         Changes:\n\n{diff_text}",
        since = summary.period.since.format("%Y-%m-%d"),
        until = summary.period.until.format("%Y-%m-%d"),
        commits = summary.total_commits,
        additions = summary.additions,
        deletions = summary.deletions,
    )
}

/// Rendered when no provider is enabled: a templated changelog built from
/// the raw statistics, with no network call.
fn preview_changelog(repo: &RepoRef, summary: &DiffSummary, diff_text: &str) -> String {
    format!(
        "# Changelog preview for {repo}\n\n\
         Period: {since} to {until}\n\
         Commits analyzed: {commits}\n\
         Additions: {additions}\n\
         Deletions: {deletions}\n\
         Net difference: {net}\n\n\
         No generation provider is enabled; showing collected changes instead.\n\n\
         {diff_text}",
        repo = repo.full_name(),
        since = summary.period.since.format("%Y-%m-%d"),
        until = summary.period.until.format("%Y-%m-%d"),
        commits = summary.total_commits,
        additions = summary.additions,
        deletions = summary.deletions,
        net = summary.net_diff,
    )
}

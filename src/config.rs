use std::env;

use crate::workflow::truncate::TruncationBudget;

/// Repositories the repository-aware provider has already indexed.
/// Requests for any other repository fall back to the general provider.
const DEFAULT_INDEXED_REPOS: &[&str] = &["facebook/react", "vercel/next.js"];

const DEFAULT_MAX_PROMPT_TOKENS: usize = 6000;
const DEFAULT_CHARS_PER_TOKEN: usize = 4;
const DEFAULT_DETAIL_CONCURRENCY: usize = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_enabled: bool,
    pub greptile_api_key: Option<String>,
    pub greptile_enabled: bool,
    pub greptile_genius: bool,
    pub indexed_repos: Vec<String>,
    pub publish_base_url: Option<String>,
    pub attribution: bool,
    pub max_prompt_tokens: usize,
    pub chars_per_token: usize,
    pub detail_concurrency: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let indexed_repos = env::var("CHLOG_INDEXED_REPOS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|repo| repo.trim().to_string())
                    .filter(|repo| !repo.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|| {
                DEFAULT_INDEXED_REPOS
                    .iter()
                    .map(|repo| repo.to_string())
                    .collect()
            });

        Self {
            github_token: non_empty_var("GITHUB_TOKEN"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_enabled: flag_var("CHLOG_OPENAI_ENABLED"),
            greptile_api_key: non_empty_var("GREPTILE_API_KEY"),
            greptile_enabled: flag_var("CHLOG_GREPTILE_ENABLED"),
            greptile_genius: flag_var("CHLOG_GREPTILE_GENIUS"),
            indexed_repos,
            publish_base_url: non_empty_var("CHLOG_PUBLISH_BASE_URL"),
            attribution: flag_var("CHLOG_ATTRIBUTION"),
            max_prompt_tokens: numeric_var("CHLOG_MAX_PROMPT_TOKENS", DEFAULT_MAX_PROMPT_TOKENS),
            chars_per_token: numeric_var("CHLOG_CHARS_PER_TOKEN", DEFAULT_CHARS_PER_TOKEN),
            detail_concurrency: numeric_var(
                "CHLOG_DETAIL_CONCURRENCY",
                DEFAULT_DETAIL_CONCURRENCY,
            ),
        }
    }

    pub fn truncation_budget(&self) -> TruncationBudget {
        TruncationBudget::new(self.max_prompt_tokens, self.chars_per_token)
    }

    pub fn repo_is_indexed(&self, full_name: &str) -> bool {
        self.indexed_repos.iter().any(|repo| repo == full_name)
    }
}

#[cfg(test)]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            openai_api_key: None,
            openai_model: "gpt-4o".to_string(),
            openai_enabled: false,
            greptile_api_key: None,
            greptile_enabled: false,
            greptile_genius: false,
            indexed_repos: DEFAULT_INDEXED_REPOS
                .iter()
                .map(|repo| repo.to_string())
                .collect(),
            publish_base_url: None,
            attribution: false,
            max_prompt_tokens: DEFAULT_MAX_PROMPT_TOKENS,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn flag_var(name: &str) -> bool {
    env::var(name)
        .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn numeric_var(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the resolved environment configuration (secrets masked).
    Show,
}

pub fn run(config: &AppConfig, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(config),
    }
}

fn run_show(cfg: &AppConfig) -> AppResult<()> {
    println!("GitHub token: {}", mask_secret(&cfg.github_token));
    println!("OpenAI API key: {}", mask_secret(&cfg.openai_api_key));
    println!("OpenAI model: {}", cfg.openai_model);
    println!("OpenAI enabled: {}", cfg.openai_enabled);
    println!("Greptile API key: {}", mask_secret(&cfg.greptile_api_key));
    println!("Greptile enabled: {}", cfg.greptile_enabled);
    println!("Greptile genius mode: {}", cfg.greptile_genius);
    println!("Indexed repositories: {}", cfg.indexed_repos.join(", "));
    println!("Publish base URL: {}", display_value(&cfg.publish_base_url));
    println!("Attribution footer: {}", cfg.attribution);
    println!("Max prompt tokens: {}", cfg.max_prompt_tokens);
    println!("Chars per token: {}", cfg.chars_per_token);
    println!("Detail concurrency: {}", cfg.detail_concurrency);

    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 6 => {
            let prefix = &token[..3];
            let suffix = &token[token.len() - 3..];
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

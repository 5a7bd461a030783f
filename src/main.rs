mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod markdown;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::generate::{self, GenerateArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::greptile::GreptileClient;
use crate::infra::openai::OpenAiClient;
use crate::infra::publish::PublishClient;

#[derive(Parser)]
#[command(
    name = "chlog",
    author,
    version,
    about = "Generate changelogs from hosted commit history"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a changelog for a repository over a date window.
    Generate(GenerateArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Config(args) => config_cmd::run(&config, args.command),
        Commands::Generate(args) => run_generate(config, args).await,
    }
}

async fn run_generate(config: AppConfig, args: GenerateArgs) -> AppResult<()> {
    if config.github_token.is_none() {
        eprintln!("Warning: GITHUB_TOKEN not configured; commit fetching will fail.");
    }
    if config.openai_enabled && config.openai_api_key.is_none() {
        eprintln!("Warning: OpenAI is enabled but OPENAI_API_KEY is not set.");
    }
    if config.greptile_enabled && config.greptile_api_key.is_none() {
        eprintln!("Warning: Greptile is enabled but GREPTILE_API_KEY is not set.");
    }

    let commit_host = Arc::new(GitHubClient::new(
        config.github_token.clone(),
        config.detail_concurrency,
    ));
    let general_provider = Arc::new(OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));
    let repo_aware_provider = Arc::new(GreptileClient::new(
        config.greptile_api_key.clone(),
        config.github_token.clone(),
        config.greptile_genius,
    ));
    let publisher = Arc::new(PublishClient::new(config.publish_base_url.clone()));

    let context = AppContext::new(
        config,
        commit_host,
        general_provider,
        repo_aware_provider,
        publisher,
    );

    let changelog = generate::run(&context, args).await?;
    println!("{changelog}");
    Ok(())
}

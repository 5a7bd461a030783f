use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;

use crate::context::AppContext;
use crate::domain::repo::Period;
use crate::error::{AppError, AppResult};
use crate::markdown;
use crate::workflow::changelog::{self, ChangelogRequest};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Repository URL, e.g. https://github.com/facebook/react
    pub repo: String,
    /// Start of the date window (RFC-3339 or YYYY-MM-DD).
    #[arg(short, long)]
    pub since: String,
    /// End of the date window (RFC-3339 or YYYY-MM-DD). Defaults to now.
    #[arg(short, long)]
    pub until: Option<String>,
    /// Branch handed to the repository-aware provider for context.
    #[arg(long, default_value = "main")]
    pub branch: String,
    /// Reformat the generated text into markdown sections.
    #[arg(long)]
    pub markdown: bool,
    /// Send the finished changelog to the configured publish target.
    #[arg(long)]
    pub publish: bool,
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> AppResult<String> {
    let since = parse_instant(&args.since, false)?;
    let until = match &args.until {
        Some(raw) => parse_instant(raw, true)?,
        None => Utc::now(),
    };

    let request = ChangelogRequest {
        repo_url: args.repo,
        period: Period { since, until },
        branch: args.branch,
        publish: args.publish,
    };

    let content = changelog::generate_changelog(ctx, &request).await?;
    Ok(if args.markdown {
        markdown::to_markdown(&content)
    } else {
        content
    })
}

/// Accepts RFC-3339 instants or bare dates; bare end dates extend to the
/// end of the day so the window stays inclusive.
fn parse_instant(raw: &str, end_of_day: bool) -> AppResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::Configuration(format!(
            "invalid date '{raw}': expected RFC-3339 or YYYY-MM-DD"
        ))
    })?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| AppError::Configuration(format!("invalid date '{raw}'")))?;

    Ok(time.and_utc())
}

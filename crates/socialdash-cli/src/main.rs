mod accounts;
mod collections;
mod dashboard;
mod discovery;
mod events;
mod videos;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::accounts::AccountsCommands;
use crate::collections::CollectionsCommands;
use crate::dashboard::DashboardArgs;
use crate::discovery::{SearchCommands, TrendingArgs};
use crate::events::EventsArgs;
use crate::videos::{VideoListArgs, VideosCommands};

#[derive(Debug, Parser)]
#[command(name = "socialdash-cli")]
#[command(about = "Social video analytics dashboard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every dashboard section once and print it
    Dashboard(DashboardArgs),
    /// List tracked videos, or mark one as a Spark Ad
    #[command(args_conflicts_with_subcommands = true)]
    Videos {
        #[command(subcommand)]
        command: Option<VideosCommands>,
        #[command(flatten)]
        list: VideoListArgs,
    },
    /// Manage tracked accounts
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Manage account collections
    Collections {
        #[command(subcommand)]
        command: CollectionsCommands,
    },
    /// Show third-party event counts
    Events(EventsArgs),
    /// Live hashtag or keyword search
    Search {
        #[command(subcommand)]
        command: SearchCommands,
    },
    /// Trending sounds for a country
    Trending(TrendingArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = socialdash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("socialdash-cli: run with --help to list commands");
        return Ok(());
    };

    let client = socialdash_client::DashboardClient::new(&config)?;
    tracing::debug!(api_url = %config.api_url, "dashboard client ready");

    match command {
        Commands::Dashboard(args) => dashboard::run_dashboard(&client, &args).await,
        Commands::Videos {
            command: Some(VideosCommands::SparkAd { video_id, flag }),
            ..
        } => videos::run_set_spark_ad(&client, &video_id, flag).await,
        Commands::Videos {
            command: Some(VideosCommands::Creators { platform }),
            ..
        } => videos::run_creators(&client, platform).await,
        Commands::Videos {
            command: None,
            list,
        } => videos::run_videos_list(&client, &list).await,
        Commands::Accounts { command } => accounts::run(&client, command).await,
        Commands::Collections { command } => collections::run(&client, command).await,
        Commands::Events(args) => events::run_events(&config, &args).await,
        Commands::Search { command } => discovery::run_search(&client, command).await,
        Commands::Trending(args) => discovery::run_trending(&client, &args).await,
    }
}

/// Formats an optional timestamp as a date, `"\u{2014}"` when absent.
fn fmt_date(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "\u{2014}".to_string(),
        |t| t.format("%Y-%m-%d").to_string(),
    )
}

/// Truncates `s` to `max` characters, appending `...` when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max).collect::<String>())
    } else {
        s.to_owned()
    }
}

#[cfg(test)]
mod tests;

//! `search` and `trending` commands.

use clap::{Args, Subcommand};
use socialdash_client::{DashboardClient, SearchKind};
use socialdash_core::Platform;
use socialdash_presenter::format_compact;

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub query: String,
    /// tiktok or instagram
    #[arg(long, default_value = "tiktok")]
    pub platform: Platform,
    #[arg(long, default_value = "20")]
    pub limit: u32,
}

#[derive(Debug, Subcommand)]
pub enum SearchCommands {
    /// Videos tagged with a hashtag (leading # optional)
    Hashtag(SearchArgs),
    /// Videos matching a keyword
    Term(SearchArgs),
}

#[derive(Debug, Args)]
pub struct TrendingArgs {
    /// Two-letter country code
    #[arg(long, default_value = "US")]
    pub country: String,
    #[arg(long, default_value = "20")]
    pub limit: u32,
}

/// # Errors
///
/// Returns an error for a blank query or a failed search request.
pub(crate) async fn run_search(
    client: &DashboardClient,
    command: SearchCommands,
) -> anyhow::Result<()> {
    let (kind, args) = match command {
        SearchCommands::Hashtag(args) => (SearchKind::Hashtag, args),
        SearchCommands::Term(args) => (SearchKind::Term, args),
    };
    let results = client
        .search(kind, &args.query, args.platform, args.limit)
        .await?;
    if results.is_empty() {
        println!("no results for '{}'", args.query);
        return Ok(());
    }

    println!("{:<20}{:>9}{:>8}  CAPTION", "AUTHOR", "VIEWS", "LIKES");
    for video in &results {
        let caption = video.caption.as_deref().unwrap_or_default().replace('\n', " ");
        println!(
            "{:<20}{:>9}{:>8}  {}",
            crate::truncate(video.author_username.as_deref().unwrap_or("\u{2014}"), 18),
            format_compact(video.views),
            format_compact(video.likes),
            crate::truncate(&caption, 60)
        );
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the request fails.
pub(crate) async fn run_trending(
    client: &DashboardClient,
    args: &TrendingArgs,
) -> anyhow::Result<()> {
    let sounds = client.trending_audio(&args.country, args.limit).await?;
    if sounds.is_empty() {
        println!("no trending sounds for {}", args.country.to_ascii_uppercase());
        return Ok(());
    }

    println!("{:<6}{:<40}{:<24}VIDEOS", "RANK", "TITLE", "AUTHOR");
    for (i, sound) in sounds.iter().enumerate() {
        let rank = sound.rank.map_or_else(|| (i + 1).to_string(), |r| r.to_string());
        println!(
            "{:<6}{:<40}{:<24}{}",
            rank,
            crate::truncate(&sound.title, 38),
            crate::truncate(sound.author.as_deref().unwrap_or("\u{2014}"), 22),
            format_compact(sound.total_videos)
        );
    }
    Ok(())
}

//! `videos` command: the all-videos listing and the Spark Ad toggle.

use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use socialdash_client::{DashboardClient, VideoFilter};
use socialdash_core::{DateRangeSelection, Platform};
use socialdash_presenter::{format_compact, VideoListing};

#[derive(Debug, Args)]
pub struct VideoListArgs {
    /// Only videos by this author username
    #[arg(long)]
    pub creator: Option<String>,
    /// Preset posting window (today, yesterday, last7days, ...); --from/--to win
    #[arg(long)]
    pub range: Option<DateRangeSelection>,
    /// Posted on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Posted on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// true for Spark Ads only, false for organic only
    #[arg(long)]
    pub spark_ad: Option<bool>,
    /// tiktok or instagram
    #[arg(long)]
    pub platform: Option<Platform>,
    /// Pages of 50 to load
    #[arg(long, default_value = "1")]
    pub pages: u32,
}

impl VideoListArgs {
    pub(crate) fn filter(&self, today: NaiveDate) -> VideoFilter {
        let (range_from, range_to) = self
            .range
            .and_then(|r| r.bounds(today))
            .map_or((None, None), |(from, to)| (Some(from), Some(to)));
        VideoFilter {
            platform: self.platform,
            creator: self.creator.clone(),
            date_from: self.from.or(range_from),
            date_to: self.to.or(range_to),
            is_spark_ad: self.spark_ad,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum VideosCommands {
    /// Mark a video as a Spark Ad (true) or organic (false)
    SparkAd {
        video_id: String,
        #[arg(action = clap::ArgAction::Set)]
        flag: bool,
    },
    /// List the authors known across tracked accounts, for use with --creator
    Creators {
        /// tiktok or instagram
        #[arg(long)]
        platform: Option<Platform>,
    },
}

/// Loads up to `pages` pages of the video listing and prints them.
///
/// # Errors
///
/// Returns an error if the first page cannot be fetched. A failure on a
/// later page is reported and the rows loaded so far are still printed.
pub(crate) async fn run_videos_list(
    client: &DashboardClient,
    args: &VideoListArgs,
) -> anyhow::Result<()> {
    let mut listing = VideoListing::new(client.clone(), args.filter(Utc::now().date_naive()));
    listing.reload().await?;

    for _ in 1..args.pages.max(1) {
        if !listing.has_more() {
            break;
        }
        if let Err(e) = listing.load_more().await {
            eprintln!("error: failed to load more videos: {e}");
            break;
        }
    }

    if listing.videos().is_empty() {
        println!("no videos found");
        return Ok(());
    }

    println!(
        "{:<22}{:<11}{:<20}{:>9}{:>8}{:>7}  {:<12}SPARK",
        "ID", "PLATFORM", "AUTHOR", "VIEWS", "LIKES", "SAVES", "POSTED"
    );
    for video in listing.videos() {
        println!(
            "{:<22}{:<11}{:<20}{:>9}{:>8}{:>7}  {:<12}{}",
            crate::truncate(&video.id, 20),
            video.platform.as_str(),
            crate::truncate(video.author_username.as_deref().unwrap_or("\u{2014}"), 18),
            format_compact(video.views),
            format_compact(video.likes),
            format_compact(video.bookmarks),
            crate::fmt_date(video.posted_at),
            if video.is_spark_ad { "yes" } else { "" }
        );
    }

    let shown = listing.videos().len();
    match listing.total() {
        Some(total) => println!("showing {shown} of {total}"),
        None => println!("showing {shown}"),
    }
    if listing.has_more() {
        println!("(more available; rerun with --pages {})", args.pages.saturating_add(1));
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the request fails.
pub(crate) async fn run_creators(
    client: &DashboardClient,
    platform: Option<Platform>,
) -> anyhow::Result<()> {
    let creators = client.creators(platform).await?;
    if creators.is_empty() {
        println!("no creators found");
        return Ok(());
    }
    for creator in &creators {
        match creator.nickname.as_deref() {
            Some(nickname) if !nickname.is_empty() => {
                println!("{:<24}{nickname}", creator.username);
            }
            _ => println!("{}", creator.username),
        }
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the video does not exist or the request fails.
pub(crate) async fn run_set_spark_ad(
    client: &DashboardClient,
    video_id: &str,
    flag: bool,
) -> anyhow::Result<()> {
    let ack = client.set_spark_ad(video_id, flag).await?;
    let kind = if ack.is_spark_ad { "Spark Ad" } else { "organic" };
    println!("video {} marked as {kind}", ack.video_id);
    Ok(())
}

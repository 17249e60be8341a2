//! `dashboard` command: one refresh of every section, printed as text.

use chrono::NaiveDate;
use clap::Args;
use socialdash_client::{DashboardClient, Overview};
use socialdash_core::{CollectionId, DateRangeSelection, MetricType, PlatformFilter};
use socialdash_presenter::format::format_compact_signed;
use socialdash_presenter::pager::DISPLAY_STEP;
use socialdash_presenter::{
    daily_from_cumulative, format_compact, Dashboard, FilterState, Section, SeriesMode,
    SortDirection, SortField, SortSpec, SparkAdFilter, TableView,
};

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Preset range: today, yesterday, last7days, last30days, alltime
    #[arg(long, default_value = "last7days")]
    pub range: DateRangeSelection,
    /// Start of a custom range (YYYY-MM-DD); overrides --range
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    /// End of a custom range (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
    /// tiktok, instagram, or all
    #[arg(long, default_value = "all")]
    pub platform: PlatformFilter,
    /// total, organic, or ads
    #[arg(long = "metric", default_value = "total")]
    pub metric_type: MetricType,
    /// Restrict to one collection's accounts
    #[arg(long)]
    pub collection: Option<CollectionId>,
    /// Rows requested for the video table
    #[arg(long, default_value = "20")]
    pub count: u32,
    /// Table sort column
    #[arg(long, default_value = "views")]
    pub sort: SortField,
    /// Sort ascending instead of descending
    #[arg(long)]
    pub ascending: bool,
    /// all, spark-ads, or organic
    #[arg(long, default_value = "all")]
    pub filter: SparkAdFilter,
    /// daily or cumulative growth series
    #[arg(long, default_value = "daily")]
    pub series: SeriesMode,
}

impl DashboardArgs {
    pub(crate) fn filters(&self) -> FilterState {
        let range = match (self.from, self.to) {
            (Some(from), Some(to)) => DateRangeSelection::Custom { from, to },
            _ => self.range,
        };
        FilterState {
            range,
            platform: self.platform,
            metric_type: self.metric_type,
            collection_id: self.collection,
            display_count: self.count.max(1),
        }
    }

    pub(crate) fn table_view(&self) -> TableView {
        TableView {
            filter: self.filter,
            sort: SortSpec {
                field: self.sort,
                direction: if self.ascending {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            },
        }
    }
}

/// Runs one dashboard refresh and prints every section.
///
/// A failed section prints its error and the rest still render; the command
/// itself only fails if every section failed.
///
/// # Errors
///
/// Returns an error when no section could be loaded.
pub(crate) async fn run_dashboard(
    client: &DashboardClient,
    args: &DashboardArgs,
) -> anyhow::Result<()> {
    let filters = args.filters();
    let dashboard = Dashboard::new(client.clone(), filters);
    dashboard.refresh().await;
    let snapshot = dashboard.snapshot();
    let data = &snapshot.data;

    println!(
        "Dashboard: {} days, platform {}, metric {}",
        filters.range.days(),
        filters.platform.query_value(),
        filters.metric_type.as_str()
    );
    println!();

    print_section("Overview", &data.overview, print_overview);

    print_section("Views over time", &data.views_over_time, |points| {
        println!("{:<12}{:>10}", "DATE", "NEW VIEWS");
        for (date, views) in daily_from_cumulative(points) {
            println!("{:<12}{:>10}", date.to_string(), format_compact_signed(views));
        }
    });

    let growth = data.growth_series(args.series);
    println!("== Organic vs Spark Ads ==");
    if growth.is_empty() {
        println!("no data");
    } else {
        println!("{:<12}{:>10}{:>10}", "DATE", "ORGANIC", "SPARK");
        for point in &growth {
            println!(
                "{:<12}{:>10}{:>10}",
                point.date.to_string(),
                format_compact_signed(point.organic_value),
                format_compact_signed(point.spark_value)
            );
        }
    }
    println!();

    print_section("Most viral", &data.most_viral, |videos| {
        for (rank, video) in videos.iter().enumerate() {
            println!(
                "{}. @{} {} views, {}% engagement",
                rank + 1,
                video.author_username.as_deref().unwrap_or("unknown"),
                format_compact(video.views),
                video.engagement_rate
            );
        }
    });

    print_section("Virality", &data.virality, |buckets| {
        for (label, count) in buckets.labelled() {
            println!("{label:<9}{count}");
        }
    });

    print_section("Duration", &data.durations, |buckets| {
        println!("{:<10}{:>12}{:>8}", "SECONDS", "AVG VIEWS", "VIDEOS");
        for bucket in buckets {
            println!(
                "{:<10}{:>12}{:>8}",
                bucket.range,
                format_compact(bucket.average_views),
                bucket.video_count
            );
        }
    });

    print_section("Averages", &data.breakdown, |breakdown| {
        for (label, avg) in [("daily", breakdown.daily), ("weekly", breakdown.weekly)] {
            println!(
                "{label:<8}views {} (+{}), likes +{}, comments +{}",
                format_compact(avg.avg_views),
                format_compact(avg.avg_views_gain),
                format_compact(avg.avg_likes_gain),
                format_compact(avg.avg_comments_gain)
            );
        }
    });

    let view = args.table_view();
    print_section("Videos", &data.video_stats, |page| {
        println!(
            "{:<20}{:<11}{:>9}{:>8}{:>8}{:>8}  SPARK",
            "AUTHOR", "PLATFORM", "VIEWS", "LIKES", "ENG%", "PERF"
        );
        for row in view.rows(&page.items) {
            println!(
                "{:<20}{:<11}{:>9}{:>8}{:>8.2}{:>7.1}x  {}",
                crate::truncate(row.author_username.as_deref().unwrap_or("\u{2014}"), 18),
                row.platform.as_str(),
                format_compact(row.views),
                format_compact(row.likes),
                row.engagement_rate.as_f64(),
                row.performance_multiplier,
                if row.is_spark_ad { "yes" } else { "" }
            );
        }
        if page.has_more {
            println!(
                "(more rows available; rerun with --count {})",
                args.count.saturating_add(DISPLAY_STEP)
            );
        }
    });

    if data.all_failed() {
        anyhow::bail!("every dashboard section failed; is the backend at the configured URL?");
    }
    Ok(())
}

fn print_section<T>(title: &str, section: &Section<T>, render: impl FnOnce(&T)) {
    println!("== {title} ==");
    match section {
        Section::Ready(value) => render(value),
        Section::Empty => println!("no data"),
        Section::Failed(message) => println!("error: {message}"),
    }
    println!();
}

fn print_overview(overview: &Overview) {
    for (label, card) in [
        ("Views", overview.views),
        ("Engagement", overview.engagement),
        ("Likes", overview.likes),
        ("Comments", overview.comments),
        ("Shares", overview.shares),
        ("Saves", overview.saves),
    ] {
        println!(
            "{label:<12}{:>8}  {:+.1}%",
            format_compact(card.total),
            card.change
        );
    }
}

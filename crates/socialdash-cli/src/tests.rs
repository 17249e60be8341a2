use chrono::NaiveDate;
use clap::Parser;
use socialdash_core::{DateRangeSelection, MetricType, Platform, PlatformFilter};
use socialdash_presenter::{SeriesMode, SortDirection, SortField, SparkAdFilter};

use super::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["socialdash-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn dashboard_defaults_to_last_seven_days() {
    let cli =
        Cli::try_parse_from(["socialdash-cli", "dashboard"]).expect("expected valid cli args");
    let Some(Commands::Dashboard(args)) = cli.command else {
        panic!("expected dashboard command");
    };
    let filters = args.filters();
    assert_eq!(filters.range, DateRangeSelection::Last7Days);
    assert_eq!(filters.platform, PlatformFilter::All);
    assert_eq!(filters.metric_type, MetricType::Total);
    assert_eq!(filters.display_count, 20);
    assert_eq!(args.series, SeriesMode::Daily);

    let view = args.table_view();
    assert_eq!(view.filter, SparkAdFilter::All);
    assert_eq!(view.sort.field, SortField::Views);
    assert_eq!(view.sort.direction, SortDirection::Descending);
}

#[test]
fn dashboard_custom_range_overrides_preset() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "dashboard",
        "--range",
        "today",
        "--from",
        "2025-03-01",
        "--to",
        "2025-03-10",
        "--platform",
        "instagram",
        "--metric",
        "ads",
        "--collection",
        "3",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Dashboard(args)) = cli.command else {
        panic!("expected dashboard command");
    };
    let filters = args.filters();
    assert_eq!(
        filters.range,
        DateRangeSelection::Custom {
            from: date("2025-03-01"),
            to: date("2025-03-10"),
        }
    );
    assert_eq!(filters.range.days(), 9);
    assert_eq!(filters.platform, PlatformFilter::Only(Platform::Instagram));
    assert_eq!(filters.metric_type, MetricType::Ads);
    assert_eq!(filters.collection_id, Some(3));
}

#[test]
fn dashboard_from_without_to_is_rejected() {
    let result = Cli::try_parse_from(["socialdash-cli", "dashboard", "--from", "2025-03-01"]);
    assert!(result.is_err());
}

#[test]
fn dashboard_rejects_unknown_range() {
    let result = Cli::try_parse_from(["socialdash-cli", "dashboard", "--range", "fortnight"]);
    assert!(result.is_err());
}

#[test]
fn dashboard_table_options() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "dashboard",
        "--sort",
        "engagement-rate",
        "--ascending",
        "--filter",
        "spark-ads",
        "--series",
        "cumulative",
        "--count",
        "40",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Dashboard(args)) = cli.command else {
        panic!("expected dashboard command");
    };
    let view = args.table_view();
    assert_eq!(view.sort.field, SortField::EngagementRate);
    assert_eq!(view.sort.direction, SortDirection::Ascending);
    assert_eq!(view.filter, SparkAdFilter::SparkAds);
    assert_eq!(args.series, SeriesMode::Cumulative);
    assert_eq!(args.filters().display_count, 40);
}

#[test]
fn videos_without_subcommand_lists() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "videos",
        "--creator",
        "maxmari",
        "--spark-ad",
        "false",
        "--to",
        "2025-04-30",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Videos {
        command: None,
        list,
    }) = cli.command
    else {
        panic!("expected videos listing");
    };
    let filter = list.filter(date("2025-05-15"));
    assert_eq!(filter.creator.as_deref(), Some("maxmari"));
    assert_eq!(filter.is_spark_ad, Some(false));
    assert_eq!(filter.date_to, Some(date("2025-04-30")));
    assert_eq!(filter.date_from, None);
    assert_eq!(list.pages, 1);
}

#[test]
fn videos_range_fills_missing_bounds() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "videos",
        "--range",
        "last7days",
        "--to",
        "2025-05-12",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Videos { list, .. }) = cli.command else {
        panic!("expected videos listing");
    };
    let filter = list.filter(date("2025-05-15"));
    assert_eq!(filter.date_from, Some(date("2025-05-09")));
    assert_eq!(filter.date_to, Some(date("2025-05-12")));
}

#[test]
fn videos_spark_ad_subcommand() {
    let cli = Cli::try_parse_from(["socialdash-cli", "videos", "spark-ad", "7234", "true"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Videos {
            command: Some(VideosCommands::SparkAd { ref video_id, flag: true }),
            ..
        }) if video_id == "7234"
    ));
}

#[test]
fn videos_creators_subcommand() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "videos",
        "creators",
        "--platform",
        "tiktok",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Videos {
            command: Some(VideosCommands::Creators {
                platform: Some(Platform::TikTok)
            }),
            ..
        })
    ));
}

#[test]
fn accounts_add_collects_inputs() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "accounts",
        "add",
        "https://www.tiktok.com/@maxmari",
        "ig:studio.daily",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Accounts {
            command: AccountsCommands::Add { ref inputs }
        }) if inputs.len() == 2
    ));
}

#[test]
fn accounts_add_requires_input() {
    assert!(Cli::try_parse_from(["socialdash-cli", "accounts", "add"]).is_err());
}

#[test]
fn accounts_refresh_takes_many_ids() {
    let cli = Cli::try_parse_from(["socialdash-cli", "accounts", "refresh", "1", "2", "5"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Accounts {
            command: AccountsCommands::Refresh { ref ids }
        }) if ids == &[1, 2, 5]
    ));
}

#[test]
fn collections_create_with_members() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "collections",
        "create",
        "Launch",
        "--color",
        "#ff0050",
        "--member",
        "4",
        "--member",
        "9",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Collections {
            command: CollectionsCommands::Create {
                ref name,
                ref members,
                description: None,
                ..
            }
        }) if name == "Launch" && members == &[4, 9]
    ));
}

#[test]
fn collections_update_takes_id_and_name() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "collections",
        "update",
        "9",
        "Skincare",
        "--icon",
        "star",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Collections {
            command: CollectionsCommands::Update {
                id: 9,
                ref name,
                ref icon,
                color: None,
                ..
            }
        }) if name == "Skincare" && icon.as_deref() == Some("star")
    ));
}

#[test]
fn validated_name_trims_and_rejects_blank() {
    let name = collections::validated_name("  Launch ").expect("name is valid");
    assert_eq!(name, "Launch");
    assert!(collections::validated_name("   ").is_err());
}

#[test]
fn collections_members_allows_empty_selection() {
    let cli = Cli::try_parse_from(["socialdash-cli", "collections", "members", "2"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Collections {
            command: CollectionsCommands::Members { id: 2, ref account_ids }
        }) if account_ids.is_empty()
    ));
}

#[test]
fn events_defaults_to_standard_funnel() {
    let cli = Cli::try_parse_from(["socialdash-cli", "events"]).expect("expected valid cli args");
    let Some(Commands::Events(args)) = cli.command else {
        panic!("expected events command");
    };
    let request = args.request(date("2025-06-15"));
    assert_eq!(request.to_date, date("2025-06-15"));
    assert_eq!(request.from_date, date("2025-06-01"));
    assert_eq!(request.events.len(), 3);
}

#[test]
fn events_explicit_names_replace_defaults() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "events",
        "--from",
        "2025-05-01",
        "Trial Started",
        "Trial Started",
        "Subscription Purchased",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Events(args)) = cli.command else {
        panic!("expected events command");
    };
    let request = args.request(date("2025-06-15"));
    assert_eq!(request.from_date, date("2025-05-01"));
    assert_eq!(
        request.events,
        vec!["Trial Started".to_owned(), "Subscription Purchased".to_owned()]
    );
}

#[test]
fn search_hashtag_parses_platform() {
    let cli = Cli::try_parse_from([
        "socialdash-cli",
        "search",
        "hashtag",
        "#skincare",
        "--platform",
        "instagram",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            command: SearchCommands::Hashtag(ref args)
        }) if args.query == "#skincare" && args.platform == Platform::Instagram && args.limit == 20
    ));
}

#[test]
fn trending_defaults_to_us() {
    let cli = Cli::try_parse_from(["socialdash-cli", "trending"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Trending(ref args)) if args.country == "US" && args.limit == 20
    ));
}

#[test]
fn truncate_marks_cut_text() {
    assert_eq!(truncate("abcdef", 3), "abc...");
    assert_eq!(truncate("abc", 3), "abc");
}

#[test]
fn fmt_date_uses_dash_for_missing() {
    assert_eq!(fmt_date(None), "\u{2014}");
}

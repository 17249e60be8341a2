//! Closed filter vocabularies used to parameterise analytics queries.
//!
//! Every selector the dashboard exposes (platform, metric type, date range)
//! is an enum here, so a filter value outside the enumerated set cannot be
//! constructed once parsed.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Upper bound the backend accepts for the `days` query parameter.
pub const MAX_RANGE_DAYS: u32 = 365;

/// Day count used when a custom range collapses to zero days.
const FALLBACK_RANGE_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Instagram,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiktok" => Ok(Platform::TikTok),
            "instagram" => Ok(Platform::Instagram),
            other => Err(CoreError::InvalidFilter {
                kind: "platform",
                value: other.to_owned(),
            }),
        }
    }
}

/// Platform selector: both platforms or a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    /// Value for the analytics `platform` query parameter.
    ///
    /// `All` expands to the comma-joined list the backend splits on.
    #[must_use]
    pub fn query_value(self) -> &'static str {
        match self {
            PlatformFilter::All => "tiktok,instagram",
            PlatformFilter::Only(p) => p.as_str(),
        }
    }

    /// The single selected platform, if any. Listing endpoints take at most one.
    #[must_use]
    pub fn single(self) -> Option<Platform> {
        match self {
            PlatformFilter::All => None,
            PlatformFilter::Only(p) => Some(p),
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(PlatformFilter::All)
        } else {
            s.parse::<Platform>().map(PlatformFilter::Only)
        }
    }
}

/// Which records contribute to aggregate figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[default]
    Total,
    Organic,
    Ads,
}

impl MetricType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Total => "total",
            MetricType::Organic => "organic",
            MetricType::Ads => "ads",
        }
    }
}

impl FromStr for MetricType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(MetricType::Total),
            "organic" => Ok(MetricType::Organic),
            "ads" => Ok(MetricType::Ads),
            other => Err(CoreError::InvalidFilter {
                kind: "metric type",
                value: other.to_owned(),
            }),
        }
    }
}

/// Date range selector shown above the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRangeSelection {
    Today,
    Yesterday,
    #[default]
    Last7Days,
    Last30Days,
    AllTime,
    Custom { from: NaiveDate, to: NaiveDate },
}

impl DateRangeSelection {
    /// Day count sent as the `days` query parameter.
    ///
    /// `Yesterday` spans two days so that yesterday's posts are still inside
    /// the window measured back from now. A custom range that collapses to
    /// zero days falls back to a week. The result is clamped to
    /// `1..=MAX_RANGE_DAYS`.
    #[must_use]
    pub fn days(self) -> u32 {
        let raw = match self {
            DateRangeSelection::Today => 1,
            DateRangeSelection::Yesterday => 2,
            DateRangeSelection::Last7Days => 7,
            DateRangeSelection::Last30Days => 30,
            DateRangeSelection::AllTime => MAX_RANGE_DAYS,
            DateRangeSelection::Custom { from, to } => {
                let diff = (to - from).num_days().unsigned_abs();
                match u32::try_from(diff) {
                    Ok(0) => FALLBACK_RANGE_DAYS,
                    Ok(d) => d,
                    Err(_) => MAX_RANGE_DAYS,
                }
            }
        };
        raw.clamp(1, MAX_RANGE_DAYS)
    }

    /// Inclusive calendar bounds of the range relative to `today`.
    ///
    /// Returns `None` for `AllTime`, which has no lower bound.
    #[must_use]
    pub fn bounds(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let back = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN);
        match self {
            DateRangeSelection::Today => Some((today, today)),
            DateRangeSelection::Yesterday => Some((back(1), back(1))),
            DateRangeSelection::Last7Days => Some((back(6), today)),
            DateRangeSelection::Last30Days => Some((back(29), today)),
            DateRangeSelection::AllTime => None,
            DateRangeSelection::Custom { from, to } => Some((from.min(to), from.max(to))),
        }
    }
}

impl FromStr for DateRangeSelection {
    type Err = CoreError;

    /// Parses a preset tag (`today`, `last7days`, ...) or a custom
    /// `YYYY-MM-DD..YYYY-MM-DD` range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((from, to)) = s.split_once("..") {
            let parse = |d: &str| {
                NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
                    .map_err(|e| CoreError::InvalidDateRange(format!("'{d}': {e}")))
            };
            return Ok(DateRangeSelection::Custom {
                from: parse(from)?,
                to: parse(to)?,
            });
        }
        match s.to_ascii_lowercase().as_str() {
            "today" => Ok(DateRangeSelection::Today),
            "yesterday" => Ok(DateRangeSelection::Yesterday),
            "last7days" => Ok(DateRangeSelection::Last7Days),
            "last30days" => Ok(DateRangeSelection::Last30Days),
            "alltime" => Ok(DateRangeSelection::AllTime),
            other => Err(CoreError::InvalidFilter {
                kind: "date range",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn preset_day_counts() {
        assert_eq!(DateRangeSelection::Today.days(), 1);
        assert_eq!(DateRangeSelection::Yesterday.days(), 2);
        assert_eq!(DateRangeSelection::Last7Days.days(), 7);
        assert_eq!(DateRangeSelection::Last30Days.days(), 30);
        assert_eq!(DateRangeSelection::AllTime.days(), 365);
    }

    #[test]
    fn custom_range_counts_absolute_difference() {
        let forward = DateRangeSelection::Custom {
            from: date("2025-03-01"),
            to: date("2025-03-11"),
        };
        let backward = DateRangeSelection::Custom {
            from: date("2025-03-11"),
            to: date("2025-03-01"),
        };
        assert_eq!(forward.days(), 10);
        assert_eq!(backward.days(), 10);
    }

    #[test]
    fn same_day_custom_range_falls_back_to_a_week() {
        let range = DateRangeSelection::Custom {
            from: date("2025-03-01"),
            to: date("2025-03-01"),
        };
        assert_eq!(range.days(), 7);
    }

    #[test]
    fn long_custom_range_is_clamped() {
        let range = DateRangeSelection::Custom {
            from: date("2020-01-01"),
            to: date("2025-01-01"),
        };
        assert_eq!(range.days(), 365);
    }

    #[test]
    fn bounds_for_presets() {
        let today = date("2025-06-15");
        assert_eq!(
            DateRangeSelection::Yesterday.bounds(today),
            Some((date("2025-06-14"), date("2025-06-14")))
        );
        assert_eq!(
            DateRangeSelection::Last7Days.bounds(today),
            Some((date("2025-06-09"), today))
        );
        assert_eq!(DateRangeSelection::AllTime.bounds(today), None);
    }

    #[test]
    fn parses_preset_and_custom_ranges() {
        assert_eq!(
            "Last30Days".parse::<DateRangeSelection>().unwrap(),
            DateRangeSelection::Last30Days
        );
        assert_eq!(
            "2025-01-01..2025-01-31".parse::<DateRangeSelection>().unwrap(),
            DateRangeSelection::Custom {
                from: date("2025-01-01"),
                to: date("2025-01-31"),
            }
        );
        assert!("fortnight".parse::<DateRangeSelection>().is_err());
        assert!("2025-01-01..soon".parse::<DateRangeSelection>().is_err());
    }

    #[test]
    fn platform_filter_query_values() {
        assert_eq!(PlatformFilter::All.query_value(), "tiktok,instagram");
        assert_eq!(
            PlatformFilter::Only(Platform::Instagram).query_value(),
            "instagram"
        );
        assert_eq!(PlatformFilter::All.single(), None);
    }

    #[test]
    fn parses_filters_case_insensitively() {
        assert_eq!(
            "TikTok".parse::<PlatformFilter>().unwrap(),
            PlatformFilter::Only(Platform::TikTok)
        );
        assert_eq!("ALL".parse::<PlatformFilter>().unwrap(), PlatformFilter::All);
        assert_eq!("Ads".parse::<MetricType>().unwrap(), MetricType::Ads);
    }

    #[test]
    fn rejects_values_outside_the_enumerated_set() {
        let err = "youtube".parse::<Platform>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidFilter { kind: "platform", .. }));
        assert!("paid".parse::<MetricType>().is_err());
    }

    #[test]
    fn platform_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Platform::TikTok).unwrap(),
            "\"tiktok\""
        );
        let parsed: Platform = serde_json::from_str("\"instagram\"").unwrap();
        assert_eq!(parsed, Platform::Instagram);
    }
}

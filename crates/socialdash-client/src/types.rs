//! Response types for the analytics backend and the event-metrics service.
//!
//! Domain records (videos, accounts, collections) live in `socialdash-core`;
//! this module holds the endpoint-shaped payloads around them.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use socialdash_core::timestamp;
use socialdash_core::VideoRecord;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of a list endpoint.
///
/// Endpoints that return a bare array have no `total`; their `has_more` is
/// inferred from whether the page came back full.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Wraps a bare array returned for a request of `limit` rows.
    #[must_use]
    pub fn from_bare(items: Vec<T>, limit: u32) -> Self {
        let has_more = items.len() >= limit as usize;
        Self {
            items,
            total: None,
            has_more,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: None,
            has_more: false,
        }
    }
}

/// `GET /api/videos` envelope. Older deployments name the list `items`.
#[derive(Debug, Deserialize)]
pub(crate) struct VideosEnvelope {
    #[serde(alias = "items", default)]
    pub videos: Vec<VideoRecord>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub has_more: Option<bool>,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// A headline figure and its period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricCard {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub views: MetricCard,
    #[serde(default)]
    pub engagement: MetricCard,
    #[serde(default)]
    pub likes: MetricCard,
    #[serde(default)]
    pub comments: MetricCard,
    #[serde(default)]
    pub shares: MetricCard,
    #[serde(default)]
    pub saves: MetricCard,
}

impl Overview {
    /// True when the backend found no videos in the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.total == 0 && self.engagement.total == 0
    }
}

/// Cumulative views up to and including `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub views: u64,
}

/// One day of snapshot-derived growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub views_growth: i64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub likes_growth: i64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub comments_growth: i64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub engagement: u64,
}

/// Video counts by views relative to the median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViralityBuckets {
    #[serde(default)]
    pub below_1x: u64,
    #[serde(rename = "1x_to_5x", default)]
    pub x1_to_5: u64,
    #[serde(rename = "5x_to_10x", default)]
    pub x5_to_10: u64,
    #[serde(rename = "10x_to_25x", default)]
    pub x10_to_25: u64,
    #[serde(rename = "25x_to_50x", default)]
    pub x25_to_50: u64,
    #[serde(rename = "50x_to_100x", default)]
    pub x50_to_100: u64,
    #[serde(default)]
    pub above_100x: u64,
}

impl ViralityBuckets {
    /// Label and count per bucket, lowest multiplier first.
    #[must_use]
    pub fn labelled(&self) -> [(&'static str, u64); 7] {
        [
            ("<1x", self.below_1x),
            ("1-5x", self.x1_to_5),
            ("5-10x", self.x5_to_10),
            ("10-25x", self.x10_to_25),
            ("25-50x", self.x25_to_50),
            ("50-100x", self.x50_to_100),
            (">100x", self.above_100x),
        ]
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.labelled().iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBucket {
    /// Seconds, e.g. `"10-20"` or `"60+"`.
    pub range: String,
    #[serde(default)]
    pub average_views: u64,
    #[serde(default)]
    pub video_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodAverages {
    #[serde(default)]
    pub avg_views: u64,
    #[serde(default)]
    pub avg_views_gain: u64,
    #[serde(default)]
    pub avg_comments_gain: u64,
    #[serde(default)]
    pub avg_likes_gain: u64,
}

/// Averages over the last day and the last week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsBreakdown {
    #[serde(default)]
    pub daily: PeriodAverages,
    #[serde(default)]
    pub weekly: PeriodAverages,
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Acknowledgement of a scrape submission. Scraping continues in the
/// background after this returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeAck {
    #[serde(default)]
    pub message: String,
    /// Inputs as the backend normalised them into URLs.
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkAdAck {
    #[serde(default)]
    pub success: bool,
    pub video_id: String,
    pub is_spark_ad: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageAck {
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// A video returned by hashtag or keyword search.
///
/// `platform` stays a string because search covers platforms the dashboard
/// does not track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub platform: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub music_title: Option<String>,
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub posted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingAudio {
    pub id: i64,
    pub music_id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub play_url: Option<String>,
    #[serde(default)]
    pub total_videos: u64,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub trending_date: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Event metrics
// ---------------------------------------------------------------------------

/// Per-event daily counts from the event-metrics service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventSeries {
    /// Dates covered, as `YYYY-MM-DD`.
    #[serde(default)]
    pub series: Vec<String>,
    /// Event name to date to count. Dates with no events may be absent.
    #[serde(default)]
    pub values: BTreeMap<String, BTreeMap<String, u64>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: Option<EventSeries>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_page_has_more_when_full() {
        assert!(Page::from_bare(vec![1, 2, 3], 3).has_more);
        assert!(!Page::from_bare(vec![1, 2], 3).has_more);
        assert_eq!(Page::from_bare(vec![1], 3).total, None);
    }

    #[test]
    fn virality_buckets_use_backend_keys() {
        let buckets: ViralityBuckets = serde_json::from_value(serde_json::json!({
            "below_1x": 12,
            "1x_to_5x": 6,
            "5x_to_10x": 2,
            "10x_to_25x": 1,
            "25x_to_50x": 0,
            "50x_to_100x": 0,
            "above_100x": 1
        }))
        .unwrap();
        assert_eq!(buckets.x1_to_5, 6);
        assert_eq!(buckets.total(), 22);
        assert_eq!(buckets.labelled()[6], (">100x", 1));
    }

    #[test]
    fn videos_envelope_accepts_items_alias() {
        let env: VideosEnvelope = serde_json::from_value(serde_json::json!({
            "items": [{"id": "a", "platform": "tiktok", "views": 5}],
            "total": 1
        }))
        .unwrap();
        assert_eq!(env.videos.len(), 1);
        assert_eq!(env.total, Some(1));
        assert_eq!(env.has_more, None);
    }

    #[test]
    fn overview_defaults_missing_cards() {
        let overview: Overview =
            serde_json::from_value(serde_json::json!({"views": {"total": 10, "change": 2.5}}))
                .unwrap();
        assert_eq!(overview.views.total, 10);
        assert_eq!(overview.saves, MetricCard::default());
        assert!(!overview.is_empty());
    }
}

//! Records as the backend returns them.
//!
//! All of these are read-only snapshots of the backend's last scrape, except
//! for the paid-promotion flag on videos, which the user can toggle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::filters::Platform;
use crate::timestamp;

pub type AccountId = i64;
pub type CollectionId = i64;

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A numeric metric that may arrive either as a number or as formatted text
/// such as `"4.25"` or `"4.25%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    /// Numeric value used for ordering. Text that does not parse counts as `0.0`.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            RateValue::Number(n) => *n,
            RateValue::Text(s) => s
                .trim()
                .trim_end_matches('%')
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .unwrap_or(0.0),
        }
    }
}

impl Default for RateValue {
    fn default() -> Self {
        RateValue::Number(0.0)
    }
}

impl std::fmt::Display for RateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateValue::Number(n) => write!(f, "{n:.2}"),
            RateValue::Text(s) => f.write_str(s.trim_end_matches('%')),
        }
    }
}

/// A scraped video as listed by the all-videos view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub platform: Platform,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub author_nickname: Option<String>,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shares: u64,
    /// Saves. Older rows predate the column and carry `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookmarks: u64,
    /// Length in seconds, when the scraper captured it.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_spark_ad: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub scraped_at: Option<DateTime<Utc>>,
}

/// One row of the dashboard's video-stats table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStat {
    pub id: String,
    pub platform: Platform,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub author_nickname: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shares: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub saves: u64,
    /// Percentage; may be formatted text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub engagement_rate: RateValue,
    /// Views relative to the filtered corpus average, computed server-side.
    #[serde(default, deserialize_with = "null_as_default")]
    pub performance_multiplier: f64,
    #[serde(default)]
    pub performance_indicator: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_spark_ad: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub scraped_at: Option<DateTime<Utc>>,
}

/// A top-content card: the most engaging recent videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralVideo {
    pub id: String,
    pub platform: Platform,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shares: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookmarks: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub engagement: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub engagement_rate: RateValue,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub posted_at: Option<DateTime<Utc>>,
}

/// A tracked creator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub platform: Platform,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_videos: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_followers: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_verified: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub first_tracked: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub last_scraped: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl AccountRecord {
    /// Nickname when set, otherwise the handle.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// A user-defined grouping of accounts for scoped analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_default: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_count: u64,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for creating or updating a collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NewCollection {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A distinct author seen across active accounts' videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

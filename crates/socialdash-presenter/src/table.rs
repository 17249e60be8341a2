//! Client-side filtering and sorting of the video-stats table.
//!
//! Rows are re-derived in full on every call; the table holds at most a few
//! hundred rows.

use std::cmp::Ordering;
use std::str::FromStr;

use socialdash_core::VideoStat;

use crate::PresenterError;

/// Paid-promotion filter over the table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SparkAdFilter {
    #[default]
    All,
    SparkAds,
    Organic,
}

impl SparkAdFilter {
    #[must_use]
    pub fn matches(self, row: &VideoStat) -> bool {
        match self {
            SparkAdFilter::All => true,
            SparkAdFilter::SparkAds => row.is_spark_ad,
            SparkAdFilter::Organic => !row.is_spark_ad,
        }
    }
}

impl FromStr for SparkAdFilter {
    type Err = PresenterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all" => Ok(SparkAdFilter::All),
            "spark_ads" | "ads" | "paid" => Ok(SparkAdFilter::SparkAds),
            "organic" => Ok(SparkAdFilter::Organic),
            other => Err(PresenterError::UnknownOption {
                kind: "spark ad filter",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Views,
    Likes,
    Comments,
    Shares,
    Saves,
    EngagementRate,
    PerformanceMultiplier,
    PostedAt,
    Author,
}

impl SortField {
    fn compare(self, a: &VideoStat, b: &VideoStat) -> Ordering {
        match self {
            SortField::Views => a.views.cmp(&b.views),
            SortField::Likes => a.likes.cmp(&b.likes),
            SortField::Comments => a.comments.cmp(&b.comments),
            SortField::Shares => a.shares.cmp(&b.shares),
            SortField::Saves => a.saves.cmp(&b.saves),
            SortField::EngagementRate => a
                .engagement_rate
                .as_f64()
                .total_cmp(&b.engagement_rate.as_f64()),
            SortField::PerformanceMultiplier => {
                a.performance_multiplier.total_cmp(&b.performance_multiplier)
            }
            SortField::PostedAt => a.posted_at.cmp(&b.posted_at),
            SortField::Author => author_key(a).cmp(&author_key(b)),
        }
    }
}

fn author_key(row: &VideoStat) -> String {
    row.author_username
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
}

impl FromStr for SortField {
    type Err = PresenterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "views" => Ok(SortField::Views),
            "likes" => Ok(SortField::Likes),
            "comments" => Ok(SortField::Comments),
            "shares" => Ok(SortField::Shares),
            "saves" | "bookmarks" => Ok(SortField::Saves),
            "engagement_rate" | "engagement" => Ok(SortField::EngagementRate),
            "performance_multiplier" | "performance" => Ok(SortField::PerformanceMultiplier),
            "posted_at" | "posted" => Ok(SortField::PostedAt),
            "author" | "author_username" => Ok(SortField::Author),
            other => Err(PresenterError::UnknownOption {
                kind: "sort field",
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Header-click behaviour: the active field flips direction, any other
    /// field becomes active in descending order.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    fn compare(self, a: &VideoStat, b: &VideoStat) -> Ordering {
        let ord = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Filter and sort controls for the video-stats table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableView {
    pub filter: SparkAdFilter,
    pub sort: SortSpec,
}

impl TableView {
    /// Filters then stably sorts `records`. Rows that compare equal keep
    /// their fetched order.
    #[must_use]
    pub fn rows<'a>(&self, records: &'a [VideoStat]) -> Vec<&'a VideoStat> {
        let mut rows: Vec<&VideoStat> = records
            .iter()
            .filter(|r| self.filter.matches(r))
            .collect();
        rows.sort_by(|a, b| self.sort.compare(a, b));
        rows
    }
}

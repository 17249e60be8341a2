//! Query-string builders for the backend's list and analytics endpoints.

use chrono::NaiveDate;
use socialdash_core::{
    CollectionId, DateRangeSelection, MetricType, Platform, PlatformFilter,
};

/// Parameters shared by every `/api/analytics/*` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub days: u32,
    pub metric_type: MetricType,
    pub platform: PlatformFilter,
    pub collection_id: Option<CollectionId>,
}

impl Default for AnalyticsQuery {
    fn default() -> Self {
        Self::for_range(DateRangeSelection::default())
    }
}

impl AnalyticsQuery {
    #[must_use]
    pub fn for_range(range: DateRangeSelection) -> Self {
        Self {
            days: range.days(),
            metric_type: MetricType::default(),
            platform: PlatformFilter::default(),
            collection_id: None,
        }
    }

    #[must_use]
    pub fn with_metric_type(mut self, metric_type: MetricType) -> Self {
        self.metric_type = metric_type;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: PlatformFilter) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_collection(mut self, collection_id: Option<CollectionId>) -> Self {
        self.collection_id = collection_id;
        self
    }

    /// Full parameter set. `collection_id` is left out when unset.
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("days", self.days.to_string())];
        params.extend(self.unranged_params());
        if let Some(id) = self.collection_id {
            params.push(("collection_id", id.to_string()));
        }
        params
    }

    /// Parameters for endpoints with fixed day/week windows of their own.
    pub(crate) fn unranged_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("metric_type", self.metric_type.as_str().to_owned()),
            ("platform", self.platform.query_value().to_owned()),
        ]
    }
}

/// Filters for the all-videos listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub platform: Option<Platform>,
    pub creator: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub is_spark_ad: Option<bool>,
}

impl VideoFilter {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(p) = self.platform {
            params.push(("platform", p.as_str().to_owned()));
        }
        if let Some(creator) = self.creator.as_deref().filter(|c| !c.is_empty()) {
            params.push(("creator", creator.to_owned()));
        }
        if let Some(d) = self.date_from {
            params.push(("date_from", d.format("%Y-%m-%d").to_string()));
        }
        // The backend compares against a datetime, so the end date is taken
        // through its last second.
        if let Some(d) = self.date_to {
            params.push(("date_to", d.format("%Y-%m-%dT23:59:59").to_string()));
        }
        if let Some(flag) = self.is_spark_ad {
            params.push(("is_spark_ad", flag.to_string()));
        }
        params
    }
}

/// Filters for the tracked-accounts listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountFilter {
    pub platform: Option<Platform>,
    pub collection_id: Option<CollectionId>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for AccountFilter {
    fn default() -> Self {
        Self {
            platform: None,
            collection_id: None,
            limit: 100,
            offset: 0,
        }
    }
}

impl AccountFilter {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(p) = self.platform {
            params.push(("platform", p.as_str().to_owned()));
        }
        if let Some(id) = self.collection_id {
            params.push(("collection_id", id.to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

/// Which search endpoint a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Hashtag,
    Term,
}

impl SearchKind {
    pub(crate) fn path(self) -> &'static str {
        match self {
            SearchKind::Hashtag => "api/search/hashtag",
            SearchKind::Term => "api/search/term",
        }
    }
}

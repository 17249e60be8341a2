//! `/api/analytics/*` endpoints.

use socialdash_core::{MetricType, VideoStat, ViralVideo};

use crate::client::DashboardClient;
use crate::error::ClientError;
use crate::query::AnalyticsQuery;
use crate::types::{
    DurationBucket, GrowthPoint, MetricsBreakdown, Overview, Page, ViewsPoint, ViralityBuckets,
};

impl DashboardClient {
    /// Headline totals for the query window.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body does not match the expected shape.
    pub async fn overview(&self, query: &AnalyticsQuery) -> Result<Overview, ClientError> {
        self.get_json("api/analytics/overview", &query.params())
            .await
    }

    /// Cumulative views per day across the window.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::overview`].
    pub async fn views_over_time(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<ViewsPoint>, ClientError> {
        self.get_json("api/analytics/views-over-time", &query.params())
            .await
    }

    /// Daily growth from snapshot history, restricted by the query's metric type.
    ///
    /// The organic and paid growth series are two calls with
    /// [`MetricType::Organic`] and [`MetricType::Ads`]; see
    /// [`DashboardClient::growth_for`].
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::overview`].
    pub async fn historical_growth(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<GrowthPoint>, ClientError> {
        self.get_json("api/analytics/historical-growth", &query.params())
            .await
    }

    /// [`DashboardClient::historical_growth`] with the metric type overridden.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::overview`].
    pub async fn growth_for(
        &self,
        query: &AnalyticsQuery,
        metric_type: MetricType,
    ) -> Result<Vec<GrowthPoint>, ClientError> {
        self.historical_growth(&query.with_metric_type(metric_type))
            .await
    }

    /// Most engaging videos in the window, highest engagement rate first.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::overview`].
    pub async fn most_viral(
        &self,
        query: &AnalyticsQuery,
        limit: u32,
    ) -> Result<Vec<ViralVideo>, ClientError> {
        let mut params = query.params();
        params.push(("limit", limit.to_string()));
        self.get_json("api/analytics/most-viral", &params).await
    }

    /// # Errors
    ///
    /// See [`DashboardClient::overview`].
    pub async fn virality_analysis(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<ViralityBuckets, ClientError> {
        self.get_json("api/analytics/virality-analysis", &query.params())
            .await
    }

    /// Average views per video-length bucket. Empty buckets are omitted.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::overview`].
    pub async fn duration_analysis(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<Vec<DurationBucket>, ClientError> {
        self.get_json("api/analytics/duration-analysis", &query.params())
            .await
    }

    /// Daily and weekly averages. The backend uses fixed windows here, so
    /// the query's day count and collection are not sent.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::overview`].
    pub async fn metrics_breakdown(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<MetricsBreakdown, ClientError> {
        self.get_json("api/analytics/metrics-breakdown", &query.unranged_params())
            .await
    }

    /// The first `limit` rows of the video-stats table, newest first.
    ///
    /// The endpoint returns a bare array; `has_more` is inferred from a full page.
    ///
    /// # Errors
    ///
    /// See [`DashboardClient::overview`].
    pub async fn video_stats(
        &self,
        query: &AnalyticsQuery,
        limit: u32,
    ) -> Result<Page<VideoStat>, ClientError> {
        let mut params = query.params();
        params.push(("limit", limit.to_string()));
        params.push(("offset", "0".to_owned()));
        let rows: Vec<VideoStat> = self.get_json("api/analytics/video-stats", &params).await?;
        Ok(Page::from_bare(rows, limit))
    }
}

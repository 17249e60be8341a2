//! Fetch orchestration for the analytics dashboard.
//!
//! A refresh fires every dashboard request at once and captures each outcome
//! separately, so one failed slice leaves the others intact. Results land in
//! a single store that views subscribe to; the whole batch is applied in one
//! update, and only if no newer refresh has started since.

use socialdash_client::{
    AnalyticsQuery, ClientError, DashboardClient, DurationBucket, GrowthPoint, MetricsBreakdown,
    Overview, Page, ViewsPoint, ViralityBuckets,
};
use socialdash_core::{
    CollectionId, DateRangeSelection, MetricType, PlatformFilter, VideoStat, ViralVideo,
};
use tokio::sync::watch;

use crate::pager::{DISPLAY_STEP, INITIAL_DISPLAY_COUNT};
use crate::sequencer::RequestSequencer;
use crate::series::{merge_growth, SeriesMode, ViewsSeriesPoint};

/// Top-content cards shown above the table.
pub const MOST_VIRAL_LIMIT: u32 = 3;

/// Dashboard controls. Every query the dashboard sends is derived from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub range: DateRangeSelection,
    pub platform: PlatformFilter,
    pub metric_type: MetricType,
    pub collection_id: Option<CollectionId>,
    /// Rows requested from the video-stats endpoint.
    pub display_count: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            range: DateRangeSelection::default(),
            platform: PlatformFilter::default(),
            metric_type: MetricType::default(),
            collection_id: None,
            display_count: INITIAL_DISPLAY_COUNT,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn query(&self) -> AnalyticsQuery {
        AnalyticsQuery::for_range(self.range)
            .with_metric_type(self.metric_type)
            .with_platform(self.platform)
            .with_collection(self.collection_id)
    }
}

/// Outcome of one dashboard request.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    /// The request succeeded but returned nothing to show, or has not run yet.
    Empty,
    Failed(String),
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::Empty
    }
}

impl<T> Section<T> {
    /// Captures a request result, logging failures.
    #[must_use]
    pub fn capture(
        name: &str,
        result: Result<T, ClientError>,
        is_empty: impl Fn(&T) -> bool,
    ) -> Self {
        match result {
            Ok(value) if is_empty(&value) => Section::Empty,
            Ok(value) => Section::Ready(value),
            Err(e) => {
                tracing::warn!(section = name, error = %e, "dashboard section failed");
                Section::Failed(e.to_string())
            }
        }
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Section::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    InFlight,
    Settled,
}

/// Everything one refresh produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub overview: Section<Overview>,
    pub views_over_time: Section<Vec<ViewsPoint>>,
    pub organic_growth: Section<Vec<GrowthPoint>>,
    pub paid_growth: Section<Vec<GrowthPoint>>,
    pub most_viral: Section<Vec<ViralVideo>>,
    pub virality: Section<ViralityBuckets>,
    pub durations: Section<Vec<DurationBucket>>,
    pub breakdown: Section<MetricsBreakdown>,
    pub video_stats: Section<Page<VideoStat>>,
}

impl DashboardData {
    /// Organic and paid growth merged by date. A failed or empty side
    /// contributes zeros.
    #[must_use]
    pub fn growth_series(&self, mode: SeriesMode) -> Vec<ViewsSeriesPoint> {
        let organic = self.organic_growth.ready().map_or(&[][..], Vec::as_slice);
        let paid = self.paid_growth.ready().map_or(&[][..], Vec::as_slice);
        merge_growth(organic, paid, mode)
    }

    #[must_use]
    pub fn video_rows(&self) -> &[VideoStat] {
        self.video_stats
            .ready()
            .map_or(&[][..], |page| page.items.as_slice())
    }
}

/// The dashboard store's contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub filters: FilterState,
    pub load_state: LoadState,
    /// Token of the batch that produced `data`; `0` before the first.
    pub generation: u64,
    pub data: DashboardData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh started while this one was in flight; its results
    /// were discarded.
    Superseded,
}

/// The dashboard store and its fetch orchestrator.
#[derive(Debug)]
pub struct Dashboard {
    client: DashboardClient,
    sequencer: RequestSequencer,
    /// Advanced each time `load_more` applies rows.
    rows_sequencer: RequestSequencer,
    state: watch::Sender<DashboardSnapshot>,
}

impl Dashboard {
    #[must_use]
    pub fn new(client: DashboardClient, filters: FilterState) -> Self {
        let (state, _) = watch::channel(DashboardSnapshot {
            filters,
            ..DashboardSnapshot::default()
        });
        Self {
            client,
            sequencer: RequestSequencer::new(),
            rows_sequencer: RequestSequencer::new(),
            state,
        }
    }

    /// Read access for views. The receiver sees each applied batch as one
    /// change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.state.borrow().filters
    }

    pub fn set_range(&self, range: DateRangeSelection) {
        self.state.send_modify(|s| s.filters.range = range);
    }

    pub fn set_platform(&self, platform: PlatformFilter) {
        self.state.send_modify(|s| s.filters.platform = platform);
    }

    pub fn set_metric_type(&self, metric_type: MetricType) {
        self.state.send_modify(|s| s.filters.metric_type = metric_type);
    }

    pub fn set_collection(&self, collection_id: Option<CollectionId>) {
        self.state.send_modify(|s| s.filters.collection_id = collection_id);
    }

    /// Fetches every dashboard slice concurrently and applies the batch.
    ///
    /// Failures are captured per section and never returned. If another
    /// refresh starts before this one completes, this batch is discarded. If
    /// a `load_more` applies meanwhile, its rows are kept and this batch's
    /// video-stats slice is dropped.
    pub async fn refresh(&self) -> RefreshOutcome {
        let token = self.sequencer.next();
        let rows_seen = self.rows_sequencer.latest();
        let filters = self.filters();
        self.state.send_modify(|s| s.load_state = LoadState::InFlight);

        let query = filters.query();
        let client = &self.client;
        let (overview, views, organic, paid, viral, virality, durations, breakdown, stats) =
            tokio::join!(
                client.overview(&query),
                client.views_over_time(&query),
                client.growth_for(&query, MetricType::Organic),
                client.growth_for(&query, MetricType::Ads),
                client.most_viral(&query, MOST_VIRAL_LIMIT),
                client.virality_analysis(&query),
                client.duration_analysis(&query),
                client.metrics_breakdown(&query),
                client.video_stats(&query, filters.display_count),
            );

        if !self.sequencer.is_current(token) {
            tracing::debug!(
                token,
                latest = self.sequencer.latest(),
                "dropping stale dashboard batch"
            );
            return RefreshOutcome::Superseded;
        }
        let rows_current = self.rows_sequencer.is_current(rows_seen);
        if !rows_current {
            tracing::debug!(token, "keeping newer video stats rows");
        }

        let mut data = DashboardData {
            overview: Section::capture("overview", overview, Overview::is_empty),
            views_over_time: Section::capture("views_over_time", views, Vec::is_empty),
            organic_growth: Section::capture("organic_growth", organic, Vec::is_empty),
            paid_growth: Section::capture("paid_growth", paid, Vec::is_empty),
            most_viral: Section::capture("most_viral", viral, Vec::is_empty),
            virality: Section::capture("virality", virality, |b| b.total() == 0),
            durations: Section::capture("durations", durations, Vec::is_empty),
            breakdown: Section::capture("breakdown", breakdown, |_| false),
            video_stats: Section::capture("video_stats", stats, |p| p.items.is_empty()),
        };
        let mut failed = 0;
        self.state.send_modify(|s| {
            if rows_current {
                s.filters.display_count = filters.display_count;
            } else {
                data.video_stats = std::mem::take(&mut s.data.video_stats);
            }
            failed = data.failed_count();
            s.data = data;
            s.generation = token;
            s.load_state = LoadState::Settled;
        });
        tracing::info!(token, failed, "dashboard refreshed");
        RefreshOutcome::Applied
    }

    /// Widens the video-stats window by one step and re-fetches only that
    /// slice, replacing the table rows.
    ///
    /// The result is discarded if a full refresh starts or another
    /// `load_more` applies meanwhile. A refresh already in flight still lands
    /// its other slices but leaves these rows in place. On failure the window
    /// and rows are left as they were.
    ///
    /// # Errors
    ///
    /// Returns the client error from the video-stats request.
    pub async fn load_more(&self) -> Result<RefreshOutcome, ClientError> {
        let generation = self.sequencer.latest();
        let rows_seen = self.rows_sequencer.latest();
        let filters = self.filters();
        let next = filters.display_count.saturating_add(DISPLAY_STEP);
        let page = self.client.video_stats(&filters.query(), next).await?;

        if !self.sequencer.is_current(generation) || !self.rows_sequencer.is_current(rows_seen) {
            tracing::debug!(generation, rows_seen, "dropping stale load-more result");
            return Ok(RefreshOutcome::Superseded);
        }
        self.rows_sequencer.next();
        tracing::debug!(count = next, rows = page.items.len(), "widened video stats window");
        self.state.send_modify(|s| {
            s.filters.display_count = next;
            s.data.video_stats = if page.items.is_empty() {
                Section::Empty
            } else {
                Section::Ready(page)
            };
        });
        Ok(RefreshOutcome::Applied)
    }
}

impl DashboardData {
    /// Number of sections whose request failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures().into_iter().filter(|f| *f).count()
    }

    /// True when no section loaded, typically because the backend is down.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.failures().into_iter().all(|f| f)
    }

    fn failures(&self) -> [bool; 9] {
        [
            self.overview.is_failed(),
            self.views_over_time.is_failed(),
            self.organic_growth.is_failed(),
            self.paid_growth.is_failed(),
            self.most_viral.is_failed(),
            self.virality.is_failed(),
            self.durations.is_failed(),
            self.breakdown.is_failed(),
            self.video_stats.is_failed(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_request_twenty_rows_for_a_week() {
        let filters = FilterState::default();
        assert_eq!(filters.display_count, 20);
        let query = filters.query();
        assert_eq!(query.days, 7);
        assert_eq!(query.metric_type, MetricType::Total);
        assert_eq!(query.collection_id, None);
    }

    #[test]
    fn capture_distinguishes_ready_empty_and_failed() {
        let ready: Section<Vec<u8>> = Section::capture("x", Ok(vec![1]), Vec::is_empty);
        let empty: Section<Vec<u8>> = Section::capture("x", Ok(vec![]), Vec::is_empty);
        let failed: Section<Vec<u8>> = Section::capture(
            "x",
            Err(ClientError::Validation("boom".into())),
            Vec::is_empty,
        );
        assert_eq!(ready, Section::Ready(vec![1]));
        assert_eq!(empty, Section::Empty);
        assert_eq!(failed, Section::Failed("boom".into()));
    }

    #[test]
    fn growth_series_treats_missing_side_as_zero() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let point = GrowthPoint {
            date,
            views: 0,
            views_growth: 12,
            likes: 0,
            likes_growth: 0,
            comments: 0,
            comments_growth: 0,
            shares: 0,
            saves: 0,
            engagement: 0,
        };
        let data = DashboardData {
            organic_growth: Section::Ready(vec![point]),
            paid_growth: Section::Failed("down".into()),
            ..DashboardData::default()
        };
        let merged = data.growth_series(SeriesMode::Daily);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].organic_value, 12);
        assert_eq!(merged[0].spark_value, 0);
    }
}

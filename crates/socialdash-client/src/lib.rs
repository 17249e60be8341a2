//! HTTP clients for the analytics backend and the third-party event-metrics
//! service.

mod analytics;
pub mod client;
mod discovery;
pub mod error;
pub mod events;
mod library;
pub mod query;
pub mod types;

pub use client::DashboardClient;
pub use error::ClientError;
pub use events::{EventsClient, EventsRequest, DEFAULT_EVENTS};
pub use query::{AccountFilter, AnalyticsQuery, SearchKind, VideoFilter};
pub use types::{
    DurationBucket, EventSeries, GrowthPoint, MetricCard, MetricsBreakdown, Overview, Page,
    PeriodAverages, ScrapeAck, SearchResult, SparkAdAck, TrendingAudio, ViewsPoint,
    ViralityBuckets,
};

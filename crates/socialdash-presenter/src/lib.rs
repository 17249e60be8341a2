//! Dashboard data presenter: fetches analytics slices from the backend and
//! derives the series, tables, and pages the views render.

pub mod collections;
pub mod format;
pub mod orchestrator;
pub mod pager;
pub mod panel;
pub mod sequencer;
pub mod series;
pub mod table;

use socialdash_client::ClientError;
use thiserror::Error;

pub use collections::{create_with_members, save_membership};
pub use format::format_compact;
pub use orchestrator::{
    Dashboard, DashboardData, DashboardSnapshot, FilterState, LoadState, RefreshOutcome, Section,
};
pub use pager::{VideoListing, DISPLAY_STEP, INITIAL_DISPLAY_COUNT};
pub use panel::{pivot_events, EventChartRow, EventPanel};
pub use sequencer::RequestSequencer;
pub use series::{daily_from_cumulative, merge_growth, SeriesMode, ViewsSeriesPoint};
pub use table::{SortDirection, SortField, SortSpec, SparkAdFilter, TableView};

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{0}")]
    Validation(String),

    /// A cached failure from an earlier one-shot load.
    #[error("event metrics unavailable: {0}")]
    EventsUnavailable(String),

    #[error("unknown {kind}: {value}")]
    UnknownOption { kind: &'static str, value: String },
}

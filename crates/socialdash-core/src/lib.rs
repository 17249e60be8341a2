//! Domain types and configuration shared by the socialdash crates.

pub mod accounts;
pub mod app_config;
pub mod config;
pub mod filters;
pub mod models;
pub mod timestamp;

use thiserror::Error;

pub use accounts::{prepare_submission, AccountInput, MembershipDiff};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{DateRangeSelection, MetricType, Platform, PlatformFilter};
pub use models::{
    AccountId, AccountRecord, Collection, CollectionId, Creator, NewCollection, RateValue,
    VideoRecord, VideoStat, ViralVideo,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind} filter: {value}")]
    InvalidFilter { kind: &'static str, value: String },

    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("please enter at least one username or link")]
    EmptySubmission,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

//! Hashtag/keyword search and trending audio.

use reqwest::Method;
use serde::Serialize;
use socialdash_core::Platform;

use crate::client::DashboardClient;
use crate::error::ClientError;
use crate::query::SearchKind;
use crate::types::{SearchResult, TrendingAudio};

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    platform: &'a str,
    limit: u32,
}

impl DashboardClient {
    /// Runs a live search on the backend's scrapers.
    ///
    /// A leading `#` on hashtag queries is stripped.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] for a blank query; otherwise
    /// [`ClientError::Http`], [`ClientError::Status`], or
    /// [`ClientError::Deserialize`].
    pub async fn search(
        &self,
        kind: SearchKind,
        query: &str,
        platform: Platform,
        limit: u32,
    ) -> Result<Vec<SearchResult>, ClientError> {
        let query = match kind {
            SearchKind::Hashtag => query.trim().trim_start_matches('#'),
            SearchKind::Term => query.trim(),
        };
        if query.is_empty() {
            return Err(ClientError::Validation("search query is empty".to_owned()));
        }
        let url = self.build_url(kind.path(), &[]);
        let body = SearchRequest {
            query,
            platform: platform.as_str(),
            limit,
        };
        self.send(Method::POST, url, Some(&body)).await
    }

    /// Trending sounds for a country code such as `US`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`], [`ClientError::Status`], or
    /// [`ClientError::Deserialize`].
    pub async fn trending_audio(
        &self,
        country: &str,
        limit: u32,
    ) -> Result<Vec<TrendingAudio>, ClientError> {
        let params = [
            ("country", country.trim().to_ascii_uppercase()),
            ("limit", limit.to_string()),
        ];
        self.get_json("api/trending/audio", &params).await
    }
}

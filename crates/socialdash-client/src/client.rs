//! HTTP client for the analytics backend's REST API.
//!
//! Wraps `reqwest` with backend-specific error handling and typed response
//! deserialization. Non-2xx responses surface as [`ClientError::Status`]
//! carrying the backend's `detail` message when it sent one. Endpoint methods
//! are grouped by area in the `analytics`, `library`, and `discovery` modules.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use socialdash_core::AppConfig;

use crate::error::ClientError;

/// Client for the analytics backend.
///
/// Use [`DashboardClient::new`] with loaded configuration, or
/// [`DashboardClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: Url,
}

impl DashboardClient {
    /// Creates a client for the backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let client = build_http_client(&config.user_agent, config.request_timeout_secs)?;
        Self::from_parts(client, &config.api_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        let client = build_http_client(socialdash_core::config::DEFAULT_USER_AGENT, None)?;
        Self::from_parts(client, base_url)
    }

    fn from_parts(client: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            base_url: normalise_base_url(base_url)?,
        })
    }

    /// Builds a request URL from a path relative to the base and percent-encoded
    /// query parameters.
    pub(crate) fn build_url(&self, path: &str, params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", self.base_url.path(), path.trim_start_matches('/'));
        url.set_path(&joined);
        append_query(&mut url, params);
        url
    }

    /// Like [`DashboardClient::build_url`], but each segment is
    /// percent-encoded on its own, so ids containing `/` or `?` stay one
    /// segment.
    pub(crate) fn build_segment_url(&self, segments: &[&str], params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        // The base is checked in `normalise_base_url` to carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        append_query(&mut url, params);
        url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.build_url(path, params);
        self.send(Method::GET, url, None::<&()>).await
    }

    pub(crate) async fn send<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let context = format!("{method} {}", url.path());
        tracing::debug!(request = %context, url = %url, "sending backend request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        send_json(request, &context).await
    }
}

fn append_query(url: &mut Url, params: &[(&str, String)]) {
    if params.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for (k, v) in params {
        pairs.append_pair(k, v);
    }
}

/// Sends a prepared request, maps non-2xx statuses to [`ClientError::Status`],
/// and parses the body as JSON.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    context: &str,
) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = extract_detail(&body);
        tracing::debug!(
            request = %context,
            status = status.as_u16(),
            ?detail,
            "backend returned error status"
        );
        return Err(ClientError::Status {
            status: status.as_u16(),
            url,
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

pub(crate) fn build_http_client(
    user_agent: &str,
    timeout_secs: Option<u64>,
) -> Result<Client, ClientError> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent);
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Ensures the base ends with exactly one slash so relative paths append to
/// it rather than replacing its last segment.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: "URL cannot carry a path".to_owned(),
        });
    }
    Ok(url)
}

/// Pulls the human-readable message out of an error body.
///
/// The backend sends `{"detail": "..."}`; validation failures send `detail`
/// as a list, which is rendered as JSON.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

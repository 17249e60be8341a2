//! Client for the separately hosted event-metrics service.
//!
//! The service takes a date window and a list of event names and answers with
//! per-event daily counts in a `{"status": "success", "data": {...}}` envelope.

use chrono::{Days, NaiveDate};
use reqwest::{Client, Url};
use serde::Serialize;
use socialdash_core::AppConfig;
use tokio_util::sync::CancellationToken;

use crate::client::{build_http_client, send_json};
use crate::error::ClientError;
use crate::types::{EventSeries, EventsEnvelope};

/// Events shown when the panel opens.
pub const DEFAULT_EVENTS: &[&str] = &[
    "rc_trial_started_event",
    "Signup Completed",
    "rc_cancellation_event",
];

/// Days covered by the default window, ending today.
pub const DEFAULT_WINDOW_DAYS: u64 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventsRequest {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub events: Vec<String>,
}

impl EventsRequest {
    /// The default events over the two weeks ending `today`.
    #[must_use]
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            from_date: today
                .checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS))
                .unwrap_or(today),
            to_date: today,
            events: DEFAULT_EVENTS.iter().map(|e| (*e).to_owned()).collect(),
        }
    }

    /// Adds an event name unless it is blank or already present.
    pub fn add_event(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.events.iter().any(|e| e == name) {
            return false;
        }
        self.events.push(name.to_owned());
        true
    }

    pub fn remove_event(&mut self, name: &str) {
        self.events.retain(|e| e != name);
    }
}

/// Client for the event-metrics endpoint. The URL is the full endpoint, not
/// a base.
#[derive(Debug, Clone)]
pub struct EventsClient {
    client: Client,
    endpoint: Url,
}

impl EventsClient {
    /// Builds a client from configuration. Returns `Ok(None)` when no
    /// event-metrics endpoint is configured.
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`] if the HTTP client cannot be constructed, or
    /// [`ClientError::InvalidBaseUrl`] if the configured URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, ClientError> {
        let Some(endpoint) = config.events_url.as_deref() else {
            return Ok(None);
        };
        let client = build_http_client(&config.user_agent, config.request_timeout_secs)?;
        Ok(Some(Self::from_parts(client, endpoint)?))
    }

    /// Creates a client posting to `endpoint` (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`] if the HTTP client cannot be constructed, or
    /// [`ClientError::InvalidBaseUrl`] if `endpoint` does not parse.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, ClientError> {
        let client = build_http_client(socialdash_core::config::DEFAULT_USER_AGENT, None)?;
        Self::from_parts(client, endpoint)
    }

    fn from_parts(client: Client, endpoint: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint.trim()).map_err(|e| ClientError::InvalidBaseUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, endpoint })
    }

    /// Fetches daily counts for the requested events.
    ///
    /// Cancelling `cancel` abandons the in-flight request.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if no events are requested; no request is sent.
    /// - [`ClientError::Cancelled`] if `cancel` fires first.
    /// - [`ClientError::Remote`] if the service reports a non-success status.
    /// - [`ClientError::Http`], [`ClientError::Status`], or
    ///   [`ClientError::Deserialize`] for transport and decoding failures.
    pub async fn fetch(
        &self,
        request: &EventsRequest,
        cancel: &CancellationToken,
    ) -> Result<EventSeries, ClientError> {
        if request.events.is_empty() {
            return Err(ClientError::Validation(
                "please add at least one event".to_owned(),
            ));
        }

        let pending = send_json::<EventsEnvelope>(
            self.client.post(self.endpoint.clone()).json(request),
            "POST event metrics",
        );
        let envelope = tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("event metrics request cancelled");
                return Err(ClientError::Cancelled);
            }
            result = pending => result?,
        };

        if envelope.status != "success" {
            let reason = envelope.error.unwrap_or(envelope.status);
            return Err(ClientError::Remote(reason));
        }
        Ok(envelope.data.unwrap_or_default())
    }
}

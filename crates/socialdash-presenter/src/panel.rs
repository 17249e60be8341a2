//! Third-party event metrics panel.

use socialdash_client::{EventSeries, EventsClient, EventsRequest};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::PresenterError;

/// One date of the event chart: each requested event's count on that date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventChartRow {
    pub date: String,
    pub counts: Vec<(String, u64)>,
}

/// Pivots per-event daily counts into one row per date. Events with no entry
/// for a date count zero.
#[must_use]
pub fn pivot_events(series: &EventSeries) -> Vec<EventChartRow> {
    series
        .series
        .iter()
        .map(|date| EventChartRow {
            date: date.clone(),
            counts: series
                .values
                .iter()
                .map(|(event, by_date)| (event.clone(), by_date.get(date).copied().unwrap_or(0)))
                .collect(),
        })
        .collect()
}

/// A panel instance that loads its data at most once.
///
/// Dropping the panel cancels an in-flight load, so nothing is applied after
/// teardown.
#[derive(Debug)]
pub struct EventPanel {
    client: EventsClient,
    request: EventsRequest,
    cancel: CancellationToken,
    outcome: OnceCell<Result<EventSeries, String>>,
}

impl EventPanel {
    #[must_use]
    pub fn new(client: EventsClient, request: EventsRequest) -> Self {
        Self {
            client,
            request,
            cancel: CancellationToken::new(),
            outcome: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn request(&self) -> &EventsRequest {
        &self.request
    }

    /// Loads the panel's data. Only the first call reaches the network;
    /// later calls, including concurrent ones, get the same outcome.
    ///
    /// # Errors
    ///
    /// - [`PresenterError::Validation`] if the request names no events.
    /// - [`PresenterError::EventsUnavailable`] if the fetch failed or was
    ///   cancelled.
    pub async fn load(&self) -> Result<&EventSeries, PresenterError> {
        if self.request.events.is_empty() {
            return Err(PresenterError::Validation(
                "please add at least one event".to_owned(),
            ));
        }
        let outcome = self
            .outcome
            .get_or_init(|| async {
                self.client
                    .fetch(&self.request, &self.cancel)
                    .await
                    .map_err(|e| {
                        tracing::warn!(error = %e, "event metrics load failed");
                        e.to_string()
                    })
            })
            .await;
        outcome
            .as_ref()
            .map_err(|msg| PresenterError::EventsUnavailable(msg.clone()))
    }

    /// Chart rows once loaded successfully.
    #[must_use]
    pub fn chart_rows(&self) -> Option<Vec<EventChartRow>> {
        match self.outcome.get() {
            Some(Ok(series)) => Some(pivot_events(series)),
            _ => None,
        }
    }

    /// Cancels any in-flight load. Equivalent to dropping the panel.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// A handle that observes this panel's teardown.
    #[must_use]
    pub fn teardown_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }
}

impl Drop for EventPanel {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

//! `events` command: daily counts from the event-metrics service.

use chrono::{NaiveDate, Utc};
use clap::Args;
use socialdash_client::{EventsClient, EventsRequest};
use socialdash_core::AppConfig;
use socialdash_presenter::EventPanel;

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// First day (YYYY-MM-DD); defaults to two weeks ago
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Event names; defaults to the standard signup funnel
    pub events: Vec<String>,
}

impl EventsArgs {
    pub(crate) fn request(&self, today: NaiveDate) -> EventsRequest {
        let mut request = EventsRequest::default_for(today);
        if let Some(from) = self.from {
            request.from_date = from;
        }
        if let Some(to) = self.to {
            request.to_date = to;
        }
        if !self.events.is_empty() {
            request.events.clear();
            for name in &self.events {
                request.add_event(name);
            }
        }
        request
    }
}

/// # Errors
///
/// Returns an error if no event-metrics endpoint is configured, the request
/// fails, or the user interrupts it.
pub(crate) async fn run_events(config: &AppConfig, args: &EventsArgs) -> anyhow::Result<()> {
    let Some(client) = EventsClient::from_config(config)? else {
        anyhow::bail!("event metrics are disabled; set SOCIALDASH_EVENTS_URL");
    };
    let request = args.request(Utc::now().date_naive());
    if request.events.is_empty() {
        anyhow::bail!("please add at least one event");
    }
    let panel = EventPanel::new(client, request);

    let loaded = tokio::select! {
        result = panel.load() => result.map(|_| ()),
        _ = tokio::signal::ctrl_c() => {
            panel.close();
            anyhow::bail!("interrupted");
        }
    };
    loaded?;

    let Some(rows) = panel.chart_rows() else {
        return Ok(());
    };
    let names = &panel.request().events;
    println!(
        "Events {} to {}",
        panel.request().from_date,
        panel.request().to_date
    );
    let header: Vec<String> = names.iter().map(|n| format!("{n:>20}")).collect();
    println!("{:<12}{}", "DATE", header.concat());
    for row in rows {
        let counts: Vec<String> = names
            .iter()
            .map(|name| {
                let count = row
                    .counts
                    .iter()
                    .find(|(event, _)| event == name)
                    .map_or(0, |(_, n)| *n);
                format!("{count:>20}")
            })
            .collect();
        println!("{:<12}{}", row.date, counts.concat());
    }
    Ok(())
}

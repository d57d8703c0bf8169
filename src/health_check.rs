//! Server health monitor.
//!
//! Polls `GET /api/health` and turns the answer into a [`LinkStatus`] for the
//! status bar. Only changes are reported, so a steady link costs one request
//! per interval and nothing else.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::AppMessage;
use crate::client::ChatClient;
use crate::error::ChatError;
use crate::traits::HttpClient;

/// Reachability of the chat server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    /// Health endpoint answered `status: ok`
    Online,
    /// Server reachable but not reporting ok
    Degraded,
    /// No usable answer
    #[default]
    Offline,
}

impl LinkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LinkStatus::Online => "Connected",
            LinkStatus::Degraded => "Abnormal",
            LinkStatus::Offline => "Not connected",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one health probe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthReport {
    pub status: LinkStatus,
    pub model: Option<String>,
    pub provider: Option<String>,
    /// Server note about a failed upstream probe, or our own error text
    pub note: Option<String>,
}

impl HealthReport {
    fn offline(note: String) -> Self {
        Self {
            status: LinkStatus::Offline,
            note: Some(note),
            ..Self::default()
        }
    }

    /// Status bar text, e.g. `Connected · model-x`.
    pub fn summary(&self) -> String {
        match &self.model {
            Some(model) if self.status != LinkStatus::Offline => {
                format!("{} · {}", self.status.label(), model)
            }
            _ => self.status.label().to_string(),
        }
    }
}

/// Probe the server once.
pub async fn check_health<H: HttpClient>(client: &ChatClient<H>) -> HealthReport {
    match client.health().await {
        Ok(health) => HealthReport {
            status: if health.is_ok() {
                LinkStatus::Online
            } else {
                LinkStatus::Degraded
            },
            model: health.model,
            provider: health.provider,
            note: health.api_note,
        },
        // The server answered, just not with a 2xx
        Err(err @ ChatError::Status { .. }) => HealthReport {
            status: LinkStatus::Degraded,
            note: Some(err.to_string()),
            ..HealthReport::default()
        },
        Err(err) => HealthReport::offline(err.to_string()),
    }
}

/// Poll every `interval` and send changes as [`AppMessage::Health`].
///
/// The first probe runs immediately. The task ends when the receiver is
/// dropped.
pub fn spawn_health_poller<H>(
    client: ChatClient<H>,
    interval: Duration,
    tx: mpsc::UnboundedSender<AppMessage>,
) -> JoinHandle<()>
where
    H: HttpClient + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut last: Option<HealthReport> = None;

        loop {
            ticker.tick().await;
            let report = check_health(&client).await;

            if last.as_ref() == Some(&report) {
                debug!(status = %report.status, "Health unchanged");
                continue;
            }

            match report.status {
                LinkStatus::Online => info!(model = ?report.model, "Chat server online"),
                _ => warn!(status = %report.status, note = ?report.note, "Chat server not healthy"),
            }

            if tx.send(AppMessage::Health(report.clone())).is_err() {
                break;
            }
            last = Some(report);
        }
    })
}

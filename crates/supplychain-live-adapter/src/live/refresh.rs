/*
[INPUT]:  StatsSource, refresh interval, shutdown token
[OUTPUT]: Periodic render_stats calls on the dashboard view
[POS]:    Live layer - dashboard counter auto-refresh
[UPDATE]: When changing refresh cadence or failure handling
*/

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::http::StatsSource;
use crate::view::DashboardView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub refreshed: u64,
    pub failed: u64,
}

/// Re-fetches dashboard counters on a fixed cadence.
///
/// Failures are logged and skipped; the next tick tries again.
pub struct DashboardRefresher<S, V> {
    source: Arc<S>,
    view: Arc<V>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl<S: StatsSource, V: DashboardView> DashboardRefresher<S, V> {
    pub fn new(source: Arc<S>, view: Arc<V>, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            source,
            view,
            interval,
            shutdown,
        }
    }

    /// Fetch once and render on success.
    pub async fn refresh_once(&self) -> bool {
        match self.source.fetch_stats().await {
            Ok(stats) => {
                self.view.render_stats(&stats);
                true
            }
            Err(err) => {
                warn!(error = %err, retryable = err.is_retryable(), "dashboard stats refresh failed");
                false
            }
        }
    }

    /// Refresh every `interval` until shutdown. A zero interval disables refreshing.
    pub async fn run(self) -> RefreshSummary {
        let mut summary = RefreshSummary::default();
        if self.interval.is_zero() {
            info!("dashboard auto-refresh disabled");
            return summary;
        }

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    debug!(refreshed = summary.refreshed, failed = summary.failed, "dashboard refresher stopped");
                    return summary;
                }
                _ = ticker.tick() => {
                    if self.refresh_once().await {
                        summary.refreshed += 1;
                    } else {
                        summary.failed += 1;
                    }
                }
            }
        }
    }
}

//! Background probe loop

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::monitor::HealthMonitor;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

fn new_ticker(start: Instant, period: Duration) -> Interval {
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

impl HealthMonitor {
    /// Probe on every tick or trigger until cancelled
    ///
    /// The first tick completes immediately, which gives the startup probe.
    /// Cycles run outside the `select!`, so cancellation only takes effect
    /// between cycles. An interval change restarts the ticker without probing.
    pub(super) async fn run_loop(self, cancel: CancellationToken) {
        let period = self.check_interval().max(MIN_INTERVAL);
        let mut ticker = new_ticker(Instant::now(), period);

        info!(interval_ms = period.as_millis() as u64, "health monitor started");

        loop {
            let probe = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.reconfigured() => false,
                _ = ticker.tick() => true,
                _ = self.notified() => {
                    debug!("health check triggered");
                    true
                }
            };

            if probe {
                self.run_cycle().await;
            } else {
                let period = self.check_interval().max(MIN_INTERVAL);
                ticker = new_ticker(Instant::now() + period, period);
                info!(interval_ms = period.as_millis() as u64, "health check interval applied");
            }
        }

        info!("health monitor stopped");
    }
}

// src/adapter/scheduler.rs
// Fixed-interval trigger

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::adapter::http_server::SharedCycle;

/// Run one cycle per `period`, starting one period from now. A cycle that
/// overruns its slot delays the next one instead of queueing extra runs.
pub fn spawn_schedule(cycle: SharedCycle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            log::info!("Scheduled cycle starting");
            let summary = cycle.run_cycle().await;
            log::info!(
                "Scheduled cycle finished: au={} ag={} ratio={}",
                summary.au,
                summary.ag,
                summary.ratio.as_deref().unwrap_or("n/a")
            );
        }
    })
}

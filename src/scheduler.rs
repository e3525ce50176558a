use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::service::RecipeService;

/// Spawn the long-lived task that keeps the trending cache warm.
///
/// The first tick fires immediately, so the cache is populated at process
/// start; after that the loop wakes once per `period`. A refresh never
/// returns an error (failures degrade inside the service), so the loop runs
/// for the life of the process. Dropping the handle does not stop the task;
/// abort it on shutdown if needed.
pub fn spawn_refresh_loop(service: Arc<RecipeService>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            debug!("Starting scheduled trending refresh");
            service.refresh_trending().await;
        }
    })
}

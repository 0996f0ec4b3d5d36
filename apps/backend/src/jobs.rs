//! Background maintenance for the in-memory store

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;

use crate::store::Store;

/// How often expired sessions and devices are swept.
pub const SWEEP_PERIOD: Duration = Duration::from_secs(300);

/// Start the store sweeper.
///
/// Returns the join handle so the caller can abort it on shutdown.
pub fn start_background_jobs(store: Arc<Store>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(periodic_prune_job(store, SWEEP_PERIOD))
}

async fn periodic_prune_job(store: Arc<Store>, period: Duration) {
    let mut interval = interval(period);

    loop {
        interval.tick().await;

        let pruned = store.prune_expired().await;
        if pruned.sessions > 0 || pruned.devices > 0 {
            tracing::info!(
                "Pruned {} expired sessions and {} idle devices",
                pruned.sessions,
                pruned.devices
            );
        } else {
            tracing::debug!("Store sweep found nothing to prune");
        }
    }
}

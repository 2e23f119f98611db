// Shared scrape snapshot
//
// Written by the background scrape task, read by every chat request. Readers
// only clone an Arc under the lock, so a snapshot is never seen half-written.

use reqwest::Client;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{scrape_dynamic_data, DynamicData, ScrapeTargets};

/// Swappable holder for the latest DynamicData. Clone freely.
#[derive(Clone, Default)]
pub struct DynamicStore {
    current: Arc<RwLock<Option<Arc<DynamicData>>>>,
}

impl DynamicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, or `None` until the first successful scrape.
    pub fn snapshot(&self) -> Option<Arc<DynamicData>> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    /// Replace the snapshot.
    pub fn publish(&self, data: DynamicData) {
        let data = Arc::new(data);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(data);
    }
}

/// Run one scrape and publish it. Returns whether a snapshot was published.
///
/// When both pages fail, the previous snapshot (if any) stays in place.
pub async fn run_scrape_cycle(store: &DynamicStore, client: &Client, targets: &ScrapeTargets) -> bool {
    match scrape_dynamic_data(client, targets).await {
        Some(data) => {
            tracing::info!(
                players = data.roster.players.len(),
                coach = data.roster.coach.len(),
                results = data.results.len(),
                "Dynamic data updated"
            );
            store.publish(data);
            true
        }
        None => {
            if store.snapshot().is_some() {
                tracing::warn!("Scrape failed; keeping previous dynamic data");
            } else {
                tracing::warn!("Scrape failed; dynamic data unavailable");
            }
            false
        }
    }
}

/// Scrape once in the background, then every `refresh` if set.
///
/// Requests arriving before the first scrape completes see no dynamic data.
pub fn spawn_scrape_task(
    store: DynamicStore,
    client: Client,
    targets: ScrapeTargets,
    refresh: Option<Duration>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_scrape_cycle(&store, &client, &targets).await;

        let Some(period) = refresh else {
            tracing::debug!("Scrape refresh disabled");
            return;
        };

        tracing::info!(every_secs = period.as_secs(), "Scheduling scrape refresh");
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; the startup scrape already covered it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            run_scrape_cycle(&store, &client, &targets).await;
        }
    })
}

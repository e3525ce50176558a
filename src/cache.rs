use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::model::Recipe;

/// Contents of the trending cache at one point in time.
///
/// `last_updated` is `None` until the first successful refresh.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrendingSnapshot {
    pub recipes: Vec<Recipe>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Single-slot cache for the most recent trending batch.
///
/// The refresh scheduler is the only writer; request handlers read
/// concurrently. A slot is replaced wholesale, never mutated field by
/// field, so readers always see either the previous or the next batch.
#[derive(Debug, Default)]
pub struct TrendingCache {
    slot: RwLock<TrendingSnapshot>,
}

impl TrendingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Never blocks other readers and never triggers
    /// a refresh; before the first refresh this is the empty snapshot.
    pub async fn read(&self) -> TrendingSnapshot {
        self.slot.read().await.clone()
    }

    /// Replace the slot with a fresh batch and stamp it.
    pub async fn store(&self, recipes: Vec<Recipe>) {
        let snapshot = TrendingSnapshot {
            recipes,
            last_updated: Some(Utc::now()),
        };
        *self.slot.write().await = snapshot;
    }
}

use log::info;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{TrendingCache, TrendingSnapshot};
use crate::config::AppConfig;
use crate::discover::{LinkDiscoverer, ListingSource};
use crate::error::ScrapeError;
use crate::extract::RecipeExtractor;
use crate::fetch::PageFetcher;
use crate::model::Recipe;
use crate::pipeline::ExtractionPipeline;

/// The surface the route layer talks to: trending reads, on-demand category
/// and search lookups, and trending-cache refreshes.
pub struct RecipeService {
    discoverer: LinkDiscoverer,
    pipeline: ExtractionPipeline,
    cache: TrendingCache,
    categories: HashMap<String, String>,
    link_limit: usize,
}

impl RecipeService {
    pub fn new(config: &AppConfig) -> Result<Self, ScrapeError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ScrapeError::Parse(format!("Invalid base URL {}: {e}", config.base_url)))?;
        let fetcher = Arc::new(PageFetcher::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?);
        let extractor = Arc::new(RecipeExtractor::new(
            Arc::clone(&fetcher),
            config.placeholder_image.clone(),
        ));

        Ok(Self {
            discoverer: LinkDiscoverer::new(fetcher, base),
            pipeline: ExtractionPipeline::new(extractor, config.concurrency),
            cache: TrendingCache::new(),
            categories: config.categories.clone(),
            link_limit: config.link_limit,
        })
    }

    /// Current trending batch. Reads the cache only; never triggers work.
    /// Empty until the first successful refresh.
    pub async fn trending(&self) -> TrendingSnapshot {
        self.cache.read().await
    }

    /// Discover and extract recipes for a configured category.
    ///
    /// The unknown-key error is the one input-validation failure at this
    /// boundary; everything downstream degrades to an empty result instead.
    pub async fn category(&self, key: &str, limit: usize) -> Result<Vec<Recipe>, ScrapeError> {
        let path = self
            .categories
            .get(&key.to_lowercase())
            .ok_or_else(|| ScrapeError::UnknownCategory(key.to_string()))?;

        let source = ListingSource::Category(path.clone());
        let links = self.discoverer.discover(&source, limit).await;
        Ok(self.pipeline.extract_all(&links).await)
    }

    /// Discover and extract recipes matching a search query. No discoverable
    /// links or all-failed extractions both yield an empty result.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<Recipe> {
        let source = ListingSource::Search(query.to_string());
        let links = self.discoverer.discover(&source, limit).await;
        self.pipeline.extract_all(&links).await
    }

    /// Run one trending refresh cycle.
    ///
    /// Zero discovered links is treated as a transient upstream outage and
    /// leaves the previous cache intact. A non-empty discovery always
    /// replaces the slot, even when the new batch is smaller or empty: the
    /// latest crawl is the latest truth.
    pub async fn refresh_trending(&self) {
        let links = self
            .discoverer
            .discover(&ListingSource::Trending, self.link_limit)
            .await;
        if links.is_empty() {
            info!("Trending refresh found no links; keeping previous cache");
            return;
        }

        let recipes = self.pipeline.extract_all(&links).await;
        info!(
            "Trending cache refreshed: {} of {} links extracted",
            recipes.len(),
            links.len()
        );
        self.cache.store(recipes).await;
    }

    /// On-demand cache invalidation, run on the caller's own context.
    pub async fn force_refresh_trending(&self) {
        self.refresh_trending().await;
    }
}

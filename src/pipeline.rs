use futures::{stream, StreamExt};
use log::warn;
use std::sync::Arc;

use crate::extract::RecipeExtractor;
use crate::model::{ExtractionOutcome, Recipe};

/// Runs the extractor over a batch of links with bounded concurrency.
///
/// At most `concurrency` pages are in flight at once; the upstream site
/// rate-limits per client, so an unbounded fan-out would trade one failed
/// page for a failed batch. Output preserves input order, which is the
/// ordering this crate commits to.
pub struct ExtractionPipeline {
    extractor: Arc<RecipeExtractor>,
    concurrency: usize,
}

impl ExtractionPipeline {
    pub fn new(extractor: Arc<RecipeExtractor>, concurrency: usize) -> Self {
        Self {
            extractor,
            concurrency: concurrency.max(1),
        }
    }

    /// Extract every link, returning the successes in input order.
    ///
    /// Failures are logged with their link and dropped; a batch of N links
    /// with K failures yields N-K recipes, and an empty result is valid.
    pub async fn extract_all(&self, links: &[String]) -> Vec<Recipe> {
        // The futures are collected up front so no closure type ends up
        // inside the stream, which would make the spawned refresh future
        // fail the `Send` check (rust-lang/rust#64552). They stay lazy;
        // `buffered` still bounds how many are in flight.
        let futures: Vec<_> = links
            .iter()
            .map(|link| self.extractor.extract(link))
            .collect();
        let outcomes: Vec<ExtractionOutcome> = stream::iter(futures)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut recipes = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                ExtractionOutcome::Success(recipe) => recipes.push(recipe),
                ExtractionOutcome::Failure { link, cause } => {
                    warn!("Failed to extract {link}: {cause}");
                }
            }
        }
        recipes
    }
}

pub mod cache;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod extractors;
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod scheduler;
pub mod service;

pub use cache::{TrendingCache, TrendingSnapshot};
pub use config::AppConfig;
pub use discover::{LinkDiscoverer, ListingSource};
pub use error::ScrapeError;
pub use extract::RecipeExtractor;
pub use fetch::PageFetcher;
pub use model::{ExtractionOutcome, Recipe};
pub use pipeline::ExtractionPipeline;
pub use scheduler::spawn_refresh_loop;
pub use service::RecipeService;

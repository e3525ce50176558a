use thiserror::Error;

/// Errors that can occur while discovering and extracting recipes
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Failed to fetch a page over HTTP
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Failed to parse recipe data out of a page
    #[error("Failed to parse recipe: {0}")]
    Parse(String),

    /// No extractor recognized the page layout
    #[error("No extractor could parse the recipe from this page")]
    NoExtractorMatched,

    /// An extractor matched but a required field was absent
    #[error("Extracted recipe is missing required field: {0}")]
    MissingField(&'static str),

    /// Category key not present in the category table
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

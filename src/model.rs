use serde::Serialize;

use crate::error::ScrapeError;

/// A recipe extracted from a single upstream page.
///
/// `link` always holds the URL the recipe was extracted from. Every other
/// field may be empty or defaulted when the page did not expose it; a missing
/// optional field is not an extraction failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub title: String,
    /// Image URL; the placeholder URL when the page had no usable image.
    pub image: String,
    pub time: Option<String>,
    pub yields: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub link: String,
}

/// Outcome of extracting one link. Failures carry the link that produced
/// them so the pipeline can report exactly which page broke.
#[derive(Debug)]
pub enum ExtractionOutcome {
    Success(Recipe),
    Failure { link: String, cause: ScrapeError },
}

use scraper::Html;

use crate::error::ScrapeError;

mod html_class;
mod json_ld;

pub use self::html_class::HtmlClassExtractor;
pub use self::json_ld::JsonLdExtractor;

/// Raw fields pulled out of one recipe page, before normalization.
///
/// Only `title` is required. The extractor leaves `image` unset when the
/// page has none; the placeholder substitution happens downstream.
#[derive(Debug, Default, PartialEq)]
pub struct ExtractedFields {
    pub title: String,
    pub image: Option<String>,
    pub time: Option<String>,
    pub yields: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

pub trait Extractor {
    fn can_parse(&self, document: &Html) -> bool;
    fn parse(&self, document: &Html) -> Result<ExtractedFields, ScrapeError>;
}

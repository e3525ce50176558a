use log::debug;
use scraper::Html;
use std::sync::Arc;

use crate::error::ScrapeError;
use crate::extractors::{ExtractedFields, Extractor, HtmlClassExtractor, JsonLdExtractor};
use crate::fetch::PageFetcher;
use crate::model::{ExtractionOutcome, Recipe};

/// Turns one recipe link into a `Recipe`, or a failure tied to that link.
///
/// This is the isolation boundary: whatever goes wrong with one page (fetch
/// timeout, unparsable layout, missing title) becomes a `Failure` and never
/// reaches sibling extractions.
pub struct RecipeExtractor {
    fetcher: Arc<PageFetcher>,
    placeholder_image: String,
}

impl RecipeExtractor {
    pub fn new(fetcher: Arc<PageFetcher>, placeholder_image: String) -> Self {
        Self {
            fetcher,
            placeholder_image,
        }
    }

    pub async fn extract(&self, link: &str) -> ExtractionOutcome {
        match self.try_extract(link).await {
            Ok(recipe) => ExtractionOutcome::Success(recipe),
            Err(cause) => ExtractionOutcome::Failure {
                link: link.to_string(),
                cause,
            },
        }
    }

    async fn try_extract(&self, link: &str) -> Result<Recipe, ScrapeError> {
        let body = self.fetcher.fetch(link).await?;
        let fields = extract_fields(&body)?;
        self.normalize(fields, link)
    }

    fn normalize(&self, fields: ExtractedFields, link: &str) -> Result<Recipe, ScrapeError> {
        if fields.title.trim().is_empty() {
            return Err(ScrapeError::MissingField("title"));
        }

        Ok(Recipe {
            title: fields.title,
            image: fields
                .image
                .unwrap_or_else(|| self.placeholder_image.clone()),
            time: fields.time,
            yields: fields.yields,
            ingredients: fields.ingredients,
            instructions: fields.instructions,
            link: link.to_string(),
        })
    }
}

/// Run the extractor chain over a page body.
///
/// Kept synchronous so the parsed document never lives across an await
/// point (`scraper::Html` is not `Send`).
fn extract_fields(body: &str) -> Result<ExtractedFields, ScrapeError> {
    let document = Html::parse_document(body);
    let extractors: [&dyn Extractor; 2] = [&JsonLdExtractor, &HtmlClassExtractor];

    for extractor in extractors {
        if !extractor.can_parse(&document) {
            continue;
        }
        match extractor.parse(&document) {
            Ok(fields) => return Ok(fields),
            Err(e) => debug!("Extractor matched but failed to parse: {e}"),
        }
    }

    Err(ScrapeError::NoExtractorMatched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_body(title: &str) -> String {
        format!(
            r#"<html><head><script type="application/ld+json">
            {{"@type": "Recipe", "name": "{title}",
              "recipeIngredient": ["an ingredient"],
              "recipeInstructions": "Do the thing."}}
            </script></head><body></body></html>"#
        )
    }

    #[test]
    fn test_extract_fields_prefers_json_ld() {
        let fields = extract_fields(&recipe_body("Lemon Tart")).unwrap();
        assert_eq!(fields.title, "Lemon Tart");
    }

    #[test]
    fn test_extract_fields_unrecognized_layout() {
        let result = extract_fields("<html><body><p>hello</p></body></html>");
        assert!(matches!(result, Err(ScrapeError::NoExtractorMatched)));
    }
}

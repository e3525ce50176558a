use log::debug;
use scraper::{Html, Selector};

use crate::error::ScrapeError;
use crate::extractors::{ExtractedFields, Extractor};

/// Fallback extractor for pages without usable JSON-LD, matching the CSS
/// classes emitted by the common WordPress recipe-card plugins.
pub struct HtmlClassExtractor;

const TITLE_CLASSES: &[&str] = &[
    "wprm-recipe-name",
    "tasty-recipes-title",
    "mv-create-title",
    "recipe-title",
    "recipe-name",
];

const INGREDIENT_CLASSES: &[&str] = &[
    "wprm-recipe-ingredients-container",
    "tasty-recipes-ingredients",
    "mv-create-ingredients",
    "recipe-ingredients",
];

const INSTRUCTION_CLASSES: &[&str] = &[
    "wprm-recipe-instructions-container",
    "tasty-recipes-instructions",
    "mv-create-instructions",
    "recipe-instructions",
    "recipe-directions",
];

const TOTAL_TIME_CLASSES: &[&str] = &[
    "wprm-recipe-total-time",
    "tasty-recipes-total-time",
    "recipe-total-time",
    "total-time",
];

const YIELD_CLASSES: &[&str] = &[
    "wprm-recipe-servings",
    "tasty-recipes-yield",
    "recipe-yield",
    "recipe-servings",
];

fn first_text(document: &Html, classes: &[&str]) -> Option<String> {
    for class_name in classes {
        if let Ok(selector) = Selector::parse(&format!(".{class_name}")) {
            if let Some(element) = document.select(&selector).next() {
                let text = element
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim()
                    .to_string();
                if !text.is_empty() {
                    debug!("Found field using class: {class_name}");
                    return Some(text);
                }
            }
        }
    }
    None
}

fn list_items(document: &Html, classes: &[&str]) -> Vec<String> {
    let li_selector = Selector::parse("li").unwrap();
    for class_name in classes {
        if let Ok(selector) = Selector::parse(&format!(".{class_name}")) {
            let items: Vec<String> = document
                .select(&selector)
                .flat_map(|container| container.select(&li_selector))
                .map(|li| li.text().collect::<Vec<_>>().join(" ").trim().to_string())
                .filter(|text| !text.is_empty())
                .collect();
            if !items.is_empty() {
                debug!("Found {} items using class: {class_name}", items.len());
                return items;
            }
        }
    }
    Vec::new()
}

fn og_image(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[property='og:image']").unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string)
        .filter(|url| !url.trim().is_empty())
}

impl Extractor for HtmlClassExtractor {
    fn can_parse(&self, document: &Html) -> bool {
        first_text(document, TITLE_CLASSES).is_some()
            || !list_items(document, INGREDIENT_CLASSES).is_empty()
    }

    fn parse(&self, document: &Html) -> Result<ExtractedFields, ScrapeError> {
        let title = match first_text(document, TITLE_CLASSES) {
            Some(title) => title,
            None => {
                // h1 as a last resort
                let h1 = Selector::parse("h1").unwrap();
                document
                    .select(&h1)
                    .next()
                    .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
                    .unwrap_or_default()
            }
        };

        let ingredients = list_items(document, INGREDIENT_CLASSES);
        let instructions = list_items(document, INSTRUCTION_CLASSES);

        if title.is_empty() {
            return Err(ScrapeError::Parse(
                "Could not extract recipe title from HTML classes".to_string(),
            ));
        }
        if ingredients.is_empty() && instructions.is_empty() {
            return Err(ScrapeError::Parse(
                "Could not extract recipe content from HTML classes".to_string(),
            ));
        }

        Ok(ExtractedFields {
            title,
            image: og_image(document),
            time: first_text(document, TOTAL_TIME_CLASSES),
            yields: first_text(document, YIELD_CLASSES),
            ingredients,
            instructions,
        })
    }
}

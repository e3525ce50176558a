use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;

use crate::error::ScrapeError;
use crate::extractors::{ExtractedFields, Extractor};

/// Extracts recipe fields from schema.org Recipe JSON-LD script blocks.
///
/// Handles the three shapes found in the wild: a top-level Recipe object,
/// a top-level array containing a Recipe, and a Recipe nested in `@graph`.
pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    #[serde(default)]
    image: Option<ImageType>,
    #[serde(rename = "totalTime", default)]
    total_time: Option<TimeValue>,
    #[serde(rename = "recipeYield", default)]
    recipe_yield: Option<YieldValue>,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Vec<String>,
    #[serde(rename = "recipeInstructions", default)]
    recipe_instructions: Option<RecipeInstructions>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    // potentially multiple images as objects
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeValue {
    Iso(String),
    Minutes(f64),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldValue {
    String(String),
    Number(f64),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    MultipleObject(Vec<InstructionStep>),
    HowTo(Vec<HowTo>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

impl TryFrom<Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text))
        .trim()
        .to_string()
}

/// Turn an ISO-8601 duration like "PT1H30M" into "1 hr 30 mins".
/// Anything that does not look like one is returned untouched.
fn humanize_iso_duration(raw: &str) -> String {
    let Some(rest) = raw.strip_prefix("PT") else {
        return raw.to_string();
    };

    let mut parts = Vec::new();
    let mut digits = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let Ok(value) = digits.parse::<u64>() else {
            return raw.to_string();
        };
        digits.clear();
        match ch {
            'H' => parts.push(format!("{value} hr{}", if value == 1 { "" } else { "s" })),
            'M' => parts.push(format!("{value} min{}", if value == 1 { "" } else { "s" })),
            'S' => {}
            _ => return raw.to_string(),
        }
    }

    if parts.is_empty() {
        raw.to_string()
    } else {
        parts.join(" ")
    }
}

fn step_texts(step: HowToStep) -> Vec<String> {
    let mut texts = Vec::new();
    if let Some(text) = step.text {
        texts.push(text);
    }
    if let Some(desc) = step.description {
        texts.push(desc);
    }
    texts
}

impl From<JsonLdRecipe> for ExtractedFields {
    fn from(recipe: JsonLdRecipe) -> Self {
        ExtractedFields {
            title: decode_html_symbols(&recipe.name),
            image: match recipe.image {
                Some(ImageType::String(img)) => Some(img),
                Some(ImageType::Object(img)) => Some(img.url),
                Some(ImageType::MultipleStrings(imgs)) => imgs.into_iter().next(),
                Some(ImageType::MultipleObjects(imgs)) => {
                    imgs.into_iter().next().map(|img| img.url)
                }
                None => None,
            }
            .filter(|img| !img.trim().is_empty()),
            time: recipe.total_time.map(|time| match time {
                TimeValue::Iso(raw) => humanize_iso_duration(&raw),
                TimeValue::Minutes(mins) => format!("{} mins", mins as u64),
            }),
            yields: recipe.recipe_yield.and_then(|value| match value {
                YieldValue::String(text) => Some(decode_html_symbols(&text)),
                YieldValue::Number(n) => Some(format!("{} servings", n as u64)),
                YieldValue::Multiple(texts) => {
                    texts.into_iter().next().map(|t| decode_html_symbols(&t))
                }
            }),
            ingredients: recipe
                .recipe_ingredient
                .into_iter()
                .map(|ing| decode_html_symbols(&ing))
                .collect(),
            instructions: match recipe.recipe_instructions {
                None => Vec::new(),
                Some(RecipeInstructions::String(block)) => vec![decode_html_symbols(&block)],
                Some(RecipeInstructions::Multiple(steps)) => steps
                    .into_iter()
                    .map(|step| decode_html_symbols(&step))
                    .collect(),
                Some(RecipeInstructions::MultipleObject(steps)) => steps
                    .into_iter()
                    .map(|step| decode_html_symbols(&step.text))
                    .collect(),
                Some(RecipeInstructions::HowTo(sections)) => sections
                    .into_iter()
                    .flat_map(|section| match section {
                        HowTo::HowToStep(step) => step_texts(step),
                        HowTo::HowToSection(section) => section
                            .item_list_element
                            .into_iter()
                            .flat_map(step_texts)
                            .collect(),
                    })
                    .map(|text| decode_html_symbols(&text))
                    .collect(),
            },
        }
    }
}

// Clean JSON strings before parsing
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // Handle cases where there might be leading garbage before the JSON
    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    // Remove any trailing comma followed by closing brace/bracket
    cleaned = cleaned.replace(",]", "]").replace(",}", "}");

    // Remove any HTML comments that might be present
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}

fn is_recipe_node(value: &Value) -> bool {
    let typed_as_recipe = match value.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .any(|t| t.as_str().is_some_and(|t| t.eq_ignore_ascii_case("recipe"))),
        _ => false,
    };
    typed_as_recipe || value.get("recipeInstructions").is_some()
}

fn find_recipe_node(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_recipe_node),
        Value::Object(_) => {
            if is_recipe_node(value) {
                return Some(value);
            }
            value.get("@graph").and_then(find_recipe_node)
        }
        _ => None,
    }
}

fn ld_json_selector() -> Selector {
    Selector::parse("script[type='application/ld+json']").unwrap()
}

impl Extractor for JsonLdExtractor {
    fn can_parse(&self, document: &Html) -> bool {
        let selector = ld_json_selector();
        document.select(&selector).any(|script| {
            let cleaned_json = sanitize_json(&script.inner_html());
            serde_json::from_str::<Value>(&cleaned_json)
                .ok()
                .as_ref()
                .and_then(find_recipe_node)
                .is_some()
        })
    }

    fn parse(&self, document: &Html) -> Result<ExtractedFields, ScrapeError> {
        let selector = ld_json_selector();

        // Try each script element until one yields a valid recipe
        for script in document.select(&selector) {
            let cleaned_json = sanitize_json(&script.inner_html());
            let Ok(json_ld) = serde_json::from_str::<Value>(&cleaned_json) else {
                continue;
            };

            let recipe: Option<JsonLdRecipe> = find_recipe_node(&json_ld)
                .and_then(|node| JsonLdRecipe::try_from(node.clone()).ok());

            if let Some(recipe) = recipe {
                debug!("Found schema.org Recipe node: {}", recipe.name);
                return Ok(ExtractedFields::from(recipe));
            }
        }

        Err(ScrapeError::Parse(
            "No valid recipe found in any JSON-LD script".to_string(),
        ))
    }
}

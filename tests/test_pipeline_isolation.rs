use std::sync::Arc;
use std::time::Duration;

use recipe_radar::{ExtractionPipeline, PageFetcher, RecipeExtractor};

const PLACEHOLDER: &str = "https://via.placeholder.com/150";

fn recipe_html(title: &str, image: Option<&str>) -> String {
    let image_field = image
        .map(|url| format!(r#""image": "{url}","#))
        .unwrap_or_default();
    format!(
        r#"
        <html><head><script type="application/ld+json">
        {{
            "@context": "https://schema.org/",
            "@type": "Recipe",
            "name": "{title}",
            {image_field}
            "recipeIngredient": ["1 cup flour", "2 eggs"],
            "recipeInstructions": [
                {{"@type": "HowToStep", "text": "Mix"}},
                {{"@type": "HowToStep", "text": "Bake"}}
            ]
        }}
        </script></head><body></body></html>
        "#
    )
}

fn pipeline() -> ExtractionPipeline {
    let fetcher = Arc::new(PageFetcher::new("TestBot/1.0", Duration::from_secs(5)).unwrap());
    let extractor = Arc::new(RecipeExtractor::new(fetcher, PLACEHOLDER.to_string()));
    ExtractionPipeline::new(extractor, 4)
}

#[tokio::test]
async fn test_failed_extraction_does_not_abort_batch() {
    let mut server = mockito::Server::new_async().await;
    let _one = server
        .mock("GET", "/recipe/1/")
        .with_status(200)
        .with_body(recipe_html("Recipe One", Some("https://img.example.com/1.jpg")))
        .create_async()
        .await;
    let _two = server
        .mock("GET", "/recipe/2/")
        .with_status(500)
        .create_async()
        .await;
    let _three = server
        .mock("GET", "/recipe/3/")
        .with_status(200)
        .with_body(recipe_html("Recipe Three", None))
        .create_async()
        .await;

    let links = vec![
        format!("{}/recipe/1/", server.url()),
        format!("{}/recipe/2/", server.url()),
        format!("{}/recipe/3/", server.url()),
    ];

    let recipes = pipeline().extract_all(&links).await;

    assert_eq!(recipes.len(), 2);
    // input order preserved, each link field matches its source URL
    assert_eq!(recipes[0].title, "Recipe One");
    assert_eq!(recipes[0].link, links[0]);
    assert_eq!(recipes[1].title, "Recipe Three");
    assert_eq!(recipes[1].link, links[2]);
}

#[tokio::test]
async fn test_missing_image_gets_placeholder() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/recipe/no-image/")
        .with_status(200)
        .with_body(recipe_html("Imageless", None))
        .create_async()
        .await;

    let links = vec![format!("{}/recipe/no-image/", server.url())];
    let recipes = pipeline().extract_all(&links).await;

    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].image, PLACEHOLDER);
    assert_eq!(recipes[0].ingredients, vec!["1 cup flour", "2 eggs"]);
    assert_eq!(recipes[0].instructions, vec!["Mix", "Bake"]);
}

#[tokio::test]
async fn test_unrecognized_layout_is_an_isolated_failure() {
    let mut server = mockito::Server::new_async().await;
    let _plain = server
        .mock("GET", "/recipe/plain/")
        .with_status(200)
        .with_body("<html><body><p>Just some prose about food.</p></body></html>")
        .create_async()
        .await;
    let _good = server
        .mock("GET", "/recipe/good/")
        .with_status(200)
        .with_body(recipe_html("Good One", None))
        .create_async()
        .await;

    let links = vec![
        format!("{}/recipe/plain/", server.url()),
        format!("{}/recipe/good/", server.url()),
    ];
    let recipes = pipeline().extract_all(&links).await;

    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Good One");
}

#[tokio::test]
async fn test_empty_batch_yields_empty_result() {
    let recipes = pipeline().extract_all(&[]).await;
    assert!(recipes.is_empty());
}

use log::{debug, warn};
use reqwest::Url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;

use crate::fetch::PageFetcher;

/// A listing page to harvest recipe links from.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingSource {
    /// The site root, which surfaces currently trending recipes
    Trending,
    /// A category listing, identified by its upstream path segment
    /// (e.g. "79/desserts")
    Category(String),
    /// A free-text search against the site search endpoint
    Search(String),
}

impl ListingSource {
    /// Build the listing-page URL for this source.
    pub fn listing_url(&self, base: &Url) -> Url {
        match self {
            ListingSource::Trending => base.clone(),
            ListingSource::Category(path) => {
                let mut url = base.clone();
                url.set_path(&format!("/recipes/{}/", path.trim_matches('/')));
                url
            }
            ListingSource::Search(query) => {
                let mut url = base.clone();
                url.set_path("/search/results/");
                url.query_pairs_mut().append_pair("wt", query);
                url
            }
        }
    }
}

/// Finds recipe-page links on upstream listing pages.
pub struct LinkDiscoverer {
    fetcher: Arc<PageFetcher>,
    base: Url,
}

impl LinkDiscoverer {
    pub fn new(fetcher: Arc<PageFetcher>, base: Url) -> Self {
        Self { fetcher, base }
    }

    /// Fetch the listing page for `source` and return up to `limit`
    /// deduplicated recipe links in first-seen order.
    ///
    /// Any fetch or parse error degrades to an empty result: callers cannot
    /// tell "listing unreachable" from "listing had no recipe links". The
    /// warn log is the only place the difference is visible.
    pub async fn discover(&self, source: &ListingSource, limit: usize) -> Vec<String> {
        let url = source.listing_url(&self.base);
        let body = match self.fetcher.fetch(url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to fetch listing page {url}: {e}");
                return Vec::new();
            }
        };

        let links = collect_recipe_links(&body, &url, limit);
        debug!("Discovered {} links on {url}", links.len());
        links
    }
}

/// Pull recipe-page links out of a listing page body.
///
/// Anchors are matched on a `/recipe/` path segment, resolved against the
/// page URL, normalized to scheme+host+path (query and fragment dropped) and
/// deduplicated preserving first-seen order.
pub fn collect_recipe_links(html: &str, page_url: &Url, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href*='/recipe/']").unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&selector) {
        if links.len() >= limit {
            break;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(mut url) = page_url.join(href) else {
            debug!("Skipping unparsable href: {href}");
            continue;
        };
        url.set_query(None);
        url.set_fragment(None);
        // The attribute selector also matches `/recipe/` inside a query
        // string; only the path counts.
        if !url.path().contains("/recipe/") {
            continue;
        }
        let link = url.to_string();
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://cooking.example.com").unwrap()
    }

    #[test]
    fn test_trending_url_is_site_root() {
        let url = ListingSource::Trending.listing_url(&base());
        assert_eq!(url.as_str(), "https://cooking.example.com/");
    }

    #[test]
    fn test_category_url_uses_listing_path() {
        let source = ListingSource::Category("79/desserts".to_string());
        let url = source.listing_url(&base());
        assert_eq!(
            url.as_str(),
            "https://cooking.example.com/recipes/79/desserts/"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let source = ListingSource::Search("chicken pot pie".to_string());
        let url = source.listing_url(&base());
        assert_eq!(
            url.as_str(),
            "https://cooking.example.com/search/results/?wt=chicken+pot+pie"
        );
    }

    #[test]
    fn test_collect_links_dedups_in_first_seen_order() {
        let html = r#"
            <html><body>
                <a href="/recipe/1/">first</a>
                <a href="/recipe/2/">second</a>
                <a href="/recipe/1/">first again</a>
            </body></html>
        "#;
        let links = collect_recipe_links(html, &base(), 5);
        assert_eq!(
            links,
            vec![
                "https://cooking.example.com/recipe/1/",
                "https://cooking.example.com/recipe/2/",
            ]
        );
    }

    #[test]
    fn test_collect_links_normalizes_query_and_fragment() {
        let html = r#"
            <html><body>
                <a href="/recipe/42/?utm_source=home">tracked</a>
                <a href="https://cooking.example.com/recipe/42/#reviews">anchored</a>
            </body></html>
        "#;
        let links = collect_recipe_links(html, &base(), 5);
        assert_eq!(links, vec!["https://cooking.example.com/recipe/42/"]);
    }

    #[test]
    fn test_collect_links_enforces_limit() {
        let html: String = (1..=20)
            .map(|i| format!("<a href=\"/recipe/{i}/\">r{i}</a>"))
            .collect();
        let links = collect_recipe_links(&html, &base(), 6);
        assert_eq!(links.len(), 6);
        assert_eq!(links[0], "https://cooking.example.com/recipe/1/");
        assert_eq!(links[5], "https://cooking.example.com/recipe/6/");
    }

    #[test]
    fn test_collect_links_ignores_non_recipe_paths() {
        let html = r#"
            <html><body>
                <a href="/articles/how-to-chop/?from=/recipe/1/">article</a>
                <a href="/recipe/7/">recipe</a>
            </body></html>
        "#;
        let links = collect_recipe_links(html, &base(), 5);
        assert_eq!(links, vec!["https://cooking.example.com/recipe/7/"]);
    }

    #[test]
    fn test_collect_links_empty_page() {
        let links = collect_recipe_links("<html><body></body></html>", &base(), 5);
        assert!(links.is_empty());
    }
}

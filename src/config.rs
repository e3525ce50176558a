use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Runtime configuration for the scraper service
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Root URL of the upstream recipe site
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent sent with listing-page requests; the upstream site
    /// rejects unidentified clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum number of links taken from one listing page
    #[serde(default = "default_link_limit")]
    pub link_limit: usize,
    /// Maximum number of recipe pages fetched at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seconds between trending-cache refresh cycles
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Image URL substituted when a page has no usable image
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    /// Category key to upstream listing-path mapping. Paths drift between
    /// site snapshots, so this is deployment configuration, not code.
    #[serde(default = "default_categories")]
    pub categories: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            link_limit: default_link_limit(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            placeholder_image: default_placeholder_image(),
            categories: default_categories(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.allrecipes.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_link_limit() -> usize {
    10
}

fn default_concurrency() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_refresh_interval_secs() -> u64 {
    // 24 hours
    86_400
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/150".to_string()
}

fn default_categories() -> HashMap<String, String> {
    [
        ("desserts", "79/desserts"),
        ("drinks", "77/drinks"),
        ("breakfast", "78/breakfast-and-brunch"),
        ("lunch", "17561/lunch"),
        ("healthy", "84/healthy-recipes"),
        ("appetizers-and-snacks", "76/appetizers-and-snacks"),
        ("salads", "96/salad"),
        ("side-dishes", "81/side-dish"),
        ("soups", "16369/soups-stews-and-chili/soup"),
        ("bread", "156/bread"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_RADAR__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_RADAR__LINK_LIMIT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPE_RADAR__CATEGORIES__SOUPS
            .add_source(
                Environment::with_prefix("RECIPE_RADAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

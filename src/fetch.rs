use reqwest::Client;
use std::time::Duration;

use crate::error::ScrapeError;

/// HTTP fetcher shared by the discoverer and the extractor.
///
/// One client instance reuses connections across the whole batch and carries
/// the timeout that keeps a stuck upstream page from stalling a refresh.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a page body, treating non-2xx statuses as errors.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }
}

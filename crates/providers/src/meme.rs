//! Meme provider (meme-api.com-compatible API).

use crate::error::ProviderError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// A random meme post.
#[derive(Debug, Clone, Deserialize)]
pub struct Meme {
    pub title: String,
    pub url: String,
    #[serde(rename = "postLink")]
    pub post_link: String,
    pub subreddit: String,
}

/// Client for the meme API.
#[derive(Clone)]
pub struct MemeClient {
    client: Client,
    base_url: String,
}

impl MemeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one random meme.
    #[instrument(skip(self))]
    pub async fn random_meme(&self) -> Result<Meme, ProviderError> {
        let response = self
            .client
            .get(format!("{}/gimme", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(msg));
        }

        let meme: Meme = response.json().await?;
        debug!(subreddit = %meme.subreddit, "fetched meme");
        Ok(meme)
    }
}

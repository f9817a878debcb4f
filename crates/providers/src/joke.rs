//! Joke provider (official-joke-api-compatible API).

use crate::error::ProviderError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

/// A two-part joke.
#[derive(Debug, Clone, Deserialize)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

/// Client for the joke API.
#[derive(Clone)]
pub struct JokeClient {
    client: Client,
    base_url: String,
}

impl JokeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one random joke.
    #[instrument(skip(self))]
    pub async fn random_joke(&self) -> Result<Joke, ProviderError> {
        let response = self
            .client
            .get(format!("{}/random_joke", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(msg));
        }

        Ok(response.json().await?)
    }
}

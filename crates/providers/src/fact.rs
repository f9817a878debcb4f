//! Random fact provider (uselessfacts-compatible API).

use crate::error::ProviderError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

/// A random fact.
#[derive(Debug, Clone, Deserialize)]
pub struct Fact {
    pub text: String,
}

/// Client for the fact API.
#[derive(Clone)]
pub struct FactClient {
    client: Client,
    base_url: String,
}

impl FactClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one random fact.
    #[instrument(skip(self))]
    pub async fn random_fact(&self) -> Result<Fact, ProviderError> {
        let response = self
            .client
            .get(format!("{}/api/v2/facts/random", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(msg));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_random_fact() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/facts/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "abc",
                "text": "Bananas are berries.",
                "source": "djtech.net",
                "language": "en"
            })))
            .mount(&server)
            .await;

        let client = FactClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let fact = client.random_fact().await.unwrap();
        assert_eq!(fact.text, "Bananas are berries.");
    }
}

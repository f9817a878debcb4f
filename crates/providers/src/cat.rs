//! Cat image provider (thecatapi.com-compatible API).

use crate::error::ProviderError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// A random cat image.
#[derive(Debug, Clone, Deserialize)]
pub struct CatImage {
    pub url: String,
}

/// Client for the cat image search API.
#[derive(Clone)]
pub struct CatClient {
    client: Client,
    base_url: String,
}

impl CatClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one random cat image.
    #[instrument(skip(self))]
    pub async fn random_image(&self) -> Result<CatImage, ProviderError> {
        let response = self
            .client
            .get(format!("{}/v1/images/search", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(msg));
        }

        let images: Vec<CatImage> = response.json().await?;
        let image = images.into_iter().next().ok_or(ProviderError::EmptyResponse)?;
        debug!(url = %image.url, "fetched cat image");
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_random_image() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/images/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "abc", "url": "https://cdn2.example/abc.jpg", "width": 500, "height": 400 }
            ])))
            .mount(&server)
            .await;

        let client = CatClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let image = client.random_image().await.unwrap();
        assert_eq!(image.url, "https://cdn2.example/abc.jpg");
    }

    #[tokio::test]
    async fn test_empty_result_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/images/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = CatClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.random_image().await,
            Err(ProviderError::EmptyResponse)
        ));
    }
}

//! Trivia provider (Open Trivia DB-compatible API).

use crate::error::ProviderError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// One multiple-choice trivia question.
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaQuestion {
    pub category: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    results: Vec<TriviaQuestion>,
}

/// Client for the trivia API.
#[derive(Clone)]
pub struct TriviaClient {
    client: Client,
    base_url: String,
}

impl TriviaClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch one multiple-choice question, optionally pinned to a
    /// difficulty (`easy`, `medium`, `hard`).
    #[instrument(skip(self))]
    pub async fn question(
        &self,
        difficulty: Option<&str>,
    ) -> Result<TriviaQuestion, ProviderError> {
        let mut url = format!("{}/api.php?amount=1&type=multiple", self.base_url);
        if let Some(difficulty) = difficulty {
            url.push_str("&difficulty=");
            url.push_str(difficulty);
        }

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(msg));
        }

        let body: TriviaResponse = response.json().await?;
        if body.response_code != 0 {
            return Err(ProviderError::Api(format!(
                "trivia response code {}",
                body.response_code
            )));
        }

        let mut question = body
            .results
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        // The API HTML-escapes its text fields.
        question.question = unescape_html(&question.question);
        question.correct_answer = unescape_html(&question.correct_answer);
        question.incorrect_answers = question
            .incorrect_answers
            .iter()
            .map(|a| unescape_html(a))
            .collect();

        debug!(category = %question.category, "fetched trivia question");
        Ok(question)
    }
}

/// Decode the handful of HTML entities the trivia API actually emits.
fn unescape_html(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&rsquo;", "'")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body() -> serde_json::Value {
        serde_json::json!({
            "response_code": 0,
            "results": [{
                "category": "Science &amp; Nature",
                "type": "multiple",
                "difficulty": "easy",
                "question": "What&#039;s H2O?",
                "correct_answer": "Water",
                "incorrect_answers": ["Helium", "Hydrogen", "&quot;Air&quot;"]
            }]
        })
    }

    #[tokio::test]
    async fn test_question_unescapes_entities() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body()))
            .mount(&server)
            .await;

        let client = TriviaClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let q = client.question(None).await.unwrap();

        assert_eq!(q.category, "Science & Nature");
        assert_eq!(q.question, "What's H2O?");
        assert_eq!(q.incorrect_answers[2], "\"Air\"");
    }

    #[tokio::test]
    async fn test_difficulty_forwarded_as_query_param() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .and(query_param("difficulty", "hard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = TriviaClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        client.question(Some("hard")).await.unwrap();
    }

    #[tokio::test]
    async fn test_nonzero_response_code_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response_code": 1,
                "results": []
            })))
            .mount(&server)
            .await;

        let client = TriviaClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.question(None).await,
            Err(ProviderError::Api(_))
        ));
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(unescape_html("a &amp; b"), "a & b");
        assert_eq!(unescape_html("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(unescape_html("plain"), "plain");
    }
}

use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::error::{Error, Result};

pub const DEFAULT_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "deepseek-r1:14b";

/// Embeds text through an Ollama server's `/api/embed` endpoint.
pub struct OllamaEmbedder {
    client: reqwest::Client,
    host: String,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.into(),
            model: model.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/api/embed", self.host.trim_end_matches('/'))
    }
}

impl Embedder for OllamaEmbedder {
    fn model(&self) -> &str {
        &self.model
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        tracing::debug!("Embedding {} texts with {}", texts.len(), self.model);

        let payload = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self.client.post(self.url()).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let message = match serde_json::from_str::<OllamaError>(&body) {
                Ok(error) => error.error,
                Err(_) => format!("{status}: {body}"),
            };
            return Err(Error::Provider(message));
        }

        let response: EmbedResponse = response.json().await?;

        if response.embeddings.len() != texts.len() {
            return Err(Error::EmbeddingCount {
                expected: texts.len(),
                got: response.embeddings.len(),
            });
        }

        Ok(response.embeddings)
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::{EmbedRequest, OllamaEmbedder};

    #[test]
    fn test_request_shape() {
        let input = vec!["depth: 10".to_string()];
        let payload = EmbedRequest {
            model: "deepseek-r1:14b",
            input: &input,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({ "model": "deepseek-r1:14b", "input": ["depth: 10"] })
        );
    }

    #[test]
    fn test_url_ignores_trailing_slash() {
        let embedder = OllamaEmbedder::new("http://ollama:11434/", "m");
        assert_eq!(embedder.url(), "http://ollama:11434/api/embed");
    }
}

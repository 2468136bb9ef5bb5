//! HTTP client for the Gemini generateContent endpoint

use reqwest::Client;

use super::error::GenerationError;
use super::models::{GenerateContentRequest, GenerateContentResponse};

/// Gemini API client
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// API key, sent as a query-string credential
    api_key: String,
}

impl GeminiClient {
    /// Gemini generateContent endpoint
    const API_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

    /// Create a new client with the given API key
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }

    /// Send a request and return the first candidate's text
    pub async fn generate(&self, request: GenerateContentRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(Self::API_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Parse(e.to_string()))?;

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| GenerationError::Parse("response carried no candidate text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = GeminiClient::new("AIza-test-key".to_string());
        assert_eq!(client.api_key, "AIza-test-key");
    }
}

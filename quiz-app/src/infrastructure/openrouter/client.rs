use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use quiz_errors::AppError;
use std::time::Duration;

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";

pub struct OpenRouterClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: String) -> Result<Self, AppError> {
        Self::with_base_url(api_key, model, OPENROUTER_API_URL.to_string())
    }

    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, prompt: String) -> Result<String, AppError> {
        let request = ChatCompletionRequest::new(&self.model, prompt);

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("X-Title", "URL Quiz Generator")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("OpenRouter error: {} - {}", status, body);
            return Err(AppError::GenerationFailed(format!("API error: {}", status)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::GenerationFailed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AppError::GenerationFailed("No response from model".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer or-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"answer\": \"x\"}"}}]
            })))
            .mount(&server)
            .await;

        let client =
            OpenRouterClient::with_base_url("or-key".into(), "some/model".into(), server.uri())
                .unwrap();
        let text = client.generate("prompt".into()).await.unwrap();
        assert_eq!(text, "{\"answer\": \"x\"}");
    }

    #[tokio::test]
    async fn test_empty_choices_is_generation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let client =
            OpenRouterClient::with_base_url("or-key".into(), "some/model".into(), server.uri())
                .unwrap();
        let err = client.generate("prompt".into()).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }
}

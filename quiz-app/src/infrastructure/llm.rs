use super::gemini::GeminiClient;
use super::openrouter::OpenRouterClient;
use quiz_errors::AppError;

pub enum LlmBackend {
    Gemini(GeminiClient),
    OpenRouter(OpenRouterClient),
}

impl LlmBackend {
    /// Sends one prompt and returns the model's raw text answer.
    pub async fn generate(&self, prompt: String) -> Result<String, AppError> {
        tracing::info!("Calling {} ({} chars prompt)", self.describe(), prompt.chars().count());

        let text = match self {
            Self::Gemini(client) => client.generate(prompt).await,
            Self::OpenRouter(client) => client.generate(prompt).await,
        }?;

        tracing::debug!("Raw model response:\n{}", text);
        Ok(text)
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Gemini(client) => format!("Gemini/{}", client.model()),
            Self::OpenRouter(client) => format!("OpenRouter/{}", client.model()),
        }
    }
}

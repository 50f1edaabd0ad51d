use crate::application::GenerateQuiz;
use crate::config::{AppConfig, LlmProvider};
use crate::infrastructure::gemini::{GeminiClient, GEMINI_API_URL};
use crate::infrastructure::llm::LlmBackend;
use crate::infrastructure::openrouter::{OpenRouterClient, OPENROUTER_API_URL};
use crate::infrastructure::scraper::PageExtractor;
use quiz_errors::AppError;
use std::sync::Arc;

/// Everything a request handler needs, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub generate_quiz: Arc<GenerateQuiz>,
}

impl AppContext {
    pub fn new(generate_quiz: GenerateQuiz) -> Self {
        Self {
            generate_quiz: Arc::new(generate_quiz),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let backend = Self::build_backend(config)?;
        tracing::info!(
            "Using {} backend, {} pipeline",
            backend.describe(),
            config.pipeline
        );

        let extractor = PageExtractor::new()?;
        Ok(Self::new(GenerateQuiz::new(extractor, backend, config.pipeline)))
    }

    pub fn build_backend(config: &AppConfig) -> Result<LlmBackend, AppError> {
        let api_key = config.api_key.clone();
        let model = config.model.clone();

        match config.provider {
            LlmProvider::Gemini => {
                let base_url = config
                    .llm_base_url
                    .clone()
                    .unwrap_or_else(|| GEMINI_API_URL.to_string());
                GeminiClient::with_base_url(api_key, model, base_url).map(LlmBackend::Gemini)
            }
            LlmProvider::OpenRouter => {
                let base_url = config
                    .llm_base_url
                    .clone()
                    .unwrap_or_else(|| OPENROUTER_API_URL.to_string());
                OpenRouterClient::with_base_url(api_key, model, base_url)
                    .map(LlmBackend::OpenRouter)
            }
        }
    }
}

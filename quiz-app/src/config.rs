use crate::application::PipelineMode;
use quiz_errors::AppError;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenRouter,
}

impl LlmProvider {
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.0-flash-lite",
            Self::OpenRouter => "google/gemini-2.0-flash-lite-001",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    /// Overrides the provider's API root, mainly for local mocks.
    pub llm_base_url: Option<String>,
    pub pipeline: PipelineMode,
    pub allowed_origin: String,
    pub server_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let (provider, api_key) = if let Some(key) = var("GEMINI_API_KEY") {
            (LlmProvider::Gemini, key)
        } else if let Some(key) = var("OPENROUTER_API_KEY") {
            (LlmProvider::OpenRouter, key)
        } else {
            return Err(AppError::Config(
                "GEMINI_API_KEY or OPENROUTER_API_KEY must be set".to_string(),
            ));
        };

        let model = var("QUIZ_MODEL").unwrap_or_else(|| provider.default_model().to_string());

        let pipeline = match var("QUIZ_PIPELINE") {
            Some(value) => value.parse()?,
            None => PipelineMode::SinglePass,
        };

        let allowed_origin =
            var("QUIZ_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = var("PORT").unwrap_or_else(|| "8000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = host
            .parse::<IpAddr>()
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        Ok(Self {
            provider,
            api_key,
            model,
            llm_base_url: var("QUIZ_LLM_BASE_URL"),
            pipeline,
            allowed_origin,
            server_addr: SocketAddr::new(ip, port),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_gemini_key() {
        let config = config_from(&[("GEMINI_API_KEY", "g-key")]).unwrap();

        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.api_key, "g-key");
        assert_eq!(config.model, "gemini-2.0-flash-lite");
        assert_eq!(config.pipeline, PipelineMode::SinglePass);
        assert_eq!(config.allowed_origin, DEFAULT_ALLOWED_ORIGIN);
        assert_eq!(config.server_addr, "127.0.0.1:8000".parse().unwrap());
        assert!(config.llm_base_url.is_none());
    }

    #[test]
    fn test_openrouter_fallback() {
        let config = config_from(&[("GEMINI_API_KEY", " "), ("OPENROUTER_API_KEY", "or-key")])
            .unwrap();
        assert_eq!(config.provider, LlmProvider::OpenRouter);
        assert_eq!(config.model, LlmProvider::OpenRouter.default_model());
    }

    #[test]
    fn test_missing_key_is_config_error() {
        assert!(matches!(config_from(&[]), Err(AppError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "g-key"),
            ("QUIZ_MODEL", "gemini-2.0-flash"),
            ("QUIZ_PIPELINE", "refine"),
            ("QUIZ_ALLOWED_ORIGIN", "https://quiz.example.com"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.pipeline, PipelineMode::GenerateAndRefine);
        assert_eq!(config.allowed_origin, "https://quiz.example.com");
        assert_eq!(config.server_addr, "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("PORT", "http")]).is_err());
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("QUIZ_PIPELINE", "twice")]).is_err());
    }
}

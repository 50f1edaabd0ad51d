use crate::domain::{QuizRequest, QuizResult};
use crate::infrastructure::llm::LlmBackend;
use crate::infrastructure::prompt::{
    build_draft_prompt, build_quiz_prompt, build_refine_prompt, truncate_source_text,
    MAX_SOURCE_CHARS,
};
use crate::infrastructure::quiz_parser::parse_quiz_response;
use crate::infrastructure::scraper::PageExtractor;
use crate::infrastructure::security::InputSanitizer;
use quiz_errors::AppError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineMode {
    /// One call that must answer with the final JSON.
    #[default]
    SinglePass,
    /// A draft call followed by a self-review call that fixes rule violations.
    GenerateAndRefine,
}

impl FromStr for PipelineMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "single-pass" => Ok(Self::SinglePass),
            "refine" | "two-pass" => Ok(Self::GenerateAndRefine),
            other => Err(AppError::Config(format!("Unknown pipeline mode: {}", other))),
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinglePass => f.write_str("single"),
            Self::GenerateAndRefine => f.write_str("refine"),
        }
    }
}

pub struct GenerateQuiz {
    extractor: PageExtractor,
    backend: LlmBackend,
    mode: PipelineMode,
    max_source_chars: usize,
}

impl GenerateQuiz {
    pub fn new(extractor: PageExtractor, backend: LlmBackend, mode: PipelineMode) -> Self {
        Self {
            extractor,
            backend,
            mode,
            max_source_chars: MAX_SOURCE_CHARS,
        }
    }

    pub fn with_max_source_chars(mut self, max_source_chars: usize) -> Self {
        self.max_source_chars = max_source_chars;
        self
    }

    pub async fn execute(&self, request: &QuizRequest) -> Result<QuizResult, AppError> {
        let fetch_url = InputSanitizer::validate_url(&request.url)?;
        // The prompt quotes the caller's URL as given, not the normalized form.
        let url = request.url.trim();
        let content = self.extractor.extract(fetch_url.as_str()).await?;
        let source_text = truncate_source_text(&content.body_text, self.max_source_chars);

        let raw = match self.mode {
            PipelineMode::SinglePass => {
                let prompt = build_quiz_prompt(&content.title, url, &source_text);
                self.backend.generate(prompt).await?
            }
            PipelineMode::GenerateAndRefine => {
                let draft_prompt = build_draft_prompt(&content.title, url, &source_text);
                let draft = self.backend.generate(draft_prompt).await?;
                tracing::info!("Draft quiz:\n{}", draft);

                self.backend.generate(build_refine_prompt(&draft)).await?
            }
        };

        let quiz = parse_quiz_response(&raw)?;
        tracing::info!("Quiz generated for {} ({} mode)", url, self.mode);
        Ok(quiz)
    }
}

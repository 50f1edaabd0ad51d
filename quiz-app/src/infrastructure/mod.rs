pub mod gemini;
pub mod llm;
pub mod openrouter;
pub mod prompt;
pub mod quiz_parser;
pub mod scraper;
pub mod security;

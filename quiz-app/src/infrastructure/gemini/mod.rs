mod client;
mod types;

pub use client::{GeminiClient, GEMINI_API_URL};

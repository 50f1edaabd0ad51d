mod client;
mod types;

pub use client::{OpenRouterClient, OPENROUTER_API_URL};

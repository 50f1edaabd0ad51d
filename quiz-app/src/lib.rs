pub mod domain;
pub mod application;
pub mod infrastructure;

mod app_context;
mod config;

pub use app_context::AppContext;
pub use config::{AppConfig, LlmProvider};

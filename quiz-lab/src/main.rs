//! Runs the quiz pipeline once against a single page and prints the result.
//!
//! Defaults to the two-pass flow: a draft call, then a self-review call that
//! fixes rule violations in the draft.

use clap::Parser;
use quiz_app::application::{GenerateQuiz, PipelineMode};
use quiz_app::domain::QuizRequest;
use quiz_app::infrastructure::prompt::MAX_SOURCE_CHARS;
use quiz_app::infrastructure::scraper::PageExtractor;
use quiz_app::{AppConfig, AppContext};
use quiz_errors::AppError;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "quiz-lab", about = "Generate one trivia quiz from a web page")]
struct Cli {
    /// Page to build the quiz from
    url: String,

    /// Skip the review call and use the single-pass prompt
    #[arg(long)]
    single_pass: bool,

    /// Model id
    #[arg(long, env = "QUIZ_MODEL")]
    model: Option<String>,

    #[arg(long, default_value_t = MAX_SOURCE_CHARS)]
    max_chars: usize,
}

impl Cli {
    fn pipeline(&self) -> PipelineMode {
        if self.single_pass {
            PipelineMode::SinglePass
        } else {
            PipelineMode::GenerateAndRefine
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(AppError::InvalidModelOutput { raw, reason }) => {
            tracing::error!("Final output is not valid JSON: {}", reason);
            println!("{}", raw);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<String, AppError> {
    let mut config = AppConfig::from_env()?;
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    config.pipeline = cli.pipeline();

    let backend = AppContext::build_backend(&config)?;
    tracing::info!("Using {} ({} pipeline)", backend.describe(), config.pipeline);

    let generate_quiz = GenerateQuiz::new(PageExtractor::new()?, backend, config.pipeline)
        .with_max_source_chars(cli.max_chars);

    let quiz = generate_quiz.execute(&QuizRequest::new(cli.url.clone())).await?;

    serde_json::to_string_pretty(&quiz).map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_refine() {
        let cli = Cli::try_parse_from(["quiz-lab", "https://kotobank.jp/word/x"]).unwrap();
        assert_eq!(cli.pipeline(), PipelineMode::GenerateAndRefine);
        assert_eq!(cli.max_chars, MAX_SOURCE_CHARS);
        assert!(cli.model.is_none());
    }

    #[test]
    fn test_single_pass_flag() {
        let cli = Cli::try_parse_from([
            "quiz-lab",
            "https://kotobank.jp/word/x",
            "--single-pass",
            "--model",
            "gemini-2.0-flash",
            "--max-chars",
            "4000",
        ])
        .unwrap();
        assert_eq!(cli.pipeline(), PipelineMode::SinglePass);
        assert_eq!(cli.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(cli.max_chars, 4000);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["quiz-lab"]).is_err());
    }
}

use crate::domain::QuizResult;
use quiz_errors::AppError;
use regex_lite::Regex;
use std::sync::LazyLock;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+-]*").expect("Failed to parse fence pattern"));

const FENCE: &str = "```";

/// Strips surrounding whitespace and markdown code fences from a model answer.
pub fn clean_model_output(raw: &str) -> String {
    let text = raw.trim();
    let text = LEADING_FENCE.replace(text, "");
    let text = text.trim();
    let text = text.strip_suffix(FENCE).unwrap_or(text);
    text.trim().to_string()
}

/// Parses a raw model answer into a [`QuizResult`].
///
/// When the cleaned text is not valid JSON, the outermost `{ .. }` span is
/// tried before giving up. The error keeps the raw answer untouched.
pub fn parse_quiz_response(raw: &str) -> Result<QuizResult, AppError> {
    let cleaned = clean_model_output(raw);

    let first_error = match serde_json::from_str::<QuizResult>(&cleaned) {
        Ok(quiz) => return Ok(quiz),
        Err(e) => e,
    };

    if let Some(candidate) = outermost_object(&cleaned) {
        if candidate.len() != cleaned.len() {
            if let Ok(quiz) = serde_json::from_str::<QuizResult>(candidate) {
                tracing::debug!("Recovered quiz JSON from surrounding text");
                return Ok(quiz);
            }
        }
    }

    tracing::error!("Model output is not valid quiz JSON: {}", first_error);
    Err(AppError::InvalidModelOutput {
        raw: raw.to_string(),
        reason: first_error.to_string(),
    })
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

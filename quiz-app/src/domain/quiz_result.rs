use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One generated quiz question, returned to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(deserialize_with = "lenient_string")]
    pub question: String,
    #[serde(deserialize_with = "lenient_string")]
    pub answer: String,
    #[serde(
        alias = "Alternative Solutions/Correctness Judgment Criteria",
        alias = "alternative_answers",
        deserialize_with = "lenient_string"
    )]
    pub alternative_answers: String,
    #[serde(deserialize_with = "lenient_string")]
    pub explanation: String,
    #[serde(deserialize_with = "lenient_string")]
    pub source: String,
}

// Models occasionally answer with `"source": {"title": .., "url": ..}` or a list
// of alternatives instead of a plain string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flatten_value(&Value::deserialize(deserializer)?))
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("、"),
        Value::Object(map) => {
            let title = map.get("title").and_then(Value::as_str);
            let url = map.get("url").and_then(Value::as_str);
            match (title, url) {
                (Some(title), Some(url)) => format!("{} ({})", title, url),
                (Some(title), None) => title.to_string(),
                (None, Some(url)) => url.to_string(),
                (None, None) => value.to_string(),
            }
        }
        other => other.to_string(),
    }
}

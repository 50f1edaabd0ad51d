use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "タイトル不明";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub title: String,
    pub body_text: String,
}

impl ExtractedContent {
    pub fn new(title: Option<String>, body_text: String) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        Self { title, body_text }
    }

    pub fn is_empty(&self) -> bool {
        self.body_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_uses_sentinel() {
        let content = ExtractedContent::new(None, "本文".to_string());
        assert_eq!(content.title, UNKNOWN_TITLE);

        let content = ExtractedContent::new(Some("   ".to_string()), "本文".to_string());
        assert_eq!(content.title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_title_is_trimmed() {
        let content = ExtractedContent::new(Some("\n 山東京伝 \n".to_string()), String::new());
        assert_eq!(content.title, "山東京伝");
        assert!(content.is_empty());
    }
}

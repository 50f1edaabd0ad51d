#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Could not get content from URL: {0}")]
    ContentUnavailable(String),

    #[error("Model did not return valid quiz JSON: {reason}")]
    InvalidModelOutput { raw: String, reason: String },

    #[error("Quiz generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidUrl(_) => "URLの形式が正しくありません。".to_string(),
            Self::ContentUnavailable(_) => "URLからコンテンツを取得できませんでした。".to_string(),
            Self::InvalidModelOutput { raw, .. } => {
                format!("AIが有効なJSONを返しませんでした。RAW: {}", raw)
            }
            Self::GenerationFailed(_) => {
                "AIによるクイズ生成中にエラーが発生しました。".to_string()
            }
            Self::Config(_) => "サーバーの設定に問題があります。".to_string(),
            Self::Internal(_) => "サーバー内部でエラーが発生しました。".to_string(),
        }
    }

    /// True for failures caused by the requested page rather than by the server.
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::ContentUnavailable(_))
    }

    /// Raw model text for responses that could not be parsed.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::InvalidModelOutput { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(feature = "http")]
mod http_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        detail: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::InvalidUrl(_) | AppError::ContentUnavailable(_) => {
                    StatusCode::BAD_REQUEST
                }
                AppError::InvalidModelOutput { .. }
                | AppError::GenerationFailed(_)
                | AppError::Config(_)
                | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            let body = ErrorResponse {
                detail: self.user_message(),
                raw: self.raw_output().map(str::to_string),
            };
            (status, Json(body)).into_response()
        }
    }

}

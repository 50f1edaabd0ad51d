use quiz_errors::AppError;

const MAX_URL_LENGTH: usize = 2048;
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

pub struct InputSanitizer;

impl InputSanitizer {
    /// Checks that `url` is an absolute http(s) URL with a host.
    ///
    /// The returned [`url::Url`] is normalized (percent-encoded path, trailing
    /// `/` on bare hosts) and is meant for fetching only.
    pub fn validate_url(url: &str) -> Result<url::Url, AppError> {
        let url = url.trim();

        if url.is_empty() {
            return Err(AppError::InvalidUrl("URL is empty".to_string()));
        }

        if url.len() > MAX_URL_LENGTH {
            return Err(AppError::InvalidUrl("URL is too long".to_string()));
        }

        let parsed = url::Url::parse(url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)))?;

        if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
            return Err(AppError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(AppError::InvalidUrl("URL has no host".to_string()));
        }

        Ok(parsed)
    }
}

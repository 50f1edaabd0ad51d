use crate::domain::ExtractedContent;
use encoding_rs::{Encoding, UTF_8};
use quiz_errors::AppError;
use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Elements whose whole subtree is dropped before collecting text.
pub const EXCLUDED_TAGS: &[&str] = &["script", "style", "header", "footer", "nav", "aside"];

/// How far into the document a `<meta>` charset declaration is looked for.
const META_SNIFF_BYTES: usize = 4096;

static CHARSET_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?\s*([A-Za-z0-9_:.-]+)"#)
        .expect("Failed to parse charset pattern")
});

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_:.-]+)"#)
        .expect("Failed to parse meta charset pattern")
});

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

pub struct PageExtractor {
    http_client: reqwest::Client,
}

impl PageExtractor {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Fetches `url` and returns its title and visible text.
    ///
    /// Every network or HTTP failure is reported as
    /// [`AppError::ContentUnavailable`], as is a page without readable text.
    pub async fn extract(&self, url: &str) -> Result<ExtractedContent, AppError> {
        tracing::info!("Fetching content from {}", url);

        let html = self.fetch_html(url).await?;
        let content = Self::extract_from_html(&html);

        if content.is_empty() {
            tracing::warn!("No readable text found at {}", url);
            return Err(AppError::ContentUnavailable(
                "page has no readable text".to_string(),
            ));
        }

        tracing::info!(
            "Extracted {} chars from {} ({})",
            content.body_text.chars().count(),
            url,
            content.title
        );
        Ok(content)
    }

    async fn fetch_html(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .http_client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "ja,en-US;q=0.8,en;q=0.7")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {}", url, e);
                AppError::ContentUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} returned {}", url, status);
            return Err(AppError::ContentUnavailable(format!("HTTP {}", status)));
        }

        let header_charset = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| CHARSET_PARAM.captures(value))
            .map(|caps| caps[1].to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ContentUnavailable(e.to_string()))?;

        Ok(decode_html(&bytes, header_charset.as_deref()))
    }

    pub fn extract_from_html(html: &str) -> ExtractedContent {
        let document = Html::parse_document(html);

        let title = Self::extract_title(&document);
        let body_selector = Selector::parse("body").ok();
        let body = body_selector
            .as_ref()
            .and_then(|sel| document.select(sel).next())
            .unwrap_or_else(|| document.root_element());

        let mut lines = Vec::new();
        collect_text(body, &mut lines);

        ExtractedContent::new(title, lines.join("\n"))
    }

    fn extract_title(document: &Html) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }
}

/// Decodes a fetched page. The `Content-Type` charset wins, then a `<meta>`
/// declaration near the top of the document, then UTF-8. A BOM overrides all.
fn decode_html(bytes: &[u8], header_charset: Option<&str>) -> String {
    let label = header_charset.map(str::to_string).or_else(|| {
        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(META_SNIFF_BYTES)]);
        META_CHARSET.captures(&head).map(|caps| caps[1].to_string())
    });

    let encoding = label
        .as_deref()
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("Page had bytes that are not valid {}", used.name());
    }
    text.into_owned()
}

/// Collects trimmed text nodes under `root` in document order.
///
/// Uses an explicit stack so that deeply nested markup cannot exhaust the
/// thread stack.
fn collect_text(root: ElementRef<'_>, lines: &mut Vec<String>) {
    let mut stack: Vec<_> = root.children().rev().collect();

    while let Some(node) = stack.pop() {
        if let Some(text) = node.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        } else if let Some(element) = ElementRef::wrap(node) {
            if !EXCLUDED_TAGS.contains(&element.value().name()) {
                stack.extend(node.children().rev());
            }
        }
    }
}

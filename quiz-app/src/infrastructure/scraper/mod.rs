mod page_extractor;

pub use page_extractor::{PageExtractor, EXCLUDED_TAGS, FETCH_TIMEOUT_SECS};

use std::fmt;
use std::sync::Arc;

use lm_core::{Error, NewsSource, Result};

pub mod dummy;
pub mod newsapi;
pub mod pipeline;

pub use dummy::DummyNewsSource;
pub use newsapi::NewsApiClient;
pub use pipeline::{NewsPipeline, SummarizeRequest};

pub const DEFAULT_NEWS_ENDPOINT: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Clone)]
pub struct NewsConfig {
    /// `newsapi` or `dummy`.
    pub backend: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub page_size: usize,
    pub language: String,
    /// Upper bound on classifier calls in flight; 1 classifies one article at a time.
    pub classify_concurrency: usize,
}

impl fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsConfig")
            .field("backend", &self.backend)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("page_size", &self.page_size)
            .field("language", &self.language)
            .field("classify_concurrency", &self.classify_concurrency)
            .finish()
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            backend: "newsapi".to_string(),
            endpoint: DEFAULT_NEWS_ENDPOINT.to_string(),
            api_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            language: "en".to_string(),
            classify_concurrency: 1,
        }
    }
}

pub fn create_news_source(config: &NewsConfig) -> Result<Arc<dyn NewsSource>> {
    match config.backend.as_str() {
        "newsapi" => Ok(Arc::new(NewsApiClient::new(config)?)),
        "dummy" => Ok(Arc::new(DummyNewsSource::sample())),
        other => Err(Error::Config(format!("Unknown news backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::{create_news_source, NewsConfig, NewsPipeline, SummarizeRequest};
    pub use lm_core::{Article, Error, NewsSource, Result, SentimentReport};
}

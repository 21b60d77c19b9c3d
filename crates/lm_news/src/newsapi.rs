use std::fmt;

use async_trait::async_trait;
use lm_core::{Article, Error, NewsQuery, NewsSource, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::NewsConfig;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

/// Client for the NewsAPI `everything` search.
pub struct NewsApiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    page_size: usize,
    language: String,
}

impl NewsApiClient {
    pub fn new(config: &NewsConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("News API key is required".to_string()))?;
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| Error::Config(format!("Invalid news endpoint '{}': {}", config.endpoint, e)))?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key,
            page_size: config.page_size,
            language: config.language.clone(),
        })
    }

    pub fn search_url(&self, query: &NewsQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &query.ticker)
                .append_pair("pageSize", &self.page_size.to_string())
                .append_pair("language", &self.language)
                .append_pair("apiKey", &self.api_key);
            if let Some(from) = &query.from {
                pairs.append_pair("from", from);
            }
            if let Some(to) = &query.to {
                pairs.append_pair("to", to);
            }
        }
        url
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .field("language", &self.language)
            .finish()
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn search(&self, query: &NewsQuery) -> Result<Vec<Article>> {
        info!("🔍 Searching news for {}", query.ticker);
        let response = self.client.get(self.search_url(query)).send().await?;
        let status = response.status();
        let body = response.json::<SearchResponse>().await?;

        match body.articles {
            Some(mut articles) => {
                articles.truncate(self.page_size);
                info!("✨ Found {} articles for {}", articles.len(), query.ticker);
                Ok(articles)
            }
            None => {
                // Provider errors come back as `{status: "error", message}`.
                warn!(
                    "News search for {} returned no articles (HTTP {}, status {:?}): {}",
                    query.ticker,
                    status,
                    body.status,
                    body.message.unwrap_or_default()
                );
                Ok(Vec::new())
            }
        }
    }
}

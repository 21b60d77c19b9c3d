use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lm_core::{Article, NewsQuery, NewsSource, Result};

/// Offline news source serving a fixed article list.
pub struct DummyNewsSource {
    articles: Option<Vec<Article>>,
    calls: AtomicUsize,
}

impl fmt::Debug for DummyNewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyNewsSource")
            .field("articles", &self.articles.as_ref().map(Vec::len))
            .finish()
    }
}

impl DummyNewsSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles: Some(articles),
            calls: AtomicUsize::new(0),
        }
    }

    /// Three headlines built around whatever ticker is asked for.
    pub fn sample() -> Self {
        Self {
            articles: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsSource for DummyNewsSource {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn search(&self, query: &NewsQuery) -> Result<Vec<Article>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match &self.articles {
            Some(articles) => articles.clone(),
            None => {
                let ticker = &query.ticker;
                vec![
                    Article::new(
                        format!("{} shares surge after earnings beat", ticker),
                        Some("Quarterly revenue came in ahead of analyst expectations."),
                    ),
                    Article::new(
                        format!("Analysts see record growth ahead for {}", ticker),
                        Some("Several brokers raised their price targets."),
                    ),
                    Article::new(
                        format!("{} faces lawsuit over supplier contracts", ticker),
                        None,
                    ),
                ]
            }
        })
    }
}

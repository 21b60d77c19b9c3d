use std::fmt;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use lm_core::{
    Article, Error, NewsQuery, NewsSource, Result, Sentiment, SentimentClassifier, SentimentReport,
    SentimentTally, Summarizer,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::NewsConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl SummarizeRequest {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            ..Self::default()
        }
    }

    /// Validates the ticker and builds the news query.
    pub fn into_query(self) -> Result<NewsQuery> {
        let ticker = self
            .ticker
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Validation("Ticker required".to_string()))?;
        Ok(NewsQuery::new(ticker, self.from, self.to))
    }
}

/// Fetches news for a ticker, scores each article and summarizes the set.
pub struct NewsPipeline {
    news: Arc<dyn NewsSource>,
    classifier: Arc<dyn SentimentClassifier>,
    summarizer: Arc<dyn Summarizer>,
    max_articles: usize,
    concurrency: usize,
}

impl fmt::Debug for NewsPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsPipeline")
            .field("news", &self.news.name())
            .field("classifier", &self.classifier.name())
            .field("summarizer", &self.summarizer.name())
            .field("max_articles", &self.max_articles)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl NewsPipeline {
    pub fn new(
        news: Arc<dyn NewsSource>,
        classifier: Arc<dyn SentimentClassifier>,
        summarizer: Arc<dyn Summarizer>,
        config: &NewsConfig,
    ) -> Self {
        Self {
            news,
            classifier,
            summarizer,
            max_articles: config.page_size,
            concurrency: config.classify_concurrency.max(1),
        }
    }

    pub async fn run(&self, request: SummarizeRequest) -> Result<SentimentReport> {
        self.run_query(request.into_query()?).await
    }

    pub async fn run_query(&self, query: NewsQuery) -> Result<SentimentReport> {
        let mut articles = self.news.search(&query).await?;
        articles.truncate(self.max_articles);

        if articles.is_empty() {
            info!("📭 No news found for {}", query.ticker);
            return Ok(SentimentReport::no_news(&query.ticker));
        }

        info!("📰 Scoring {} articles for {}", articles.len(), query.ticker);
        let tally = self.classify_all(&mut articles).await;
        info!(
            "📊 {}: {} positive, {} negative, {} neutral",
            query.ticker, tally.positive, tally.negative, tally.neutral
        );

        let summary = self.summarize(&articles).await;

        Ok(SentimentReport {
            summary,
            sentiment: tally.majority().symbol().to_string(),
            key_points: articles.iter().map(|a| a.title.clone()).collect(),
            chart_data: tally.chart_data(),
            articles,
        })
    }

    /// Attaches a sentiment to every article, keeping article order.
    async fn classify_all(&self, articles: &mut [Article]) -> SentimentTally {
        let texts: Vec<String> = articles.iter().map(Article::classification_text).collect();
        let classifier = self.classifier.as_ref();

        let sentiments: Vec<Sentiment> = stream::iter(texts)
            .map(|text| async move { classify_or_neutral(classifier, &text).await })
            .buffered(self.concurrency)
            .collect()
            .await;

        for (article, sentiment) in articles.iter_mut().zip(&sentiments) {
            article.sentiment = Some(*sentiment);
        }
        sentiments.into_iter().collect()
    }

    async fn summarize(&self, articles: &[Article]) -> String {
        let context = summary_context(articles);
        info!("🤖 Summarizing {} articles with {}", articles.len(), self.summarizer.name());
        match self.summarizer.summarize(&context).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("⚠️ Summarizer failed, leaving summary empty: {}", e);
                String::new()
            }
        }
    }
}

async fn classify_or_neutral(classifier: &dyn SentimentClassifier, text: &str) -> Sentiment {
    match classifier.classify(text).await {
        Ok(sentiment) => sentiment,
        Err(e) => {
            warn!("⚠️ Classifier failed, treating article as neutral: {}", e);
            Sentiment::Neutral
        }
    }
}

/// One `Article <n>: <title>. <description>` line per article.
pub fn summary_context(articles: &[Article]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(i, a)| {
            format!(
                "Article {}: {}. {}",
                i + 1,
                a.title,
                a.description.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

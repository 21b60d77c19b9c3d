use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::sentiment::Sentiment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
}

/// A news article as returned by the search provider.
///
/// Only the fields the pipeline reads are typed; everything else the
/// provider sent is kept in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Kept as the provider wrote it; formats vary between sources.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    pub fn new(title: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            title: title.into(),
            description: description.map(str::to_string),
            published_at: None,
            sentiment: None,
            extra: Map::new(),
        }
    }

    /// Text handed to the sentiment classifier.
    pub fn classification_text(&self) -> String {
        format!("{} {}", self.title, self.description.as_deref().unwrap_or(""))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub ticker: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl NewsQuery {
    /// Builds a query, treating blank dates as absent.
    pub fn new(ticker: impl Into<String>, from: Option<String>, to: Option<String>) -> Self {
        let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        Self {
            ticker: ticker.into(),
            from: non_blank(from),
            to: non_blank(to),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub name: String,
    pub value: usize,
}

impl ChartDatum {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self { name: name.into(), value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReport {
    pub summary: String,
    pub sentiment: String,
    pub key_points: Vec<String>,
    pub articles: Vec<Article>,
    pub chart_data: Vec<ChartDatum>,
}

impl SentimentReport {
    pub fn no_news(ticker: &str) -> Self {
        Self {
            summary: format!("No news found for {}", ticker),
            sentiment: Sentiment::Neutral.symbol().to_string(),
            key_points: Vec::new(),
            articles: Vec::new(),
            chart_data: Vec::new(),
        }
    }
}

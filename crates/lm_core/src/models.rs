use async_trait::async_trait;
use std::fmt;

use crate::sentiment::Sentiment;
use crate::Result;

#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Runs one non-streaming completion and returns the raw model text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classifies a piece of text.
    async fn classify(&self, text: &str) -> Result<Sentiment>;
}

#[async_trait]
pub trait Summarizer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Condenses a block of text. An empty string means no summary was produced.
    async fn summarize(&self, text: &str) -> Result<String>;
}

use async_trait::async_trait;
use lm_core::{map_label, Error, Result, Sentiment, SentimentClassifier, Summarizer};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use url::Url;

use super::join_url;
use crate::Config;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// One hosted model on the Hugging Face inference API.
struct InferenceEndpoint {
    client: Client,
    url: Url,
    api_key: String,
}

impl InferenceEndpoint {
    fn new(config: &Config, model: &str) -> Result<Self> {
        let api_key = config
            .hf_api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("Hugging Face API key is required".to_string()))?;
        Ok(Self {
            client: Client::new(),
            url: join_url(&config.hf_base_url, model)?,
            api_key,
        })
    }

    async fn infer(&self, inputs: &str) -> Result<Value> {
        let response = self.client
            .post(self.url.clone())
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Inference API error {} from {}: {}",
                status.as_u16(),
                self.url,
                body
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}

impl fmt::Debug for InferenceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceEndpoint")
            .field("client", &"<reqwest::Client>")
            .field("url", &self.url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Picks the highest-scoring label from a text-classification reply.
///
/// The API answers either `[[{label, score}, ...]]` or `[{label, score}, ...]`.
/// On equal scores the later entry wins.
pub fn best_label(output: &Value) -> Option<&str> {
    let candidates = match output.get(0) {
        Some(Value::Array(inner)) => inner,
        _ => output.as_array()?,
    };

    let score = |v: &Value| v.get("score").and_then(Value::as_f64).unwrap_or(f64::NEG_INFINITY);
    let best = candidates
        .iter()
        .reduce(|a, b| if score(a) > score(b) { a } else { b })?;
    Some(best.get("label").and_then(Value::as_str).unwrap_or(""))
}

/// Extracts `summary_text` from a summarization reply, if present.
pub fn summary_text(output: &Value) -> Option<&str> {
    output.get(0)?.get("summary_text")?.as_str()
}

#[derive(Debug)]
pub struct HuggingFaceClassifier {
    endpoint: InferenceEndpoint,
}

impl HuggingFaceClassifier {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            endpoint: InferenceEndpoint::new(config, &config.sentiment_model)?,
        })
    }
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        let output = self.endpoint.infer(text).await?;
        let label = best_label(&output)
            .ok_or_else(|| Error::Inference(format!("Unexpected classifier output: {}", output)))?;
        tracing::debug!("Classifier label {:?}", label);
        Ok(map_label(label))
    }
}

#[derive(Debug)]
pub struct HuggingFaceSummarizer {
    endpoint: InferenceEndpoint,
}

impl HuggingFaceSummarizer {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            endpoint: InferenceEndpoint::new(config, &config.summarizer_model)?,
        })
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let output = self.endpoint.infer(text).await?;
        Ok(summary_text(&output).unwrap_or_default().to_string())
    }
}

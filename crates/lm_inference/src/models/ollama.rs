use async_trait::async_trait;
use lm_core::{Error, Result, TextGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use super::join_url;
use crate::Config;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

pub struct OllamaGenerator {
    client: Client,
    endpoint: Url,
    model: String,
}

impl OllamaGenerator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            endpoint: join_url(&config.ollama_url, "api/generate")?,
            model: config.model_name.clone(),
        })
    }
}

impl fmt::Debug for OllamaGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaGenerator")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        tracing::debug!("Sending {} byte prompt to {} ({})", prompt.len(), self.endpoint, self.model);
        let response = self.client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned {}: {}", status, body);
            return Err(Error::Upstream(format!("Ollama error {}: {}", status.as_u16(), body)));
        }

        let body = response.json::<GenerateResponse>().await?;
        Ok(body.response.unwrap_or_default())
    }
}

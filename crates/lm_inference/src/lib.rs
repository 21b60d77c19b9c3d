use std::fmt;

pub mod models;
pub mod study;

pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
pub const DEFAULT_MODEL_NAME: &str = "llama3";
pub const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment";
pub const DEFAULT_SUMMARIZER_MODEL: &str = "facebook/bart-large-cnn";

#[derive(Clone)]
pub struct Config {
    /// `ollama` or `dummy`.
    pub generator_backend: String,
    pub ollama_url: String,
    pub model_name: String,
    /// `huggingface` or `dummy`.
    pub hosted_backend: String,
    pub hf_base_url: String,
    pub hf_api_key: Option<String>,
    pub sentiment_model: String,
    pub summarizer_model: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("generator_backend", &self.generator_backend)
            .field("ollama_url", &self.ollama_url)
            .field("model_name", &self.model_name)
            .field("hosted_backend", &self.hosted_backend)
            .field("hf_base_url", &self.hf_base_url)
            .field("hf_api_key", &self.hf_api_key.as_deref().map(|_| "<redacted>"))
            .field("sentiment_model", &self.sentiment_model)
            .field("summarizer_model", &self.summarizer_model)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator_backend: "ollama".to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            hosted_backend: "huggingface".to_string(),
            hf_base_url: DEFAULT_HF_BASE_URL.to_string(),
            hf_api_key: None,
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            summarizer_model: DEFAULT_SUMMARIZER_MODEL.to_string(),
        }
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::{create_classifier, create_generator, create_summarizer};
    pub use super::study::{StudyGenerator, StudyTask};
    pub use lm_core::{Error, Result, SentimentClassifier, Summarizer, TextGenerator};
}

pub use models::{create_classifier, create_generator, create_summarizer};
pub use study::{StudyGenerator, StudyTask};

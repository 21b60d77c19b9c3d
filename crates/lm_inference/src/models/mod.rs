use std::sync::Arc;

use lm_core::{Error, Result, SentimentClassifier, Summarizer, TextGenerator};
use url::Url;

use crate::Config;

pub mod dummy;
pub mod huggingface;
pub mod ollama;

pub use dummy::{DummyClassifier, DummyGenerator, DummySummarizer};
pub use huggingface::{HuggingFaceClassifier, HuggingFaceSummarizer};
pub use ollama::OllamaGenerator;

pub fn create_generator(config: &Config) -> Result<Arc<dyn TextGenerator>> {
    match config.generator_backend.as_str() {
        "ollama" => Ok(Arc::new(OllamaGenerator::new(config)?)),
        "dummy" => Ok(Arc::new(DummyGenerator::new())),
        other => Err(Error::Config(format!("Unknown generator backend: {}", other))),
    }
}

pub fn create_classifier(config: &Config) -> Result<Arc<dyn SentimentClassifier>> {
    match config.hosted_backend.as_str() {
        "huggingface" => Ok(Arc::new(HuggingFaceClassifier::new(config)?)),
        "dummy" => Ok(Arc::new(DummyClassifier::new())),
        other => Err(Error::Config(format!("Unknown hosted backend: {}", other))),
    }
}

pub fn create_summarizer(config: &Config) -> Result<Arc<dyn Summarizer>> {
    match config.hosted_backend.as_str() {
        "huggingface" => Ok(Arc::new(HuggingFaceSummarizer::new(config)?)),
        "dummy" => Ok(Arc::new(DummySummarizer::new())),
        other => Err(Error::Config(format!("Unknown hosted backend: {}", other))),
    }
}

/// Resolves `path` below `base`, keeping any path prefix `base` already has.
pub(crate) fn join_url(base: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(base)
        .map_err(|e| Error::Config(format!("Invalid URL '{}': {}", base, e)))?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| Error::Config(format!("Invalid URL path '{}': {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://127.0.0.1:11434", "api/generate").unwrap().as_str(),
            "http://127.0.0.1:11434/api/generate"
        );
        assert_eq!(
            join_url("https://api-inference.huggingface.co/models", "facebook/bart-large-cnn")
                .unwrap()
                .as_str(),
            "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
        );
        assert_eq!(
            join_url("http://proxy.local/ollama/", "/api/generate").unwrap().as_str(),
            "http://proxy.local/ollama/api/generate"
        );
        assert!(join_url("not a url", "api/generate").is_err());
    }

    #[test]
    fn test_factories() {
        let dummy = Config {
            generator_backend: "dummy".to_string(),
            hosted_backend: "dummy".to_string(),
            ..Config::default()
        };
        assert_eq!(create_generator(&dummy).unwrap().name(), "Dummy");
        assert_eq!(create_classifier(&dummy).unwrap().name(), "Dummy");
        assert_eq!(create_summarizer(&dummy).unwrap().name(), "Dummy");

        let live = Config::default();
        assert_eq!(create_generator(&live).unwrap().name(), "Ollama");
        // Hosted models need a key.
        assert!(create_classifier(&live).is_err());
        assert!(create_summarizer(&live).is_err());

        let unknown = Config {
            generator_backend: "gpt".to_string(),
            ..Config::default()
        };
        assert!(matches!(create_generator(&unknown), Err(Error::Config(_))));
    }
}

use clap::Args;
use lm_inference::{
    create_classifier, create_summarizer, DEFAULT_HF_BASE_URL, DEFAULT_MODEL_NAME,
    DEFAULT_OLLAMA_URL, DEFAULT_SENTIMENT_MODEL, DEFAULT_SUMMARIZER_MODEL,
};
use lm_news::{create_news_source, NewsConfig, NewsPipeline, DEFAULT_NEWS_ENDPOINT, DEFAULT_PAGE_SIZE};

/// Service settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    #[arg(long, default_value = "ollama", help = "Text generator: ollama (default) or dummy")]
    pub model: String,
    #[arg(long, env = "OLLAMA_URL", default_value = DEFAULT_OLLAMA_URL)]
    pub ollama_url: String,
    #[arg(long, env = "OLLAMA_MODEL", default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    #[arg(long, default_value = "huggingface", help = "Sentiment and summary models: huggingface (default) or dummy")]
    pub hosted: String,
    #[arg(long, env = "HF_BASE_URL", default_value = DEFAULT_HF_BASE_URL)]
    pub hf_base_url: String,
    #[arg(long, env = "HF_API_KEY", hide_env_values = true)]
    pub hf_api_key: Option<String>,
    #[arg(long, default_value = DEFAULT_SENTIMENT_MODEL)]
    pub sentiment_model: String,
    #[arg(long, default_value = DEFAULT_SUMMARIZER_MODEL)]
    pub summarizer_model: String,

    #[arg(long, default_value = "newsapi", help = "News search: newsapi (default) or dummy")]
    pub news: String,
    #[arg(long, env = "NEWS_API_URL", default_value = DEFAULT_NEWS_ENDPOINT)]
    pub news_url: String,
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub max_articles: usize,
    #[arg(long, default_value_t = 1, help = "Sentiment calls allowed in flight at once")]
    pub classify_concurrency: usize,
}

impl Settings {
    pub fn inference_config(&self) -> lm_inference::Config {
        lm_inference::Config {
            generator_backend: self.model.clone(),
            ollama_url: self.ollama_url.clone(),
            model_name: self.model_name.clone(),
            hosted_backend: self.hosted.clone(),
            hf_base_url: self.hf_base_url.clone(),
            hf_api_key: self.hf_api_key.clone(),
            sentiment_model: self.sentiment_model.clone(),
            summarizer_model: self.summarizer_model.clone(),
        }
    }

    pub fn news_config(&self) -> NewsConfig {
        NewsConfig {
            backend: self.news.clone(),
            endpoint: self.news_url.clone(),
            api_key: self.news_api_key.clone(),
            page_size: self.max_articles,
            classify_concurrency: self.classify_concurrency,
            ..NewsConfig::default()
        }
    }

    pub fn news_pipeline(&self) -> lm_core::Result<NewsPipeline> {
        let inference = self.inference_config();
        let news = self.news_config();
        Ok(NewsPipeline::new(
            create_news_source(&news)?,
            create_classifier(&inference)?,
            create_summarizer(&inference)?,
            &news,
        ))
    }
}

use lm_core::{Error, Result};
use lm_inference::StudyGenerator;
use lm_news::NewsPipeline;

pub struct AppState {
    pub study: StudyGenerator,
    /// Absent when the news or hosted-model credentials were not configured.
    pub news: Option<NewsPipeline>,
}

impl AppState {
    pub fn new(study: StudyGenerator, news: Option<NewsPipeline>) -> Self {
        Self { study, news }
    }

    pub fn news(&self) -> Result<&NewsPipeline> {
        self.news.as_ref().ok_or_else(|| {
            Error::Config("news summaries need NEWS_API_KEY and HF_API_KEY to be set".to_string())
        })
    }
}

use std::fmt;
use std::sync::Arc;

use lm_core::{extract_json, Error, Flashcard, QuizQuestion, Result, TextGenerator};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

mod prompts;

/// The kinds of study material the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyTask {
    Flashcards,
    Quiz,
}

impl StudyTask {
    /// Top-level key of the JSON object the model is asked for.
    pub fn key(&self) -> &'static str {
        match self {
            StudyTask::Flashcards => "flashcards",
            StudyTask::Quiz => "quiz",
        }
    }

    pub fn required_message(&self) -> &'static str {
        match self {
            StudyTask::Flashcards => "Notes are required",
            StudyTask::Quiz => "Text is required",
        }
    }

    pub fn prompt(&self, text: &str) -> String {
        match self {
            StudyTask::Flashcards => prompts::flashcards(text),
            StudyTask::Quiz => prompts::quiz(text),
        }
    }

    /// A single synthetic item carrying the raw model text unchanged.
    pub fn fallback(&self, raw: &str) -> Value {
        match self {
            StudyTask::Flashcards => {
                let card = Flashcard {
                    front: "Generated from your notes".to_string(),
                    back: if raw.is_empty() { "No response" } else { raw }.to_string(),
                };
                json!({ "flashcards": [card] })
            }
            StudyTask::Quiz => {
                let question = QuizQuestion {
                    question: "What is the main topic of the provided text?".to_string(),
                    options: ["Topic A", "Topic B", "Topic C", "Topic D"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    correct: 0,
                    explanation: if raw.is_empty() { "Generated from your text" } else { raw }
                        .to_string(),
                };
                json!({ "quiz": [question] })
            }
        }
    }

    /// Turns raw model text into the response payload.
    ///
    /// A parsed object is returned as-is when its envelope key holds an
    /// array; items inside it are not checked. Anything else falls back.
    pub fn parse_output(&self, raw: &str) -> Value {
        match extract_json(raw) {
            Ok(value) if value.get(self.key()).map_or(false, Value::is_array) => value,
            Ok(_) => {
                warn!("Model output has no '{}' array, using fallback", self.key());
                self.fallback(raw)
            }
            Err(e) => {
                warn!("Could not parse model output as JSON: {}", e);
                self.fallback(raw)
            }
        }
    }

    /// Returns the trimmed input, or a validation error when there is none.
    pub fn validate<'a>(&self, text: Option<&'a str>) -> Result<&'a str> {
        match text.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(Error::Validation(self.required_message().to_string())),
        }
    }
}

impl fmt::Display for StudyTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub struct StudyGenerator {
    model: Arc<dyn TextGenerator>,
}

impl fmt::Debug for StudyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudyGenerator")
            .field("model", &self.model.name())
            .finish()
    }
}

impl StudyGenerator {
    pub fn new(model: Arc<dyn TextGenerator>) -> Self {
        Self { model }
    }

    pub async fn generate(&self, task: StudyTask, text: Option<&str>) -> Result<Value> {
        let text = task.validate(text)?;
        info!("📝 Generating {} from {} chars with {}", task, text.len(), self.model.name());

        let raw = self.model.generate(&task.prompt(text)).await?;
        debug!("Raw {} output: {}", task, raw);

        Ok(task.parse_output(&raw))
    }

    pub async fn flashcards(&self, notes: Option<&str>) -> Result<Value> {
        self.generate(StudyTask::Flashcards, notes).await
    }

    pub async fn quiz(&self, text: Option<&str>) -> Result<Value> {
        self.generate(StudyTask::Quiz, text).await
    }
}

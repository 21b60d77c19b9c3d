use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lm_core::{map_label, Error, Result, Sentiment, SentimentClassifier, Summarizer, TextGenerator};
use serde_json::json;

const POSITIVE_WORDS: &[&str] = &["beat", "surge", "gain", "record", "rally", "soar", "upgrade", "growth"];
const NEGATIVE_WORDS: &[&str] = &["fall", "drop", "miss", "loss", "plunge", "downgrade", "cut", "lawsuit"];

/// Offline text generator.
///
/// Without a scripted reply it builds a well-formed answer from the text at
/// the end of the prompt, so the study endpoints work with no model running.
#[derive(Default)]
pub struct DummyGenerator {
    reply: Option<String>,
    fail: bool,
    calls: AtomicUsize,
}

impl fmt::Debug for DummyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyGenerator").finish()
    }
}

impl DummyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answers with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn compose(prompt: &str) -> String {
        let source = prompt
            .rsplit_once("\n\nNotes: ")
            .or_else(|| prompt.rsplit_once("\n\nText: "))
            .map(|(_, text)| text)
            .unwrap_or(prompt);
        let sentences: Vec<&str> = source
            .split(|c| c == '.' || c == '!' || c == '?' || c == '\n')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(6)
            .collect();

        if prompt.contains("\"flashcards\"") {
            let cards: Vec<_> = sentences
                .iter()
                .map(|s| {
                    let front: Vec<&str> = s.split_whitespace().take(4).collect();
                    json!({ "front": front.join(" "), "back": s })
                })
                .collect();
            json!({ "flashcards": cards }).to_string()
        } else {
            let questions: Vec<_> = sentences
                .iter()
                .map(|s| {
                    json!({
                        "question": "Which statement appears in the text?",
                        "options": [s, "None of the above", "All of the above", "It is not stated"],
                        "correct": 0,
                        "explanation": format!("The text says: {}", s)
                    })
                })
                .collect();
            json!({ "quiz": questions }).to_string()
        }
    }
}

#[async_trait]
impl TextGenerator for DummyGenerator {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Upstream("Dummy generator failure".to_string()));
        }
        Ok(self.reply.clone().unwrap_or_else(|| Self::compose(prompt)))
    }
}

/// Keyword-based classifier that answers with the hosted model's label scheme.
#[derive(Default)]
pub struct DummyClassifier {
    fail: bool,
    calls: AtomicUsize,
}

impl fmt::Debug for DummyClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyClassifier").finish()
    }
}

impl DummyClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn label(text: &str) -> &'static str {
        let text = text.to_lowercase();
        let hits = |words: &[&str]| words.iter().filter(|w| text.contains(*w)).count();
        let (positive, negative) = (hits(POSITIVE_WORDS), hits(NEGATIVE_WORDS));
        if positive > negative {
            "LABEL_2"
        } else if negative > positive {
            "LABEL_0"
        } else {
            "LABEL_1"
        }
    }
}

#[async_trait]
impl SentimentClassifier for DummyClassifier {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Upstream("Dummy classifier failure".to_string()));
        }
        Ok(map_label(Self::label(text)))
    }
}

/// Summarizer that keeps the first 20 words.
#[derive(Default)]
pub struct DummySummarizer {
    fail: bool,
    calls: AtomicUsize,
}

impl fmt::Debug for DummySummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummySummarizer").finish()
    }
}

impl DummySummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for DummySummarizer {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Upstream("Dummy summarizer failure".to_string()));
        }
        let words: Vec<&str> = text.split_whitespace().take(20).collect();
        Ok(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::StudyTask;
    use lm_core::extract_json;

    #[tokio::test]
    async fn test_dummy_generator_composes_flashcards() {
        let model = DummyGenerator::new();
        let prompt = StudyTask::Flashcards.prompt("Mitochondria make ATP. Ribosomes build proteins.");
        let reply = model.generate(&prompt).await.unwrap();

        let value = extract_json(&reply).unwrap();
        let cards = value["flashcards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["back"], "Mitochondria make ATP");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_dummy_generator_composes_quiz() {
        let model = DummyGenerator::new();
        let prompt = StudyTask::Quiz.prompt("The Nile is long. The Sahara is dry.");
        let value = extract_json(&model.generate(&prompt).await.unwrap()).unwrap();

        let quiz = value["quiz"].as_array().unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[1]["options"][0], "The Sahara is dry");
        assert_eq!(quiz[1]["correct"], 0);
    }

    #[tokio::test]
    async fn test_dummy_generator_scripted_and_failing() {
        let model = DummyGenerator::with_reply("no json here");
        assert_eq!(model.generate("anything").await.unwrap(), "no json here");

        let model = DummyGenerator::failing();
        assert!(model.generate("anything").await.is_err());
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_dummy_classifier() {
        let model = DummyClassifier::new();
        assert_eq!(model.classify("Apple shares surge to record").await.unwrap(), Sentiment::Positive);
        assert_eq!(model.classify("Tesla stock plunge after miss").await.unwrap(), Sentiment::Negative);
        assert_eq!(model.classify("Company holds annual meeting").await.unwrap(), Sentiment::Neutral);
        assert_eq!(model.calls(), 3);

        assert!(DummyClassifier::failing().classify("surge").await.is_err());
    }

    #[tokio::test]
    async fn test_dummy_summarizer() {
        let model = DummySummarizer::new();
        let text = (1..=30).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let summary = model.summarize(&text).await.unwrap();
        assert_eq!(summary.split_whitespace().count(), 20);
        assert!(DummySummarizer::failing().summarize("x").await.is_err());
    }
}

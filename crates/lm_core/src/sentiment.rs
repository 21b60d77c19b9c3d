use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::ChartDatum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn name(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Display form used in reports, e.g. `✅ Positive`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Sentiment::Positive => "✅ Positive",
            Sentiment::Negative => "❌ Negative",
            Sentiment::Neutral => "⚠️ Neutral",
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::Neutral
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a raw classifier label onto a [`Sentiment`].
///
/// Matching is case-insensitive. Negative rules are checked first, and any
/// label that matches neither rule is neutral.
pub fn map_label(label: &str) -> Sentiment {
    let label = label.to_ascii_uppercase();
    if label.contains("NEGATIVE") || label.contains("LABEL_0") {
        Sentiment::Negative
    } else if label.contains("POSITIVE") || label.contains("LABEL_2") {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Strict majority vote; any tie for first place is neutral.
    pub fn majority(&self) -> Sentiment {
        if self.positive > self.negative && self.positive > self.neutral {
            Sentiment::Positive
        } else if self.negative > self.positive && self.negative > self.neutral {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn chart_data(&self) -> Vec<ChartDatum> {
        vec![
            ChartDatum::new(Sentiment::Positive.name(), self.positive),
            ChartDatum::new(Sentiment::Negative.name(), self.negative),
            ChartDatum::new(Sentiment::Neutral.name(), self.neutral),
        ]
    }
}

impl FromIterator<Sentiment> for SentimentTally {
    fn from_iter<I: IntoIterator<Item = Sentiment>>(iter: I) -> Self {
        let mut tally = Self::new();
        for sentiment in iter {
            tally.record(sentiment);
        }
        tally
    }
}

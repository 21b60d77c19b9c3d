pub mod error;
pub mod extract;
pub mod models;
pub mod news;
pub mod sentiment;
pub mod types;

pub use error::Error;
pub use extract::{extract_json, ExtractError};
pub use models::{SentimentClassifier, Summarizer, TextGenerator};
pub use news::NewsSource;
pub use sentiment::{map_label, Sentiment, SentimentTally};
pub use types::{Article, ChartDatum, Flashcard, NewsQuery, QuizQuestion, SentimentReport};

pub type Result<T> = std::result::Result<T, Error>;

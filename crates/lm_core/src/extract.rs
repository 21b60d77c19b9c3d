use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoObject,

    #[error("model output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

fn object_span() -> &'static Regex {
    static SPAN: OnceLock<Regex> = OnceLock::new();
    // Greedy: first `{` through the last `}` in the text.
    SPAN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static pattern"))
}

/// Pulls the JSON object embedded in free-form model output.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    let span = object_span().find(text).ok_or(ExtractError::NoObject)?;
    Ok(serde_json::from_str(span.as_str())?)
}

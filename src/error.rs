// Error taxonomy for the detection core
// Every component returns these; the scorer turns them into the neutral report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("span {start}..{end} is out of bounds for text of {len} bytes")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("feature `{name}` is not finite")]
    NonFiniteFeature { name: &'static str },

    #[error("training failed: {0}")]
    Training(String),

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error("model persistence failed: {0}")]
    Persistence(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = DetectionError> = std::result::Result<T, E>;

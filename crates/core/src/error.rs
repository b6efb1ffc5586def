use plaudit_types::{RatingError, TextError};

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error("invalid feedback id: {0}")]
    InvalidId(String),
}

pub type FeedbackResult<T> = std::result::Result<T, FeedbackError>;

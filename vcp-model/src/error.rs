use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownCategory(String),
    InvalidVideoId(String),
    InvalidUrl(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownCategory(raw) => {
                write!(f, "unknown ranking category: {raw}")
            }
            ModelError::InvalidVideoId(raw) => {
                write!(f, "invalid video id: {raw:?}")
            }
            ModelError::InvalidUrl(msg) => write!(f, "invalid url: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<url::ParseError> for ModelError {
    fn from(err: url::ParseError) -> Self {
        ModelError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

//! Error types for the fortune service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FortuneError>;

#[derive(Error, Debug)]
pub enum FortuneError {
    #[error("Fortune not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Secondary store error: {0}")]
    SecondaryStore(String),
}

impl From<serde_json::Error> for FortuneError {
    fn from(e: serde_json::Error) -> Self {
        FortuneError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: FortuneError = err.into();
        assert!(matches!(err, FortuneError::Serialization(_)));
    }

    #[test]
    fn test_display() {
        let err = FortuneError::NotFound("42".to_string());
        assert_eq!(err.to_string(), "Fortune not found: 42");
    }
}

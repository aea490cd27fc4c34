//! Error types for snortstamper.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChapterError {
    // Input errors
    #[error("Transcript is empty")]
    EmptyTranscript,

    #[error("Malformed timestamp: {token}")]
    MalformedTimestamp { token: String },

    // Generation model errors
    #[error("Generation API error ({status}): {body}")]
    GenerationApi { status: u16, body: String },

    #[error("Generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChapterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_malformed_timestamp_display() {
        let error = ChapterError::MalformedTimestamp {
            token: "1:xx".to_string(),
        };
        assert_eq!(error.to_string(), "Malformed timestamp: 1:xx");
    }

    #[test]
    fn test_generation_api_display() {
        let error = ChapterError::GenerationApi {
            status: 404,
            body: "model 'mistral' not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Generation API error (404): model 'mistral' not found"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing.txt");
        let error: ChapterError = io_error.into();
        assert!(matches!(error, ChapterError::Io(_)));
        assert!(error.to_string().contains("missing.txt"));
    }
}

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EduError {
    #[error("Invalid YouTube URL: {url}")]
    InvalidUrl { url: String },

    #[error("Invalid playlist URL: {url}")]
    InvalidPlaylistUrl { url: String },

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid model API response: {reason}")]
    InvalidModelResponse { reason: String },

    #[error("Failed to parse AI response: {reason}")]
    FailedToParseResponse { reason: String },

    #[error("Invalid summary structure: {reason}")]
    InvalidSummaryStructure { reason: String },

    #[error("Invalid quiz structure: {reason}")]
    InvalidQuizStructure { reason: String },

    #[error("Invalid question structure at index {index}: {defect}")]
    InvalidQuestionStructure { index: usize, defect: QuestionDefect },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// What made a single quiz question unacceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionDefect {
    /// The set ended before ten questions.
    Missing,
    /// The set holds more than ten questions.
    Unexpected,
    NotAnObject,
    MissingId,
    /// The id was already used by an earlier question.
    DuplicateId { id: u32 },
    MissingText,
    Options { found: Option<usize> },
    CorrectAnswer,
}

impl fmt::Display for QuestionDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionDefect::Missing => write!(f, "question is missing, expected 10 questions"),
            QuestionDefect::Unexpected => write!(f, "unexpected question, expected 10 questions"),
            QuestionDefect::NotAnObject => write!(f, "question is not an object"),
            QuestionDefect::MissingId => write!(f, "missing or empty id"),
            QuestionDefect::DuplicateId { id } => write!(f, "duplicate question id {}", id),
            QuestionDefect::MissingText => write!(f, "missing or empty text"),
            QuestionDefect::Options { found: Some(n) } => {
                write!(f, "expected 4 string options, got {}", n)
            }
            QuestionDefect::Options { found: None } => write!(f, "options is not an array"),
            QuestionDefect::CorrectAnswer => {
                write!(f, "correctAnswer must be an integer between 0 and 3")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EduError>;

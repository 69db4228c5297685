use thiserror::Error;

/// Failures of a single answer request.
///
/// All variants are terminal for the current submission; nothing is retried.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("An error occurred while fetching the answer: {source}")]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    #[error("An error occurred while fetching the answer: HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("An error occurred while fetching the answer: {message}")]
    Api { message: String },

    #[error("An error occurred while fetching the answer: no response within {seconds}s")]
    RequestTimeout { seconds: u64 },

    #[error("An error occurred while fetching the answer: no data received for {seconds}s")]
    IdleTimeout { seconds: u64 },

    #[error("An error occurred while fetching the answer: malformed response ({reason})")]
    Decode { reason: String },

    #[error("An error occurred while fetching the answer: the response contained no text")]
    MissingText,
}

impl From<reqwest::Error> for AnswerError {
    fn from(source: reqwest::Error) -> Self {
        AnswerError::Connection { source }
    }
}

impl AnswerError {
    /// Short machine-friendly kind for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AnswerError::Connection { .. } => "connection",
            AnswerError::Status { .. } => "status",
            AnswerError::Api { .. } => "api",
            AnswerError::RequestTimeout { .. } => "request_timeout",
            AnswerError::IdleTimeout { .. } => "idle_timeout",
            AnswerError::Decode { .. } => "decode",
            AnswerError::MissingText => "missing_text",
        }
    }
}

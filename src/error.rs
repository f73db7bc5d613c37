//! Error types
//!
//! Every failure inside a request is converted into one of these before the
//! handler picks the response status, so nothing escapes the service function.

use hyper::StatusCode;
use thiserror::Error;

/// Failures of the outbound mail transport
#[derive(Error, Debug)]
pub enum MailError {
    /// An address in the payload could not be parsed
    #[error("invalid mail address '{address}': {reason}")]
    Address { address: String, reason: String },

    /// The message could not be assembled
    #[error("failed to build message: {0}")]
    Message(String),

    /// The relay rejected the message or the connection failed
    #[error("mail transport error: {0}")]
    Transport(String),
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Message(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Startup configuration failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failures while processing a single contact submission
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("submission failed validation")]
    InvalidBody,

    #[error("mail delivery failed: {0}")]
    Delivery(#[from] MailError),
}

impl HandlerError {
    /// Status code sent to the client for this failure.
    ///
    /// Malformed JSON shares the 500 path with delivery failures.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::BodyRead(_) | Self::Json(_) | Self::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Failures of a dashboard refresh cycle
use crate::domain::dashboard::InvalidShape;
use thiserror::Error;

pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to load dashboard";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// The API answered with a non-success status.
    #[error("API {status}{}{}", status_text_suffix(.status_text), body_suffix(.body))]
    Http {
        status: u16,
        status_text: String,
        body: Option<String>,
    },

    /// The response decoded but is not a usable object.
    #[error("{0}")]
    Shape(String),

    /// Transport failure, unreadable body or malformed JSON.
    #[error("{0}")]
    Network(String),
}

impl SyncError {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

fn status_text_suffix(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!(" {}", text)
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(text) => format!(" - {}", text),
        None => String::new(),
    }
}

impl From<InvalidShape> for SyncError {
    fn from(err: InvalidShape) -> Self {
        SyncError::Shape(err.to_string())
    }
}

//! Error type for the movie API client.
//!
//! # Design
//! Every failure path collapses into [`ClientError`] so callers have a single
//! conditional to handle. The variant is the origin category; the message is
//! what a caller would log or display. No raw `reqwest::Error` escapes past
//! this boundary.

use thiserror::Error;

/// The single error channel of the movie client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A failure below the HTTP semantic layer: connect/read timeout,
    /// connection reset, premature close, or a malformed byte stream.
    #[error("transport fault: {message}")]
    Transport { message: String },

    /// The server answered with a 4xx status — the request or the requested
    /// resource is invalid.
    #[error("request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    /// The server answered with a 5xx status. The message is the raw
    /// response body, verbatim, which may be empty.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// A body could not be converted to or from the expected JSON shape.
    #[error("decode failure: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// The human-readable detail without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Transport { message }
            | ClientError::Request { message, .. }
            | ClientError::Server { message, .. }
            | ClientError::Decode { message } => message,
        }
    }

    /// Map a transport-level `reqwest::Error` to a fault, keeping the full
    /// cause chain in the message so timeouts and premature closes stay
    /// distinguishable from each other (and from decode failures).
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ClientError::Transport { message }
    }

    /// Classify a resolved non-2xx response.
    ///
    /// 4xx prefers a `message` field from a JSON body, then the raw body,
    /// then a reason derived from the status. 5xx takes the raw body
    /// verbatim, empty included.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        if status >= 500 {
            ClientError::Server {
                status,
                message: body,
            }
        } else {
            let message = request_message(status, &body);
            ClientError::Request { status, message }
        }
    }
}

fn request_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if !body.trim().is_empty() {
        return body.to_string();
    }
    match status {
        400 => "bad request".to_string(),
        404 => "not found".to_string(),
        _ => format!("client error (status {status})"),
    }
}

// Error taxonomy
//
// ConfigError is fatal at startup. ScrapeError never leaves the scrape task.
// ChatError is what the request path maps onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::config::constants::{CONTENT_BLOCKED_REPLY, INTERNAL_ERROR_MESSAGE};

/// Startup configuration failures. The process must not continue.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing credential: set {0} in the environment or .env file")]
    MissingCredential(&'static str),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read static context from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse static context: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid static context: {0}")]
    Validation(String),
}

/// Failures while fetching or parsing a scrape target.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Request-path failures, mapped once at the handler boundary.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Validation(String),

    #[error("response blocked by the model safety filter")]
    ContentBlocked,

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChatError::Validation(_) | ChatError::ContentBlocked => StatusCode::BAD_REQUEST,
            ChatError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ChatError::Validation(message) => json!({ "error": message }),
            // The blocked apology is shown to the user as a normal reply.
            ChatError::ContentBlocked => json!({ "reply": CONTENT_BLOCKED_REPLY }),
            ChatError::Internal(_) => json!({ "error": INTERNAL_ERROR_MESSAGE }),
        };
        (status, Json(body)).into_response()
    }
}

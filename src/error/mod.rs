// Error types for the ccache exporter

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("command: missing version")]
    MissingVersion,

    #[error("command: malformed version {value:?}: {source}")]
    MalformedVersion {
        value: String,
        source: semver::Error,
    },

    #[error("command: ccache exited with status {status}: {stderr}")]
    CommandFailed { status: i32, stderr: String },

    #[error("command: output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("statistics: invalid integer for field {field}: {source}")]
    InvalidInteger {
        field: String,
        source: std::num::ParseIntError,
    },

    #[error("statistics: invalid float for field {field}: {source}")]
    InvalidFloat {
        field: String,
        source: std::num::ParseFloatError,
    },

    #[error("statistics: invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("statistics: timestamp out of range: {0}")]
    TimestampOutOfRange(i64),

    #[error("size: cannot parse {value:?}: {reason}")]
    InvalidSize { value: String, reason: String },

    #[error("statistics: malformed tabular data: {0}")]
    Tsv(#[from] csv::Error),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

// Convert ExporterError to HTTP responses for Axum
impl IntoResponse for ExporterError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "message": self.to_string(),
            }
        });

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;

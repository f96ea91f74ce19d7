//! Error types for the Highspot client.

use std::fmt;
use thiserror::Error;

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, HighspotError>;

/// Fixed advisory message used when every request attempt failed to connect.
pub const CONNECTION_EXHAUSTED_MSG: &str = "The API request was unable to complete successfully \
after five consecutive connection failures. Please try again later or contact Highspot for \
further assistance.";

/// Which part of the credential pair was absent at client construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingAuth {
    /// Neither username nor password was supplied.
    Both,
    Username,
    Password,
}

impl fmt::Display for MissingAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingAuth::Both => write!(
                f,
                "The authentication data was not provided and a connection cannot be established."
            ),
            MissingAuth::Username => write!(
                f,
                "The username was not provided and a connection cannot be established."
            ),
            MissingAuth::Password => write!(
                f,
                "The password was not provided and a connection cannot be established."
            ),
        }
    }
}

/// Errors that can occur while talking to the Highspot API.
#[derive(Error, Debug)]
pub enum HighspotError {
    #[error("{0}")]
    MissingCredentials(MissingAuth),

    #[error("The value '{value}' is not valid for the '{field}' field.")]
    InvalidField { field: &'static str, value: String },

    #[error("{}", CONNECTION_EXHAUSTED_MSG)]
    ConnectionExhausted,

    /// A non-connection failure during a GET attempt; never retried.
    #[error("{kind}: {message}")]
    Request { kind: String, message: String },

    #[error("{}", unsupported_message(.0.as_deref()))]
    CurrentlyUnsupported(Option<String>),

    #[error("Data mismatch: {0}")]
    DataMismatch(String),

    #[error("The required '{0}' parameter was not provided.")]
    MissingRequiredData(String),

    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl HighspotError {
    pub(crate) fn invalid_field(field: &'static str, value: &str) -> Self {
        HighspotError::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}

fn unsupported_message(feature: Option<&str>) -> String {
    match feature {
        Some(feature) => format!("The '{}' feature is currently unsupported at this time.", feature),
        None => "This feature is currently unsupported at this time.".to_string(),
    }
}

/// Fails with [`HighspotError::MissingRequiredData`] when a required path segment is empty.
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HighspotError::MissingRequiredData(name.to_string()));
    }
    Ok(())
}

//! Transport boundary: a single authenticated GET, with connection failures
//! reported separately from every other kind of failure.

use std::fmt;
use std::sync::OnceLock;

use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::{HighspotError, Result};

/// Username/password pair sent as HTTP basic auth on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"*********")
            .finish()
    }
}

/// A response as received from the server, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    text: String,
}

impl RawResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }
}

/// Failure of a single GET attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// DNS, TCP connect or TLS handshake failure. Eligible for retry.
    #[error("ConnectError: {0}")]
    Connect(String),

    /// Anything else: timeouts, protocol errors, body read errors, bad URLs.
    #[error("{kind}: {message}")]
    Other { kind: String, message: String },
}

impl TransportError {
    pub fn other(kind: impl Into<String>, message: impl Into<String>) -> Self {
        TransportError::Other {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            return TransportError::Connect(error.to_string());
        }

        let kind = if error.is_timeout() {
            "TimeoutError"
        } else if error.is_builder() {
            "InvalidRequestError"
        } else if error.is_redirect() {
            "TooManyRedirectsError"
        } else if error.is_body() {
            "BodyError"
        } else if error.is_decode() {
            "DecodeError"
        } else if error.is_request() {
            "RequestError"
        } else {
            "HTTPError"
        };
        TransportError::other(kind, error.to_string())
    }
}

/// Blocking HTTP transport used by the client.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
        credentials: &Credentials,
        verify_tls: bool,
    ) -> std::result::Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by `reqwest::blocking`.
pub struct ReqwestTransport {
    user_agent: String,
    verified: Client,
    unverified: OnceLock<Client>,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let verified = build_client(user_agent, true).map_err(HighspotError::ClientBuild)?;
        Ok(Self {
            user_agent: user_agent.to_string(),
            verified,
            unverified: OnceLock::new(),
        })
    }

    fn client(&self, verify_tls: bool) -> std::result::Result<&Client, TransportError> {
        if verify_tls {
            return Ok(&self.verified);
        }
        if let Some(client) = self.unverified.get() {
            return Ok(client);
        }
        debug!("Building HTTP client without certificate verification");
        let client = build_client(&self.user_agent, false)?;
        Ok(self.unverified.get_or_init(|| client))
    }
}

fn build_client(user_agent: &str, verify_tls: bool) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .danger_accept_invalid_certs(!verify_tls)
        .build()
}

impl Transport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        credentials: &Credentials,
        verify_tls: bool,
    ) -> std::result::Result<RawResponse, TransportError> {
        let response = self
            .client(verify_tls)?
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()?;

        let status = response.status().as_u16();
        let text = response.text()?;
        Ok(RawResponse::new(status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new("highspot-test").unwrap()
    }

    #[test]
    fn test_credentials_debug_masks_password() {
        let creds = Credentials::new("jdoe", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("jdoe"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_raw_response_json() {
        let response = RawResponse::new(200, r#"{"name": "test", "value": 42}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["name"], "test");
        assert_eq!(value["value"], 42);
    }

    #[test]
    fn test_raw_response_json_on_text_body() {
        let response = RawResponse::new(200, "a,b,c\n1,2,3\n");
        let result: Result<serde_json::Value> = response.json();
        assert!(matches!(result, Err(HighspotError::Json(_))));
        assert_eq!(response.into_text(), "a,b,c\n1,2,3\n");
    }

    #[test]
    fn test_get_sends_basic_auth() {
        let mut server = Server::new();

        // "user:pass" base64-encoded
        let mock = server
            .mock("GET", "/me")
            .match_header("authorization", "Basic dXNlcjpwYXNz")
            .match_header("user-agent", "highspot-test")
            .with_status(200)
            .with_body(r#"{"id": "u1"}"#)
            .create();

        let response = transport()
            .get(
                &format!("{}/me", server.url()),
                &Credentials::new("user", "pass"),
                true,
            )
            .unwrap();

        mock.assert();
        assert_eq!(response.status(), 200);
        assert_eq!(response.text(), r#"{"id": "u1"}"#);
    }

    #[test]
    fn test_get_returns_error_statuses_as_responses() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/items/x/content?format=text/csv")
            .with_status(410)
            .with_body(r#"{"error": "gone"}"#)
            .create();

        let response = transport()
            .get(
                &format!("{}/items/x/content?format=text/csv", server.url()),
                &Credentials::new("user", "pass"),
                false,
            )
            .unwrap();

        mock.assert();
        assert_eq!(response.status(), 410);
    }

    #[test]
    fn test_get_connection_refused_is_connect_error() {
        // Port 1 is reserved and nothing listens on it
        let result = transport().get(
            "http://127.0.0.1:1/me",
            &Credentials::new("user", "pass"),
            true,
        );
        assert!(matches!(result, Err(TransportError::Connect(_))));
    }

    #[test]
    fn test_get_invalid_url_is_not_connect_error() {
        let result = transport().get("not a url", &Credentials::new("user", "pass"), true);
        let err = result.unwrap_err();
        assert!(!err.is_connect());
    }
}

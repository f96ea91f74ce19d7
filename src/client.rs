//! The client context shared by every endpoint, and the request executor.

use std::fmt;

use log::debug;
use serde_json::Value;

use crate::error::{HighspotError, MissingAuth, Result};
use crate::http::{Credentials, HttpClient, RawResponse, ReqwestTransport, Transport};
use crate::version;

/// Host serving the Highspot REST API.
pub const DEFAULT_HOST: &str = "api-su2.highspot.com";

/// API version used when none is given.
pub const DEFAULT_API_VERSION: &str = "0.5";

/// What a GET returned, depending on whether JSON was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Json(Value),
    Raw(RawResponse),
}

impl Response {
    /// Returns the parsed JSON, decoding a raw response if needed.
    pub fn into_json(self) -> Result<Value> {
        match self {
            Response::Json(value) => Ok(value),
            Response::Raw(raw) => raw.json(),
        }
    }

    pub fn into_raw(self) -> Result<RawResponse> {
        match self {
            Response::Raw(raw) => Ok(raw),
            Response::Json(_) => Err(HighspotError::DataMismatch(
                "expected a raw response but the body was already parsed as JSON".to_string(),
            )),
        }
    }
}

/// Authenticated connection context for the Highspot API.
///
/// Immutable once built; share it by reference across threads.
pub struct Highspot<T: Transport = ReqwestTransport> {
    base_url: String,
    credentials: Credentials,
    verify_tls: bool,
    http: HttpClient<T>,
}

impl Highspot<ReqwestTransport> {
    /// Creates a client for the default API version.
    pub fn new(username: Option<&str>, password: Option<&str>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(username) = username {
            builder = builder.username(username);
        }
        if let Some(password) = password {
            builder = builder.password(password);
        }
        builder.build()
    }

    pub fn builder() -> HighspotBuilder {
        HighspotBuilder::default()
    }
}

impl<T: Transport> Highspot<T> {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Builds the absolute URL for a relative endpoint, with exactly one `/` between them.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Performs a GET against `endpoint`, retrying connection failures.
    ///
    /// With `want_json` the body is decoded as JSON; otherwise the raw
    /// response is returned for the caller to interpret.
    #[tracing::instrument(skip(self))]
    pub fn execute_get(&self, endpoint: &str, want_json: bool, verify_tls: bool) -> Result<Response> {
        let url = self.url(endpoint);
        let response = self.http.get(&url, &self.credentials, verify_tls)?;
        if want_json {
            Ok(Response::Json(response.json()?))
        } else {
            Ok(Response::Raw(response))
        }
    }

    /// GET with the client's TLS setting, decoding the body as JSON.
    pub fn get_json(&self, endpoint: &str) -> Result<Value> {
        self.execute_get(endpoint, true, self.verify_tls)?.into_json()
    }

    /// GET with the client's TLS setting, returning the raw response.
    pub fn get_raw(&self, endpoint: &str) -> Result<RawResponse> {
        self.execute_get(endpoint, false, self.verify_tls)?.into_raw()
    }
}

impl<T: Transport> fmt::Debug for Highspot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Highspot")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("verify_tls", &self.verify_tls)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Highspot`].
#[derive(Debug, Clone, Default)]
pub struct HighspotBuilder {
    username: Option<String>,
    password: Option<String>,
    api_version: Option<String>,
    base_url: Option<String>,
    verify_tls: Option<bool>,
}

impl HighspotBuilder {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// API version used to compose the base URL (`0.5` by default).
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Replaces the composed base URL entirely; the API version is then ignored.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Default certificate verification for `get_json`/`get_raw` (enabled by default).
    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = Some(verify_tls);
        self
    }

    /// Builds a client backed by `reqwest`.
    pub fn build(self) -> Result<Highspot<ReqwestTransport>> {
        let credentials = self.credentials()?;
        let transport = ReqwestTransport::new(&version::user_agent())?;
        Ok(self.assemble(credentials, transport))
    }

    /// Builds a client over a caller-supplied transport.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<Highspot<T>> {
        let credentials = self.credentials()?;
        Ok(self.assemble(credentials, transport))
    }

    fn credentials(&self) -> Result<Credentials> {
        let username = self.username.as_deref().filter(|u| !u.is_empty());
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials::new(username, password)),
            (None, None) => Err(HighspotError::MissingCredentials(MissingAuth::Both)),
            (None, Some(_)) => Err(HighspotError::MissingCredentials(MissingAuth::Username)),
            (Some(_), None) => Err(HighspotError::MissingCredentials(MissingAuth::Password)),
        }
    }

    fn assemble<T: Transport>(self, credentials: Credentials, transport: T) -> Highspot<T> {
        let base_url = match self.base_url {
            Some(base_url) => base_url.trim_end_matches('/').to_string(),
            None => {
                let api_version = self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION);
                format!("https://{}/v{}", DEFAULT_HOST, api_version)
            }
        };
        debug!("Using Highspot API at {}", base_url);

        Highspot {
            base_url,
            credentials,
            verify_tls: self.verify_tls.unwrap_or(true),
            http: HttpClient::new(transport),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{MAX_ATTEMPTS, MockTransport, TransportError};
    use mockall::predicate::{always, eq};
    use serde_json::json;

    fn client(transport: MockTransport) -> Highspot<MockTransport> {
        Highspot::builder()
            .username("user")
            .password("pass")
            .build_with_transport(transport)
            .unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let hs = client(MockTransport::new());
        assert_eq!(hs.base_url(), "https://api-su2.highspot.com/v0.5");
        assert!(hs.verify_tls());
        assert_eq!(hs.username(), "user");
    }

    #[test]
    fn test_api_version_in_base_url() {
        let hs = Highspot::builder()
            .username("user")
            .password("pass")
            .api_version("1.0")
            .build_with_transport(MockTransport::new())
            .unwrap();
        assert_eq!(hs.base_url(), "https://api-su2.highspot.com/v1.0");
    }

    #[test]
    fn test_base_url_override_trims_trailing_slash() {
        let hs = Highspot::builder()
            .username("user")
            .password("pass")
            .base_url("http://127.0.0.1:8080/")
            .build_with_transport(MockTransport::new())
            .unwrap();
        assert_eq!(hs.url("me"), "http://127.0.0.1:8080/me");
    }

    #[test]
    fn test_missing_both_credentials() {
        let err = Highspot::builder()
            .build_with_transport(MockTransport::new())
            .unwrap_err();
        assert!(matches!(err, HighspotError::MissingCredentials(MissingAuth::Both)));
    }

    #[test]
    fn test_missing_password_only() {
        let err = Highspot::builder()
            .username("user")
            .build_with_transport(MockTransport::new())
            .unwrap_err();
        assert!(matches!(err, HighspotError::MissingCredentials(MissingAuth::Password)));
        assert!(err.to_string().contains("password"));

        let both = Highspot::builder()
            .build_with_transport(MockTransport::new())
            .unwrap_err();
        assert_ne!(err.to_string(), both.to_string());
    }

    #[test]
    fn test_missing_username_only() {
        let err = Highspot::new(None, Some("pass")).unwrap_err();
        assert!(matches!(err, HighspotError::MissingCredentials(MissingAuth::Username)));
    }

    #[test]
    fn test_empty_credentials_count_as_missing() {
        let err = Highspot::new(Some(""), Some("pass")).unwrap_err();
        assert!(matches!(err, HighspotError::MissingCredentials(MissingAuth::Username)));
    }

    #[test]
    fn test_debug_hides_password() {
        let hs = client(MockTransport::new());
        let debug = format!("{:?}", hs);
        assert!(debug.contains("api-su2.highspot.com"));
        assert!(!debug.contains("pass\""));
    }

    #[test]
    fn test_url_normalizes_leading_separator() {
        let hs = client(MockTransport::new());
        assert_eq!(hs.url("/me"), "https://api-su2.highspot.com/v0.5/me");
        assert_eq!(hs.url("me"), "https://api-su2.highspot.com/v0.5/me");
        assert_eq!(hs.url("//me"), "https://api-su2.highspot.com/v0.5/me");
    }

    #[test]
    fn test_execute_get_json() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(eq("https://api-su2.highspot.com/v0.5/me"), always(), eq(true))
            .times(1)
            .returning(|_, _, _| Ok(RawResponse::new(200, r#"{"id": "u1", "email": "a@b.c"}"#)));

        let hs = client(transport);
        let value = hs.execute_get("me", true, true).unwrap().into_json().unwrap();
        assert_eq!(value, json!({"id": "u1", "email": "a@b.c"}));
    }

    #[test]
    fn test_execute_get_raw() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(always(), always(), eq(false))
            .times(1)
            .returning(|_, _, _| Ok(RawResponse::new(500, "Internal Server Error")));

        let hs = client(transport);
        let response = hs.execute_get("/me", false, false).unwrap();
        let raw = response.into_raw().unwrap();
        assert_eq!(raw.status(), 500);
        assert_eq!(raw.text(), "Internal Server Error");
    }

    #[test]
    fn test_execute_get_json_on_text_body_fails() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _, _| Ok(RawResponse::new(200, "<html></html>")));

        let hs = client(transport);
        let result = hs.get_json("/me");
        assert!(matches!(result, Err(HighspotError::Json(_))));
    }

    #[test]
    fn test_execute_get_exhausts_connection_retries() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(MAX_ATTEMPTS)
            .returning(|_, _, _| Err(TransportError::Connect("connection refused".to_string())));

        let hs = client(transport);
        let result = hs.get_json("/me");
        assert!(matches!(result, Err(HighspotError::ConnectionExhausted)));
    }

    #[test]
    fn test_execute_get_fatal_error_not_retried() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _, _| Err(TransportError::other("TimeoutError", "operation timed out")));

        let hs = client(transport);
        let err = hs.get_json("/me").unwrap_err();
        assert_eq!(err.to_string(), "TimeoutError: operation timed out");
    }

    #[test]
    fn test_get_json_uses_client_tls_setting() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(always(), always(), eq(false))
            .times(1)
            .returning(|_, _, _| Ok(RawResponse::new(200, "{}")));

        let hs = Highspot::builder()
            .username("user")
            .password("pass")
            .verify_tls(false)
            .build_with_transport(transport)
            .unwrap();
        assert_eq!(hs.get_json("/me").unwrap(), json!({}));
    }

    #[test]
    fn test_response_into_raw_on_json_is_mismatch() {
        let result = Response::Json(json!({})).into_raw();
        assert!(matches!(result, Err(HighspotError::DataMismatch(_))));
    }
}

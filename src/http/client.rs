//! HTTP client with built-in retry logic.

use log::debug;

use super::retry::with_retry;
use super::transport::{Credentials, RawResponse, Transport};
use crate::error::Result;

/// Wraps a [`Transport`] and retries connection failures.
#[derive(Clone)]
pub struct HttpClient<T: Transport> {
    transport: T,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Performs an authenticated GET request.
    /// Automatically retries on connection failures.
    #[tracing::instrument(skip(self, credentials))]
    pub fn get(&self, url: &str, credentials: &Credentials, verify_tls: bool) -> Result<RawResponse> {
        debug!("GET {}...", url);
        let response = with_retry("GET", || self.transport.get(url, credentials, verify_tls))?;
        debug!("GET {} returned status {}", url, response.status());
        Ok(response)
    }
}

//! HTTP client module with retry logic and error handling.

mod client;
mod retry;
mod transport;

pub use client::HttpClient;
pub use retry::{MAX_ATTEMPTS, MAX_RETRIES, classify_error, with_retry};
#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{Credentials, RawResponse, ReqwestTransport, Transport, TransportError};

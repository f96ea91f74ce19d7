//! Retry logic for GET requests with connection-failure classification.

use log::{debug, warn};

use super::transport::TransportError;
use crate::error::{HighspotError, Result};

/// Number of retries after the initial attempt.
pub const MAX_RETRIES: usize = 5;

/// Total number of attempts (initial attempt plus retries).
pub const MAX_ATTEMPTS: usize = MAX_RETRIES + 1;

/// Classifies a transport failure as retryable or fatal.
/// Returns Ok(()) for connection failures, Err with the fatal request error otherwise.
pub fn classify_error(error: &TransportError) -> Result<()> {
    match error {
        TransportError::Connect(_) => Ok(()),
        TransportError::Other { kind, message } => Err(HighspotError::Request {
            kind: kind.clone(),
            message: message.clone(),
        }),
    }
}

/// Runs `operation` until it succeeds, fails fatally, or every attempt failed to connect.
///
/// Retries are immediate. Each connection failure that is followed by another
/// attempt is logged as a warning with its 1-based retry number.
pub fn with_retry<F, T>(operation_name: &str, mut operation: F) -> Result<T>
where
    F: FnMut() -> std::result::Result<T, TransportError>,
{
    let mut retries = 0;

    while retries < MAX_ATTEMPTS {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) => {
                if let Err(fatal) = classify_error(&e) {
                    debug!("{}: non-retryable error: {}", operation_name, e);
                    return Err(fatal);
                }

                retries += 1;
                if retries < MAX_ATTEMPTS {
                    warn!(
                        "The {} request has failed with the following exception: {} (Attempt {} of {})",
                        operation_name, e, retries, MAX_RETRIES
                    );
                } else {
                    warn!(
                        "The {} request has failed with the following exception: {} (no retries left)",
                        operation_name, e
                    );
                }
            }
        }
    }

    Err(HighspotError::ConnectionExhausted)
}

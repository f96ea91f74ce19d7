//! Domain-wide endpoints.

use serde_json::Value;

use crate::client::Highspot;
use crate::error::Result;
use crate::http::Transport;
use crate::query::{Pagination, QueryString};

/// Page size used when only `start` is given for promoted searches.
pub const DEFAULT_LIMIT: u32 = 100;

/// Builds the promoted-searches endpoint; bare when neither bound is given.
pub fn promoted_searches_endpoint(start: Option<u32>, limit: Option<u32>) -> String {
    let mut qs = QueryString::new();
    if start.is_some() || limit.is_some() {
        qs.paginate(Pagination::new(
            start.unwrap_or(0),
            limit.unwrap_or(DEFAULT_LIMIT),
        ));
    }
    qs.endpoint("/domain/search/promoted")
}

/// Returns the custom usage labels defined in the caller's domain.
#[tracing::instrument(skip(hs))]
pub fn get_custom_usage_labels<T: Transport>(hs: &Highspot<T>) -> Result<Value> {
    hs.get_json("/domain/custom-usage-labels")
}

/// Returns the promoted searches defined in the caller's domain.
#[tracing::instrument(skip(hs))]
pub fn get_promoted_searches<T: Transport>(
    hs: &Highspot<T>,
    start: Option<u32>,
    limit: Option<u32>,
) -> Result<Value> {
    hs.get_json(&promoted_searches_endpoint(start, limit))
}

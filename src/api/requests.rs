//! Asynchronous request status endpoints.

use serde_json::Value;

use crate::client::Highspot;
use crate::error::{Result, require};
use crate::http::Transport;
use crate::query::segment;

/// Returns the status of an asynchronous request.
#[tracing::instrument(skip(hs))]
pub fn get_request<T: Transport>(hs: &Highspot<T>, request_id: &str) -> Result<Value> {
    require("request_id", request_id)?;
    hs.get_json(&format!("/requests/{}", segment(request_id)))
}

/// Returns the result of a completed asynchronous request.
#[tracing::instrument(skip(hs))]
pub fn get_request_result<T: Transport>(hs: &Highspot<T>, request_id: &str) -> Result<Value> {
    require("request_id", request_id)?;
    hs.get_json(&format!("/requests/{}/result", segment(request_id)))
}

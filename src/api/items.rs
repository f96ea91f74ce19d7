//! Item endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::client::Highspot;
use crate::error::{Result, require};
use crate::http::Transport;
use crate::query::{Pagination, QueryString, segment};

/// Default page size for item listings.
pub const DEFAULT_LIMIT: u32 = 100;

/// Query parameter requesting CSV output from the content endpoint.
const CSV_FORMAT: &str = "text/csv";

/// Item content as returned by [`get_item_content`].
///
/// 404 and 410 responses carry a structured error payload and come back as
/// `Json`; every other status, including other errors, comes back as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemContent {
    Text(String),
    Json(Value),
}

/// Filters for [`get_items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsQuery {
    pub spot_id: String,
    pub list_id: Option<String>,
    pub start: u32,
    pub limit: u32,
}

impl ItemsQuery {
    pub fn new(spot_id: impl Into<String>) -> Self {
        Self {
            spot_id: spot_id.into(),
            list_id: None,
            start: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

pub fn items_endpoint(query: &ItemsQuery) -> Result<String> {
    require("spot_id", &query.spot_id)?;
    let mut qs = QueryString::new();
    qs.push("spot", &query.spot_id)
        .push_opt("list", query.list_id.as_deref())
        .paginate(Pagination::new(query.start, query.limit));
    Ok(qs.endpoint("/items"))
}

pub fn item_content_endpoint(item_id: &str, report: bool) -> Result<String> {
    require("item_id", item_id)?;
    let mut qs = QueryString::new();
    if report {
        qs.push_literal("format", CSV_FORMAT);
    }
    Ok(qs.endpoint(&format!("/items/{}/content", segment(item_id))))
}

fn item_path(item_id: &str, suffix: &str) -> Result<String> {
    require("item_id", item_id)?;
    Ok(format!("/items/{}{}", segment(item_id), suffix))
}

/// Retrieves the items in a Spot.
#[tracing::instrument(skip(hs))]
pub fn get_items<T: Transport>(hs: &Highspot<T>, query: &ItemsQuery) -> Result<Value> {
    let endpoint = items_endpoint(query)?;
    hs.get_json(&endpoint)
}

/// Retrieves the metadata for a specific item.
#[tracing::instrument(skip(hs))]
pub fn get_item<T: Transport>(hs: &Highspot<T>, item_id: &str) -> Result<Value> {
    hs.get_json(&item_path(item_id, "")?)
}

#[tracing::instrument(skip(hs))]
pub fn get_item_bookmarks<T: Transport>(hs: &Highspot<T>, item_id: &str) -> Result<Value> {
    hs.get_json(&item_path(item_id, "/bookmarks")?)
}

/// Retrieves the content of an item, as CSV when `report` is set.
#[tracing::instrument(skip(hs))]
pub fn get_item_content<T: Transport>(
    hs: &Highspot<T>,
    item_id: &str,
    report: bool,
) -> Result<ItemContent> {
    let endpoint = item_content_endpoint(item_id, report)?;
    let response = hs.get_raw(&endpoint)?;
    match response.status() {
        404 | 410 => Ok(ItemContent::Json(response.json()?)),
        _ => Ok(ItemContent::Text(response.into_text())),
    }
}

/// Retrieves a CSV report for an item.
#[tracing::instrument(skip(hs))]
pub fn get_item_report<T: Transport>(hs: &Highspot<T>, item_id: &str) -> Result<ItemContent> {
    get_item_content(hs, item_id, true)
}

#[tracing::instrument(skip(hs))]
pub fn get_item_cms_metadata<T: Transport>(hs: &Highspot<T>, item_id: &str) -> Result<Value> {
    hs.get_json(&item_path(item_id, "/cms/metadata")?)
}

#[tracing::instrument(skip(hs))]
pub fn get_item_thumbnails<T: Transport>(hs: &Highspot<T>, item_id: &str) -> Result<Value> {
    hs.get_json(&item_path(item_id, "/thumbnails")?)
}

#[tracing::instrument(skip(hs))]
pub fn get_item_properties<T: Transport>(hs: &Highspot<T>, item_id: &str) -> Result<Value> {
    hs.get_json(&item_path(item_id, "/properties")?)
}

#[tracing::instrument(skip(hs))]
pub fn get_item_property<T: Transport>(
    hs: &Highspot<T>,
    item_id: &str,
    property_name: &str,
) -> Result<Value> {
    require("property_name", property_name)?;
    hs.get_json(&item_path(item_id, &format!("/properties/{}", segment(property_name)))?)
}

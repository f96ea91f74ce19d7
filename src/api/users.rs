//! User endpoints.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::client::Highspot;
use crate::error::{HighspotError, Result, require};
use crate::http::Transport;
use crate::query::{Fields, Pagination, QueryString, segment};

/// Default page size for user listings.
pub const DEFAULT_LIMIT: u32 = 100;

/// Which users a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserListType {
    All,
    Unverified,
    Verified,
}

impl UserListType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserListType::All => "all",
            UserListType::Unverified => "unverified",
            UserListType::Verified => "verified",
        }
    }
}

impl fmt::Display for UserListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserListType {
    type Err = HighspotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(UserListType::All),
            "unverified" => Ok(UserListType::Unverified),
            "verified" => Ok(UserListType::Verified),
            _ => Err(HighspotError::invalid_field("list_type", s)),
        }
    }
}

/// Filters for [`get_users`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersQuery {
    pub email: Option<String>,
    /// One of `all`, `unverified` or `verified`.
    pub list_type: Option<String>,
    pub with_fields: Option<Fields>,
    pub exclude_fields: Option<Fields>,
    pub start: u32,
    pub limit: u32,
}

impl Default for UsersQuery {
    fn default() -> Self {
        Self {
            email: None,
            list_type: None,
            with_fields: None,
            exclude_fields: None,
            start: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Builds the `/users` endpoint, validating the list type first.
pub fn users_endpoint(query: &UsersQuery) -> Result<String> {
    let list_type = query
        .list_type
        .as_deref()
        .filter(|l| !l.is_empty())
        .map(str::parse::<UserListType>)
        .transpose()?;

    let mut qs = QueryString::new();
    qs.push_opt("email", query.email.as_deref())
        .push_opt("list", list_type.map(|l| l.as_str()))
        .push_fields("with-fields", query.with_fields.as_ref())
        .push_fields("exclude-fields", query.exclude_fields.as_ref())
        .paginate(Pagination::new(query.start, query.limit));
    Ok(qs.endpoint("/users"))
}

/// Returns the user making the API call.
#[tracing::instrument(skip(hs))]
pub fn me<T: Transport>(hs: &Highspot<T>) -> Result<Value> {
    hs.get_json("/me")
}

/// Retrieves a page of users.
#[tracing::instrument(skip(hs))]
pub fn get_users<T: Transport>(hs: &Highspot<T>, query: &UsersQuery) -> Result<Value> {
    let endpoint = users_endpoint(query)?;
    hs.get_json(&endpoint)
}

/// Retrieves the metadata for a specific user.
#[tracing::instrument(skip(hs))]
pub fn get_user<T: Transport>(hs: &Highspot<T>, user_id: &str) -> Result<Value> {
    require("user_id", user_id)?;
    hs.get_json(&format!("/users/{}", segment(user_id)))
}

/// Retrieves the properties for a specific user.
#[tracing::instrument(skip(hs))]
pub fn get_user_properties<T: Transport>(hs: &Highspot<T>, user_id: &str) -> Result<Value> {
    require("user_id", user_id)?;
    hs.get_json(&format!("/users/{}/properties", segment(user_id)))
}

/// Retrieves a single named property for a specific user.
#[tracing::instrument(skip(hs))]
pub fn get_user_property<T: Transport>(
    hs: &Highspot<T>,
    user_id: &str,
    property_name: &str,
) -> Result<Value> {
    require("user_id", user_id)?;
    require("property_name", property_name)?;
    hs.get_json(&format!(
        "/users/{}/properties/{}",
        segment(user_id),
        segment(property_name)
    ))
}

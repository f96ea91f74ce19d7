//! Group endpoints.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::client::Highspot;
use crate::error::{HighspotError, Result, require};
use crate::http::Transport;
use crate::query::{Pagination, QueryString, segment};

/// Default page size for group listings.
pub const DEFAULT_LIMIT: u32 = 100;

/// Role the calling user holds in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    Editor,
    Viewer,
    Manager,
    Owner,
}

impl GroupRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Editor => "editor",
            GroupRole::Viewer => "viewer",
            GroupRole::Manager => "manager",
            GroupRole::Owner => "owner",
        }
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupRole {
    type Err = HighspotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "editor" => Ok(GroupRole::Editor),
            "viewer" => Ok(GroupRole::Viewer),
            "manager" => Ok(GroupRole::Manager),
            "owner" => Ok(GroupRole::Owner),
            _ => Err(HighspotError::invalid_field("role_filter", s)),
        }
    }
}

/// Right the calling user holds on a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRight {
    Edit,
    View,
    Manage,
}

impl GroupRight {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRight::Edit => "edit",
            GroupRight::View => "view",
            GroupRight::Manage => "manage",
        }
    }
}

impl fmt::Display for GroupRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupRight {
    type Err = HighspotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "edit" => Ok(GroupRight::Edit),
            "view" => Ok(GroupRight::View),
            "manage" => Ok(GroupRight::Manage),
            _ => Err(HighspotError::invalid_field("right_filter", s)),
        }
    }
}

/// Filters for [`get_groups`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupsQuery {
    pub role_filter: Option<String>,
    pub right_filter: Option<String>,
    pub start: u32,
    pub limit: u32,
}

impl Default for GroupsQuery {
    fn default() -> Self {
        Self {
            role_filter: None,
            right_filter: None,
            start: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

pub fn groups_endpoint(query: &GroupsQuery) -> Result<String> {
    let role = parse_filter::<GroupRole>(query.role_filter.as_deref())?;
    let right = parse_filter::<GroupRight>(query.right_filter.as_deref())?;

    let mut qs = QueryString::new();
    qs.push_opt("role", role.map(|r| r.as_str()))
        .push_opt("right", right.map(|r| r.as_str()))
        .paginate(Pagination::new(query.start, query.limit));
    Ok(qs.endpoint("/groups"))
}

fn parse_filter<F: FromStr<Err = HighspotError>>(value: Option<&str>) -> Result<Option<F>> {
    value.filter(|v| !v.is_empty()).map(str::parse).transpose()
}

/// Retrieves the groups visible to the caller.
#[tracing::instrument(skip(hs))]
pub fn get_groups<T: Transport>(hs: &Highspot<T>, query: &GroupsQuery) -> Result<Value> {
    let endpoint = groups_endpoint(query)?;
    hs.get_json(&endpoint)
}

#[tracing::instrument(skip(hs))]
pub fn get_group<T: Transport>(hs: &Highspot<T>, group_id: &str) -> Result<Value> {
    require("group_id", group_id)?;
    hs.get_json(&format!("/groups/{}", segment(group_id)))
}

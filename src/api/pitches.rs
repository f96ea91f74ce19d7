//! Pitch endpoints.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::client::Highspot;
use crate::error::{HighspotError, Result};
use crate::http::Transport;
use crate::query::{Pagination, QueryString};

/// Default page size for pitch listings.
pub const DEFAULT_LIMIT: u32 = 25;

/// Sort order for pitch listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchSort {
    RecentActivity,
    Alphabetical,
    DateCreated,
}

impl PitchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            PitchSort::RecentActivity => "recent_activity",
            PitchSort::Alphabetical => "alphabetical",
            PitchSort::DateCreated => "date_created",
        }
    }
}

impl fmt::Display for PitchSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitchSort {
    type Err = HighspotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "recent_activity" => Ok(PitchSort::RecentActivity),
            "alphabetical" => Ok(PitchSort::Alphabetical),
            "date_created" => Ok(PitchSort::DateCreated),
            _ => Err(HighspotError::invalid_field("sort_by", s)),
        }
    }
}

/// Parameters for [`get_pitches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchesQuery {
    pub start: u32,
    pub limit: u32,
    /// One of `recent_activity`, `alphabetical` or `date_created`.
    pub sort_by: Option<String>,
}

impl Default for PitchesQuery {
    fn default() -> Self {
        Self {
            start: 0,
            limit: DEFAULT_LIMIT,
            sort_by: None,
        }
    }
}

pub fn pitches_endpoint(query: &PitchesQuery) -> Result<String> {
    let sort_by = query
        .sort_by
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<PitchSort>)
        .transpose()?;

    let mut qs = QueryString::new();
    qs.paginate(Pagination::new(query.start, query.limit))
        .push_opt("sortby", sort_by.map(|s| s.as_str()));
    Ok(qs.endpoint("/pitches"))
}

/// Retrieves the pitches sent by the caller.
#[tracing::instrument(skip(hs))]
pub fn get_pitches<T: Transport>(hs: &Highspot<T>, query: &PitchesQuery) -> Result<Value> {
    let endpoint = pitches_endpoint(query)?;
    hs.get_json(&endpoint)
}

//! Endpoint and query-string assembly.

use std::borrow::Cow;
use std::fmt;

/// Percent-encodes a caller-supplied path segment such as an item ID.
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Ordered `key=value` query parameters.
///
/// Renders as `k1=v1&k2=v2`: the first parameter never carries a leading `&`
/// and every later one does. Values are percent-encoded as they are pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl fmt::Display) -> &mut Self {
        let value = value.to_string();
        self.pairs.push((key, urlencoding::encode(&value).into_owned()));
        self
    }

    /// Appends a fixed value without encoding it.
    pub(crate) fn push_literal(&mut self, key: &'static str, value: &'static str) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Appends the parameter only when a non-empty value is present.
    pub fn push_opt<V: AsRef<str>>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let value = value.as_ref();
            if !value.is_empty() {
                self.push(key, value);
            }
        }
        self
    }

    pub fn push_fields(&mut self, key: &'static str, fields: Option<&Fields>) -> &mut Self {
        if let Some(fields) = fields.filter(|f| !f.is_empty()) {
            self.pairs.push((key, fields.encoded()));
        }
        self
    }

    pub fn paginate(&mut self, page: Pagination) -> &mut Self {
        self.push("start", page.start).push("limit", page.limit)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Joins `path` and this query string into a relative endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self)
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Position and size of a paged request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub start: u32,
    pub limit: u32,
}

impl Pagination {
    pub const fn new(start: u32, limit: u32) -> Self {
        Self { start, limit }
    }
}

/// Field selection: a single field (possibly already comma-separated) or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    One(String),
    Many(Vec<String>),
}

impl Fields {
    pub fn joined(&self) -> String {
        match self {
            Fields::One(field) => field.clone(),
            Fields::Many(fields) => fields.join(","),
        }
    }

    /// Comma-joined with each field name percent-encoded and the separators kept.
    fn encoded(&self) -> String {
        self.joined()
            .split(',')
            .map(|field| urlencoding::encode(field).into_owned())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Fields::One(field) => field.is_empty(),
            Fields::Many(fields) => fields.iter().all(|f| f.is_empty()),
        }
    }
}

impl From<&str> for Fields {
    fn from(field: &str) -> Self {
        Fields::One(field.to_string())
    }
}

impl From<String> for Fields {
    fn from(field: String) -> Self {
        Fields::One(field)
    }
}

impl<S: Into<String>> From<Vec<S>> for Fields {
    fn from(fields: Vec<S>) -> Self {
        Fields::Many(fields.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for Fields {
    fn from(fields: &[&str]) -> Self {
        Fields::Many(fields.iter().map(|f| f.to_string()).collect())
    }
}

//! What the generic CRUD and query plumbing needs to know about an entity.

use super::ForemanObject;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Debug};

/// A Foreman resource kind addressable as `/<ENDPOINT>` and `/<ENDPOINT>/<id>`.
///
/// `Serialize` is the write-side codec (what goes under [`Entity::WIRE_KEY`]) and
/// `Deserialize` the read-side codec (what the server returns).
pub trait Entity: Serialize + DeserializeOwned + Debug {
    /// Collection path segment, e.g. `hosts`.
    const ENDPOINT: &'static str;
    /// Key that wraps the entity in write payloads, e.g. `host`.
    const WIRE_KEY: &'static str;

    fn object(&self) -> &ForemanObject;

    fn id(&self) -> u64 {
        self.object().id
    }

    fn name(&self) -> &str {
        &self.object().name
    }

    /// Server-side search used to find this entity by its identifying attribute.
    fn search_filter(&self) -> SearchFilter;
}

/// Exact-match search on a single attribute, e.g. `name="web01"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub field: &'static str,
    pub value: String,
}

impl SearchFilter {
    pub fn new(field: &'static str, value: &str) -> SearchFilter {
        SearchFilter {
            field,
            value: value.to_string(),
        }
    }

    /// Value of the `search` query parameter. The value is double-quoted so the server
    /// matches the whole string.
    pub fn to_query(&self) -> String {
        format!("{}=\"{}\"", self.field, self.value.replace('"', "\\\""))
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query())
    }
}

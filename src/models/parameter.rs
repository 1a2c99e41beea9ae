//! Key/value parameters attached to hosts and hostgroups.

use super::object::{is_zero, lenient_string, null_as_default};
use serde::{Deserialize, Serialize};

/// One entry of a host's or hostgroup's parameter list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct KvParameter {
    #[serde(default, skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Non-string values (typed parameters) are kept in their JSON text form.
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
}

impl KvParameter {
    pub fn new(name: &str, value: &str) -> KvParameter {
        KvParameter {
            id: 0,
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

//! Network interfaces attached to a host.

use super::object::{is_false, is_zero, null_as_default};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A host network interface.
///
/// Interfaces are never replaced as a whole list. New entries (id 0) are appended by
/// the server, existing entries are updated by id, and an entry is removed only when
/// it is sent with `destroy` set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InterfaceAttribute {
    #[serde(default, skip_serializing_if = "is_zero", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub managed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provision: bool,
    #[serde(rename = "virtual", default, deserialize_with = "null_as_default")]
    pub r#virtual: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac: String,
    /// Interface class, e.g. `interface` or `bmc`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// BMC provider, e.g. `IPMI`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub attached_devices: String,
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub attached_to: String,
    /// Hypervisor specific settings, only meaningful for virtual machines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_attributes: Option<Map<String, Value>>,
    /// Removal marker for this one interface. The server never returns it.
    #[serde(rename = "_destroy", default, skip_deserializing, skip_serializing_if = "is_false")]
    pub destroy: bool,
}

impl InterfaceAttribute {
    /// Mark this interface for removal on the next host update.
    pub fn mark_destroyed(&mut self) {
        self.destroy = true;
    }

    pub fn is_bmc(&self) -> bool {
        self.kind.eq_ignore_ascii_case("bmc")
    }
}

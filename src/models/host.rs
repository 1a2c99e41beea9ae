//! Foreman host model and the host power/boot commands.

use super::object::{lenient_opt_string, lenient_string, null_as_default};
use super::{Entity, ForeignKey, ForemanObject, InterfaceAttribute, KvParameter, SearchFilter};
use crate::error::ForemanError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Provisioning method assumed when the server does not report one.
pub const DEFAULT_PROVISION_METHOD: &str = "build";

/// A host managed by Foreman.
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    pub object: ForemanObject,
    /// Rebuild the host on next reboot.
    pub build: bool,
    /// `build` or `image`.
    pub provision_method: String,
    pub domain_id: ForeignKey,
    /// Read-only. Used to strip the domain from the FQDN the server returns as name.
    pub domain_name: String,
    pub environment_id: ForeignKey,
    pub hostgroup_id: ForeignKey,
    pub operatingsystem_id: ForeignKey,
    pub medium_id: ForeignKey,
    pub image_id: ForeignKey,
    /// Hypervisor to deploy on.
    pub compute_resource_id: ForeignKey,
    pub compute_profile_id: ForeignKey,
    pub comment: String,
    pub interfaces: Vec<InterfaceAttribute>,
    pub parameters: Vec<KvParameter>,
    /// Local only: whether BMC operations should be issued for this host.
    pub enable_bmc: bool,
    /// Local only: outcome of the last BMC call.
    pub bmc_success: bool,
}

impl Default for Host {
    fn default() -> Self {
        Host {
            object: ForemanObject::default(),
            build: false,
            provision_method: DEFAULT_PROVISION_METHOD.to_string(),
            domain_id: ForeignKey::UNSET,
            domain_name: String::new(),
            environment_id: ForeignKey::UNSET,
            hostgroup_id: ForeignKey::UNSET,
            operatingsystem_id: ForeignKey::UNSET,
            medium_id: ForeignKey::UNSET,
            image_id: ForeignKey::UNSET,
            compute_resource_id: ForeignKey::UNSET,
            compute_profile_id: ForeignKey::UNSET,
            comment: String::new(),
            interfaces: vec![],
            parameters: vec![],
            enable_bmc: false,
            bmc_success: false,
        }
    }
}

impl Host {
    pub fn new(name: &str) -> Host {
        Host {
            object: ForemanObject::new(name),
            ..Default::default()
        }
    }

    /// Interfaces of type `bmc`.
    pub fn bmc_interfaces(&self) -> impl Iterator<Item = &InterfaceAttribute> {
        self.interfaces.iter().filter(|i| i.is_bmc())
    }
}

impl Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if !self.object.is_new() {
            map.serialize_entry("id", &self.object.id)?;
        }
        map.serialize_entry("name", &self.object.name)?;
        map.serialize_entry("comment", &self.comment)?;
        map.serialize_entry("build", &self.build)?;
        map.serialize_entry("provision_method", &self.provision_method)?;
        map.serialize_entry("domain_id", &self.domain_id)?;
        map.serialize_entry("operatingsystem_id", &self.operatingsystem_id)?;
        map.serialize_entry("medium_id", &self.medium_id)?;
        map.serialize_entry("image_id", &self.image_id)?;
        map.serialize_entry("hostgroup_id", &self.hostgroup_id)?;
        map.serialize_entry("environment_id", &self.environment_id)?;
        map.serialize_entry("compute_resource_id", &self.compute_resource_id)?;
        map.serialize_entry("compute_profile_id", &self.compute_profile_id)?;
        if !self.interfaces.is_empty() {
            map.serialize_entry("interfaces_attributes", &self.interfaces)?;
        }
        if !self.parameters.is_empty() {
            map.serialize_entry("host_parameters_attributes", &self.parameters)?;
        }
        map.end()
    }
}

/// Read-side shape of a host.
#[derive(Deserialize)]
struct HostWire {
    #[serde(flatten)]
    object: ForemanObject,
    #[serde(default, deserialize_with = "null_as_default")]
    build: bool,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    provision_method: Option<String>,
    /// Older servers name the provisioning method `method`.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    method: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    comment: String,
    #[serde(default, deserialize_with = "lenient_string")]
    domain_name: String,
    #[serde(default)]
    domain_id: ForeignKey,
    #[serde(default)]
    environment_id: ForeignKey,
    #[serde(default)]
    hostgroup_id: ForeignKey,
    #[serde(default)]
    operatingsystem_id: ForeignKey,
    #[serde(default)]
    medium_id: ForeignKey,
    #[serde(default)]
    image_id: ForeignKey,
    #[serde(default)]
    compute_resource_id: ForeignKey,
    #[serde(default)]
    compute_profile_id: ForeignKey,
    #[serde(default, deserialize_with = "null_as_default")]
    interfaces: Vec<InterfaceAttribute>,
    #[serde(default)]
    parameters: Option<Vec<KvParameter>>,
    #[serde(default)]
    host_parameters_attributes: Option<Vec<KvParameter>>,
}

impl From<HostWire> for Host {
    fn from(wire: HostWire) -> Self {
        let mut object = wire.object;
        // The server reports the FQDN as name but expects the short name back.
        if !wire.domain_name.is_empty() {
            let suffix = format!(".{}", wire.domain_name);
            if let Some(short) = object.name.strip_suffix(&suffix) {
                object.name = short.to_string();
            }
        }
        Host {
            object,
            build: wire.build,
            provision_method: [wire.provision_method, wire.method]
                .into_iter()
                .flatten()
                .find(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_PROVISION_METHOD.to_string()),
            domain_id: wire.domain_id,
            domain_name: wire.domain_name,
            environment_id: wire.environment_id,
            hostgroup_id: wire.hostgroup_id,
            operatingsystem_id: wire.operatingsystem_id,
            medium_id: wire.medium_id,
            image_id: wire.image_id,
            compute_resource_id: wire.compute_resource_id,
            compute_profile_id: wire.compute_profile_id,
            comment: wire.comment,
            interfaces: wire.interfaces,
            parameters: wire
                .parameters
                .or(wire.host_parameters_attributes)
                .unwrap_or_default(),
            enable_bmc: false,
            bmc_success: false,
        }
    }
}

impl<'de> Deserialize<'de> for Host {
    fn deserialize<D>(deserializer: D) -> Result<Host, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        HostWire::deserialize(deserializer).map(Host::from)
    }
}

impl Entity for Host {
    const ENDPOINT: &'static str = "hosts";
    const WIRE_KEY: &'static str = "host";

    fn object(&self) -> &ForemanObject {
        &self.object
    }

    fn search_filter(&self) -> SearchFilter {
        SearchFilter::new("name", &self.object.name)
    }
}

/// IPMI power actions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    On,
    Off,
    /// Soft reboot.
    Soft,
    /// Hard reset.
    Cycle,
    /// Query the current power state.
    State,
}

/// Devices a host can be told to boot from next.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BootDevice {
    Disk,
    Cdrom,
    Pxe,
    Bios,
}

/// A BMC command sent to `/hosts/<id>/<suffix>`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Power(PowerAction),
    Boot(BootDevice),
}

impl HostCommand {
    /// URL suffix appended to the host path.
    pub fn suffix(&self) -> &'static str {
        match self {
            HostCommand::Power(_) => "power",
            HostCommand::Boot(_) => "boot",
        }
    }

    /// Request body for this command.
    pub fn body(&self) -> Value {
        match self {
            HostCommand::Power(action) => serde_json::json!({ "power_action": action }),
            HostCommand::Boot(device) => serde_json::json!({ "device": device }),
        }
    }

    /// Inspect the server's answer. `{"power": false}` or `{"boot": {"result": false}}`
    /// means the BMC did not carry out the command.
    pub fn check_response(&self, response: &Value) -> Result<(), ForemanError> {
        let failed = match self {
            HostCommand::Power(_) => response.get("power") == Some(&Value::Bool(false)),
            HostCommand::Boot(_) => {
                response.pointer("/boot/result") == Some(&Value::Bool(false))
            }
        };
        if failed {
            return Err(ForemanError::OperationFailed(format!(
                "{self} reported failure: {response}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCommand::Power(action) => write!(f, "power {action:?}"),
            HostCommand::Boot(device) => write!(f, "boot {device:?}"),
        }
    }
}

impl From<PowerAction> for HostCommand {
    fn from(action: PowerAction) -> Self {
        HostCommand::Power(action)
    }
}

impl From<BootDevice> for HostCommand {
    fn from(device: BootDevice) -> Self {
        HostCommand::Boot(device)
    }
}

/// Accepts exactly `{"power_action": ...}` or `{"device": ...}`.
impl TryFrom<&Value> for HostCommand {
    type Error = ForemanError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let object = value
            .as_object()
            .ok_or_else(|| ForemanError::InvalidCommand(format!("expected an object: {value}")))?;
        let invalid = || ForemanError::InvalidCommand(value.to_string());
        match (object.get("power_action"), object.get("device")) {
            (Some(action), None) => serde_json::from_value::<PowerAction>(action.clone())
                .map(HostCommand::Power)
                .map_err(|_| invalid()),
            (None, Some(device)) => serde_json::from_value::<BootDevice>(device.clone())
                .map(HostCommand::Boot)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

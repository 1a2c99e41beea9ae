//! Foreman entity models and their JSON codecs.
//!
//! - [`ForemanObject`] - id/name base every entity composes
//! - [`ForeignKey`] - optional association id with Foreman's wire encoding
//! - [`Host`], [`Hostgroup`], [`OperatingSystem`], [`Organization`], [`Location`],
//!   [`CommonParameter`] - the managed resource kinds
//! - [`Entity`] - what the generic CRUD/query client needs from each of them

mod common_parameter;
mod entity;
mod foreign_key;
mod host;
mod hostgroup;
mod interface;
mod object;
mod operatingsystem;
mod parameter;
mod query;
mod taxonomy;

// Re-export public types
pub use common_parameter::CommonParameter;
pub use entity::{Entity, SearchFilter};
pub use foreign_key::ForeignKey;
pub use host::{BootDevice, Host, HostCommand, PowerAction, DEFAULT_PROVISION_METHOD};
pub use hostgroup::Hostgroup;
pub use interface::InterfaceAttribute;
pub use object::{id_to_string, objects_to_ids, parse_id, ForemanObject};
pub use operatingsystem::{OperatingSystem, OsFamily};
pub use parameter::KvParameter;
pub use query::QueryResponse;
pub use taxonomy::{Location, Organization};

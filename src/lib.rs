//! Core of a Foreman provider: typed models for hosts, hostgroups, operating systems,
//! organizations, locations and global parameters, their JSON wire codecs, and a
//! blocking client that creates, reads, updates, deletes and searches them.
//!
//! ```no_run
//! use foreman_provider::{config, Client, ClientConfig};
//! use foreman_provider::models::{Host, PowerAction};
//!
//! # fn main() -> foreman_provider::Result<()> {
//! config::init_logging(None)?;
//! let client = Client::from_config(&ClientConfig::from_env()?)?;
//! let hostgroup = foreman_provider::data_source::hostgroup_by_title(&client, "base/web")?;
//!
//! let mut host = Host::new("web01");
//! host.hostgroup_id = hostgroup.object.id.into();
//! let host = client.create_host(&host, client.default_retries())?;
//! client.send_power_command(host.object.id, PowerAction::On.into(), client.default_retries())?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data_source;
pub mod error;
pub mod foreman;
pub mod models;

// Re-export public types
pub use config::ClientConfig;
pub use error::{ForemanError, Result};
pub use foreman::{Client, Transport};

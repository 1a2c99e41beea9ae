//! Host CRUD and BMC commands.
//!
//! Create, update and power/boot commands take an attempt budget; transient failures
//! (network errors, 5xx) are retried up to that many attempts in total.

use super::client::Client;
use super::transport::{Method, Transport};
use crate::error::Result;
use crate::models::{Host, HostCommand, QueryResponse};
use serde_json::Value;

impl<T: Transport> Client<T> {
    /// Create `host`, returning it as the server stored it (with its new id).
    ///
    /// # Arguments
    /// * `host` - host to create; its id must be 0
    /// * `retries` - total attempt budget, 0 is treated as 1
    pub fn create_host(&self, host: &Host, retries: u32) -> Result<Host> {
        self.create(host, retries)
    }

    pub fn read_host(&self, id: u64) -> Result<Host> {
        self.read(id)
    }

    pub fn update_host(&self, host: &Host, retries: u32) -> Result<Host> {
        self.update(host, retries)
    }

    pub fn delete_host(&self, id: u64) -> Result<()> {
        self.delete::<Host>(id)
    }

    /// Search hosts by `host.object.name`.
    pub fn query_host(&self, host: &Host) -> Result<QueryResponse<Host>> {
        self.query(host)
    }

    /// PUT a power or boot command to `/hosts/<id>/<power|boot>`.
    ///
    /// # Returns
    /// * `Ok(Value)` - the server's answer, e.g. `{"power_action": "on", "power": true}`
    /// * `Err(OperationFailed)` - the server answered but the BMC did not carry it out
    pub fn send_power_command(
        &self,
        host_id: u64,
        command: HostCommand,
        retries: u32,
    ) -> Result<Value> {
        log::trace!("#Start send_power_command host_id={host_id} {command}");
        let path = format!(
            "{}/{}",
            super::client::member_path::<Host>(host_id)?,
            command.suffix()
        );
        let request = self.new_request(Method::Put, &path, Some(&command.body()))?;
        let response: Value = self
            .retry_policy(retries)
            .run(&format!("{command} host_id={host_id}"), |_| {
                self.send_and_parse(&request)
            })?;
        log::debug!("{command} host_id={host_id} => {response}");
        command.check_response(&response)?;
        Ok(response)
    }
}

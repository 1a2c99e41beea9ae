//! Operating system CRUD. Every call makes a single attempt.

use super::client::Client;
use super::transport::Transport;
use crate::error::Result;
use crate::models::{OperatingSystem, QueryResponse};

impl<T: Transport> Client<T> {
    pub fn create_operating_system(&self, os: &OperatingSystem) -> Result<OperatingSystem> {
        self.create(os, 1)
    }

    pub fn read_operating_system(&self, id: u64) -> Result<OperatingSystem> {
        self.read(id)
    }

    pub fn update_operating_system(&self, os: &OperatingSystem) -> Result<OperatingSystem> {
        self.update(os, 1)
    }

    pub fn delete_operating_system(&self, id: u64) -> Result<()> {
        self.delete::<OperatingSystem>(id)
    }

    /// Search by `title`, e.g. `Debian 12`.
    pub fn query_operating_system(
        &self,
        os: &OperatingSystem,
    ) -> Result<QueryResponse<OperatingSystem>> {
        self.query(os)
    }
}

//! Hostgroup CRUD. Every call makes a single attempt.

use super::client::Client;
use super::transport::Transport;
use crate::error::Result;
use crate::models::{Hostgroup, QueryResponse};

impl<T: Transport> Client<T> {
    pub fn create_hostgroup(&self, hostgroup: &Hostgroup) -> Result<Hostgroup> {
        self.create(hostgroup, 1)
    }

    pub fn read_hostgroup(&self, id: u64) -> Result<Hostgroup> {
        self.read(id)
    }

    pub fn update_hostgroup(&self, hostgroup: &Hostgroup) -> Result<Hostgroup> {
        self.update(hostgroup, 1)
    }

    pub fn delete_hostgroup(&self, id: u64) -> Result<()> {
        self.delete::<Hostgroup>(id)
    }

    /// Search by the full `title` path, e.g. `base/web`.
    pub fn query_hostgroup(&self, hostgroup: &Hostgroup) -> Result<QueryResponse<Hostgroup>> {
        self.query(hostgroup)
    }
}

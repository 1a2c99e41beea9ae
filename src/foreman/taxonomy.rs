//! Organization and location CRUD. Every call makes a single attempt.

use super::client::Client;
use super::transport::Transport;
use crate::error::Result;
use crate::models::{Location, Organization, QueryResponse};

impl<T: Transport> Client<T> {
    pub fn create_organization(&self, organization: &Organization) -> Result<Organization> {
        self.create(organization, 1)
    }

    pub fn read_organization(&self, id: u64) -> Result<Organization> {
        self.read(id)
    }

    pub fn update_organization(&self, organization: &Organization) -> Result<Organization> {
        self.update(organization, 1)
    }

    pub fn delete_organization(&self, id: u64) -> Result<()> {
        self.delete::<Organization>(id)
    }

    pub fn query_organization(
        &self,
        organization: &Organization,
    ) -> Result<QueryResponse<Organization>> {
        self.query(organization)
    }

    pub fn create_location(&self, location: &Location) -> Result<Location> {
        self.create(location, 1)
    }

    pub fn read_location(&self, id: u64) -> Result<Location> {
        self.read(id)
    }

    pub fn update_location(&self, location: &Location) -> Result<Location> {
        self.update(location, 1)
    }

    pub fn delete_location(&self, id: u64) -> Result<()> {
        self.delete::<Location>(id)
    }

    pub fn query_location(&self, location: &Location) -> Result<QueryResponse<Location>> {
        self.query(location)
    }
}

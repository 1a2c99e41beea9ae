//! Global parameter CRUD. Every call makes a single attempt.

use super::client::Client;
use super::transport::Transport;
use crate::error::Result;
use crate::models::{CommonParameter, QueryResponse};

impl<T: Transport> Client<T> {
    pub fn create_common_parameter(&self, parameter: &CommonParameter) -> Result<CommonParameter> {
        self.create(parameter, 1)
    }

    pub fn read_common_parameter(&self, id: u64) -> Result<CommonParameter> {
        self.read(id)
    }

    pub fn update_common_parameter(&self, parameter: &CommonParameter) -> Result<CommonParameter> {
        self.update(parameter, 1)
    }

    pub fn delete_common_parameter(&self, id: u64) -> Result<()> {
        self.delete::<CommonParameter>(id)
    }

    pub fn query_common_parameter(
        &self,
        parameter: &CommonParameter,
    ) -> Result<QueryResponse<CommonParameter>> {
        self.query(parameter)
    }
}

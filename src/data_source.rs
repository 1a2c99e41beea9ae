//! "Exactly one match" lookups used to resolve names into ids.
//!
//! The client's query never picks one of several matches; these helpers turn a search
//! into a single entity or a [`ForemanError::NotFound`] / [`ForemanError::Ambiguous`].

use crate::error::{ForemanError, Result};
use crate::foreman::{Client, Transport};
use crate::models::{
    CommonParameter, Entity, Host, Hostgroup, Location, OperatingSystem, Organization,
    SearchFilter,
};
use itertools::Itertools;

/// Run `filter` against `E`'s collection and require exactly one result.
///
/// # Returns
/// * `Ok(E)` - the single match
/// * `Err(NotFound)` - nothing matched
/// * `Err(Ambiguous)` - more than one object matched
pub fn find_one<T, E>(client: &Client<T>, filter: SearchFilter) -> Result<E>
where
    T: Transport,
    E: Entity,
{
    let response = client.query_by::<E>(&filter)?;
    if response.is_empty() {
        return Err(ForemanError::NotFound {
            kind: E::WIRE_KEY,
            search: filter.to_query(),
        });
    }
    let count = response.subtotal.max(response.results.len() as u64);
    if count > 1 {
        return Err(ForemanError::Ambiguous {
            kind: E::WIRE_KEY,
            search: filter.to_query(),
            count,
            names: response.results.iter().map(|e| e.name()).join(", "),
        });
    }
    let mut results = response.results;
    let found = results.remove(0);
    log::debug!("{} {} => id={}", E::WIRE_KEY, filter, found.id());
    Ok(found)
}

pub fn location_by_name<T: Transport>(client: &Client<T>, name: &str) -> Result<Location> {
    find_one(client, SearchFilter::new("name", name))
}

pub fn organization_by_name<T: Transport>(client: &Client<T>, name: &str) -> Result<Organization> {
    find_one(client, SearchFilter::new("name", name))
}

/// `title` is the full path, e.g. `base/web`.
pub fn hostgroup_by_title<T: Transport>(client: &Client<T>, title: &str) -> Result<Hostgroup> {
    find_one(client, SearchFilter::new("title", title))
}

/// `title` is name and version, e.g. `Debian 12`.
pub fn operating_system_by_title<T: Transport>(
    client: &Client<T>,
    title: &str,
) -> Result<OperatingSystem> {
    find_one(client, SearchFilter::new("title", title))
}

pub fn common_parameter_by_name<T: Transport>(
    client: &Client<T>,
    name: &str,
) -> Result<CommonParameter> {
    find_one(client, SearchFilter::new("name", name))
}

pub fn host_by_name<T: Transport>(client: &Client<T>, name: &str) -> Result<Host> {
    find_one(client, SearchFilter::new("name", name))
}

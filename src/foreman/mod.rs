//! Foreman REST API client.
//!
//! - [`transport`] - the [`Transport`] seam and its blocking `reqwest` implementation
//! - [`retry`] - attempt budget with classified, bounded exponential backoff
//! - [`Client`] - generic CRUD/query plus one method per entity and operation

mod client;
mod common_parameter;
mod host;
mod hostgroup;
mod operatingsystem;
pub mod retry;
mod taxonomy;
pub mod transport;

// Re-export public types
pub use client::{wrap_json, Client};
pub use retry::{Backoff, RetryPolicy};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

//! Generic request plumbing and CRUD/query for every [`Entity`].
//!
//! The per-entity methods in the sibling modules are thin wrappers over
//! [`Client::create`], [`Client::read`], [`Client::update`], [`Client::delete`] and
//! [`Client::query`].

use super::retry::{Backoff, RetryPolicy};
use super::transport::{ApiRequest, HttpTransport, Method, Transport};
use crate::config::{ClientConfig, DEFAULT_CLIENT_RETRIES};
use crate::error::{ForemanError, Result};
use crate::models::{Entity, QueryResponse, SearchFilter};
use colored::Colorize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Longest response body excerpt kept in a `Status` error.
const MAX_ERROR_BODY: usize = 512;

/// Foreman API client over a [`Transport`].
pub struct Client<T = HttpTransport> {
    transport: T,
    backoff: Backoff,
    default_retries: u32,
}

impl Client<HttpTransport> {
    /// Client talking HTTP to the server named in `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Client<HttpTransport>> {
        let transport = HttpTransport::new(config)?;
        Ok(Client {
            transport,
            backoff: Backoff::new(config.initial_backoff, config.max_backoff),
            default_retries: config.client_retries,
        })
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Client<T> {
        Client {
            transport,
            backoff: Backoff::default(),
            default_retries: DEFAULT_CLIENT_RETRIES,
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Client<T> {
        self.backoff = backoff;
        self
    }

    pub fn with_default_retries(mut self, retries: u32) -> Client<T> {
        self.default_retries = retries;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Attempt budget from the configuration, for callers that have no budget of
    /// their own to pass to the host calls.
    pub fn default_retries(&self) -> u32 {
        self.default_retries
    }

    pub(crate) fn retry_policy(&self, attempts: u32) -> RetryPolicy {
        RetryPolicy::new(attempts, self.backoff)
    }

    /// Build a request; `body` is serialized to JSON.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiRequest>
    where
        B: Serialize + ?Sized,
    {
        let body = match body {
            Some(b) => Some(serde_json::to_string(b)?),
            None => None,
        };
        ApiRequest::new(method, path, body)
    }

    /// Send `request`, require a 2xx status and decode the body into `R`.
    ///
    /// # Returns
    /// * `Ok(R)` - decoded response
    /// * `Err(Status)` - non-2xx answer, with the start of the response body
    /// * `Err(Decode)` - the body did not fit `R`; the JSON path is reported
    pub fn send_and_parse<R>(&self, request: &ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let body = self.send_checked(request)?;
        let mut json_deserializer = serde_json::Deserializer::from_str(&body);
        let parsed: R = serde_path_to_error::deserialize(&mut json_deserializer).map_err(|e| {
            log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", body);
            ForemanError::Decode {
                path: e.path().to_string(),
                message: e.inner().to_string(),
            }
        })?;
        Ok(parsed)
    }

    /// Send `request` and require a 2xx status, ignoring the body.
    pub fn send_and_discard(&self, request: &ApiRequest) -> Result<()> {
        self.send_checked(request).map(|_| ())
    }

    fn send_checked(&self, request: &ApiRequest) -> Result<String> {
        log::debug!(
            "{method} {path}",
            method = request.method.as_str().on_blue(),
            path = request.path_and_query()
        );
        if let Some(body) = &request.body {
            log::debug!("request body={body}");
        }
        let response = self.transport.send(request)?;
        log::trace!(
            "{} {} => status={} body={}",
            request.method,
            request.path,
            response.status,
            response.body
        );
        if !response.is_success() {
            log::debug!(
                "{method} {path} => {status}",
                method = request.method.as_str().on_blue(),
                path = request.path,
                status = response.status.to_string().red()
            );
            return Err(ForemanError::Status {
                status: response.status,
                method: request.method.to_string(),
                path: request.path_and_query(),
                body: response.body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }
        Ok(response.body)
    }

    /// POST the entity to its collection, retrying transient failures up to
    /// `attempts` times in total.
    pub fn create<E: Entity>(&self, entity: &E, attempts: u32) -> Result<E> {
        log::trace!("#Start create {} name={}", E::WIRE_KEY, entity.name());
        let body = wrap_json(entity)?;
        let request = self.new_request(Method::Post, &collection_path::<E>(), Some(&body))?;
        let created: E = self
            .retry_policy(attempts)
            .run(&format!("create {}", E::WIRE_KEY), |_| self.send_and_parse(&request))?;
        log::debug!("created {} id={} name={}", E::WIRE_KEY, created.id(), created.name());
        Ok(created)
    }

    pub fn read<E: Entity>(&self, id: u64) -> Result<E> {
        log::trace!("#Start read {} id={id}", E::WIRE_KEY);
        let request = self.new_request::<Value>(Method::Get, &member_path::<E>(id)?, None)?;
        let entity: E = self.send_and_parse(&request)?;
        log::debug!("read {}: {:?}", E::WIRE_KEY, entity);
        Ok(entity)
    }

    /// PUT the entity to `/<collection>/<id>`. The returned entity is what the server
    /// reports after the update.
    pub fn update<E: Entity>(&self, entity: &E, attempts: u32) -> Result<E> {
        log::trace!("#Start update {} id={}", E::WIRE_KEY, entity.id());
        let path = member_path::<E>(entity.id())?;
        let body = wrap_json(entity)?;
        let request = self.new_request(Method::Put, &path, Some(&body))?;
        let updated: E = self
            .retry_policy(attempts)
            .run(&format!("update {} id={}", E::WIRE_KEY, entity.id()), |_| {
                self.send_and_parse(&request)
            })?;
        log::debug!("updated {} id={}", E::WIRE_KEY, updated.id());
        Ok(updated)
    }

    pub fn delete<E: Entity>(&self, id: u64) -> Result<()> {
        log::trace!("#Start delete {} id={id}", E::WIRE_KEY);
        let request = self.new_request::<Value>(Method::Delete, &member_path::<E>(id)?, None)?;
        self.send_and_discard(&request)
    }

    /// Search using the entity's identifying attribute. All matches are returned;
    /// picking one is left to the caller.
    pub fn query<E: Entity>(&self, entity: &E) -> Result<QueryResponse<E>> {
        self.query_by(&entity.search_filter())
    }

    pub fn query_by<E: Entity>(&self, filter: &SearchFilter) -> Result<QueryResponse<E>> {
        log::trace!("#Start query {} {filter}", E::ENDPOINT);
        let request = self
            .new_request::<Value>(Method::Get, &collection_path::<E>(), None)?
            .with_query("search", &filter.to_query());
        let response: QueryResponse<E> = self.send_and_parse(&request)?;
        log::debug!(
            "query {} {filter}: subtotal={} results={}",
            E::ENDPOINT,
            response.subtotal,
            response.results.len()
        );
        Ok(response)
    }
}

/// `{"<wire key>": entity}` as sent by create and update.
pub fn wrap_json<E: Entity>(entity: &E) -> Result<Value> {
    let mut wrapper = Map::new();
    wrapper.insert(E::WIRE_KEY.to_string(), serde_json::to_value(entity)?);
    Ok(Value::Object(wrapper))
}

pub(crate) fn collection_path<E: Entity>() -> String {
    format!("/{}", E::ENDPOINT)
}

/// `/<collection>/<id>`; id 0 never names a server object.
pub(crate) fn member_path<E: Entity>(id: u64) -> Result<String> {
    if id == 0 {
        return Err(ForemanError::Request(format!(
            "{} id is unset (0)",
            E::WIRE_KEY
        )));
    }
    Ok(format!("/{}/{id}", E::ENDPOINT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foreman::transport::mock::ScriptedTransport;
    use crate::models::{Location, Organization};
    use serde_json::json;

    fn client(transport: ScriptedTransport) -> Client<ScriptedTransport> {
        Client::new(transport).with_backoff(Backoff::none())
    }

    #[test]
    fn test_status_error_carries_request() {
        let client = client(ScriptedTransport::new().reply(404, r#"{"error":{"message":"not found"}}"#));
        let err = client.read::<Location>(9).unwrap_err();
        match err {
            ForemanError::Status {
                status,
                method,
                path,
                body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(method, "GET");
                assert_eq!(path, "/locations/9");
                assert!(body.contains("not found"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_reports_path() {
        let client = client(ScriptedTransport::new().reply(200, r#"{"id": 1, "name": "dc1", "title": 5}"#));
        match client.read::<Location>(1).unwrap_err() {
            ForemanError::Decode { path, .. } => assert_eq!(path, "title"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_id_zero_rejected_before_sending() {
        let client = client(ScriptedTransport::new());
        assert!(matches!(client.read::<Location>(0), Err(ForemanError::Request(_))));
        assert!(matches!(client.delete::<Location>(0), Err(ForemanError::Request(_))));
        assert!(matches!(
            client.update(&Location::new("dc1"), 3),
            Err(ForemanError::Request(_))
        ));
        assert!(client.transport().sent().is_empty());
    }

    #[test]
    fn test_create_wraps_and_retries() {
        let client = client(
            ScriptedTransport::new()
                .reply(502, "bad gateway")
                .reply(201, r#"{"id": 4, "name": "acme", "title": "acme"}"#),
        );
        let created = client.create(&Organization::new("acme"), 3).unwrap();
        assert_eq!(created.object.id, 4);

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
        let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"organization": {"name": "acme", "description": ""}}));
    }

    #[test]
    fn test_create_validation_error_not_retried() {
        let client = client(
            ScriptedTransport::new()
                .reply(422, r#"{"error":{"full_messages":["Name has already been taken"]}}"#)
                .reply(201, r#"{"id": 4, "name": "acme"}"#),
        );
        let err = client.create(&Organization::new("acme"), 3).unwrap_err();
        assert!(matches!(err, ForemanError::Status { status: 422, .. }));
        assert_eq!(client.transport().sent().len(), 1);
    }

    #[test]
    fn test_query_sends_search() {
        let client = client(ScriptedTransport::new().reply(
            200,
            r#"{"total": 3, "subtotal": 1, "search": "name=\"dc1\"", "results": [{"id": 1, "name": "dc1"}]}"#,
        ));
        let response = client.query(&Location::new("dc1")).unwrap();
        assert_eq!(response.subtotal, 1);
        assert_eq!(response.results[0].object.id, 1);
        let sent = client.transport().sent();
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].path_and_query(), "/locations?search=name%3D%22dc1%22");
    }

    #[test]
    fn test_delete_ignores_body() {
        let client = client(ScriptedTransport::new().reply(200, "not json at all"));
        client.delete::<Location>(3).unwrap();
        let sent = client.transport().sent();
        assert_eq!(sent[0].method, Method::Delete);
        assert_eq!(sent[0].path, "/locations/3");
        assert!(sent[0].body.is_none());
    }

    #[test]
    fn test_status_body_truncated() {
        let long = "x".repeat(MAX_ERROR_BODY * 2);
        let client = client(ScriptedTransport::new().reply(500, &long));
        match client.read::<Location>(1).unwrap_err() {
            ForemanError::Status { body, .. } => assert_eq!(body.len(), MAX_ERROR_BODY),
            other => panic!("unexpected error {other:?}"),
        }
    }
}

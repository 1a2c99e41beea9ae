//! Integration tests for foreman-provider
//!
//! These tests drive the public client end to end against an in-memory transport and
//! check what goes over the wire.

use foreman_provider::data_source;
use foreman_provider::foreman::{ApiRequest, ApiResponse, Backoff, Method};
use foreman_provider::models::{
    ForeignKey, Host, HostCommand, Hostgroup, InterfaceAttribute, KvParameter, Location,
    PowerAction,
};
use foreman_provider::{Client, ClientConfig, ForemanError, Result, Transport};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Replays canned answers in order and records every request.
#[derive(Default)]
struct FakeForeman {
    answers: RefCell<VecDeque<Result<ApiResponse>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeForeman {
    fn answer(self, status: u16, body: &str) -> Self {
        self.answers
            .borrow_mut()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    fn drop_connection(self) -> Self {
        self.answers
            .borrow_mut()
            .push_back(Err(ForemanError::Transport("connection reset by peer".into())));
        self
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeForeman {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ForemanError::Transport("unexpected request".into())))
    }
}

fn client(fake: &FakeForeman) -> Client<&FakeForeman> {
    Client::new(fake).with_backoff(Backoff::none())
}

fn body_of(request: &ApiRequest) -> Value {
    serde_json::from_str(request.body.as_deref().expect("Request should carry a body"))
        .expect("Request body should be JSON")
}

#[test]
fn test_provision_host_workflow() {
    let host_json = std::fs::read_to_string("src/tests/test_data/host_01.json")
        .expect("Error reading host fixture");
    let fake = FakeForeman::default()
        .answer(
            200,
            r#"{"total": 9, "subtotal": 1, "results": [{"id": 5, "name": "web", "title": "base/web"}]}"#,
        )
        .answer(201, &host_json)
        .answer(200, r#"{"power_action": "on", "power": true}"#);
    let client = client(&fake);

    let hostgroup = data_source::hostgroup_by_title(&client, "base/web").expect("Hostgroup lookup");
    let mut host = Host::new("web01");
    host.hostgroup_id = hostgroup.object.id.into();
    host.domain_id = ForeignKey::new(3);
    host.interfaces.push(InterfaceAttribute {
        identifier: "ens192".to_string(),
        primary: true,
        managed: true,
        ..Default::default()
    });
    host.parameters.push(KvParameter::new("role", "web"));

    let created = client.create_host(&host, 3).expect("Host create");
    assert_eq!(created.object.id, 42);
    assert_eq!(created.object.name, "web01");

    client
        .send_power_command(created.object.id, PowerAction::On.into(), 3)
        .expect("Power on");

    let requests = fake.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[0].path_and_query(),
        "/hostgroups?search=title%3D%22base%2Fweb%22"
    );

    assert_eq!(requests[1].method, Method::Post);
    assert_eq!(requests[1].path, "/hosts");
    let body = body_of(&requests[1]);
    assert_eq!(body["host"]["hostgroup_id"], json!("5"));
    assert_eq!(body["host"]["domain_id"], json!("3"));
    assert_eq!(body["host"]["medium_id"], json!(""));
    assert_eq!(body["host"]["interfaces_attributes"][0]["identifier"], json!("ens192"));
    assert_eq!(body["host"]["host_parameters_attributes"][0]["name"], json!("role"));
    assert!(body["host"].get("interfaces").is_none());

    assert_eq!(requests[2].method, Method::Put);
    assert_eq!(requests[2].path, "/hosts/42/power");
    assert_eq!(body_of(&requests[2]), json!({"power_action": "on"}));
}

#[test]
fn test_create_host_minimal_payload() {
    let fake = FakeForeman::default().answer(201, r#"{"id": 1, "name": "h1"}"#);
    let client = client(&fake);
    let mut host = Host::new("h1");
    host.domain_id = ForeignKey::new(0);
    host.hostgroup_id = ForeignKey::new(5);
    client.create_host(&host, 1).expect("Host create");

    let body = body_of(&fake.requests()[0]);
    assert_eq!(body["host"]["name"], json!("h1"));
    assert_eq!(body["host"]["domain_id"], json!(""));
    assert_eq!(body["host"]["hostgroup_id"], json!("5"));
}

#[test]
fn test_update_reflects_server_state() {
    let fake = FakeForeman::default()
        .drop_connection()
        .answer(200, r#"{"id": 42, "name": "web01", "comment": "set by server", "build": true}"#);
    let client = client(&fake);
    let mut host = Host::new("web01");
    host.object.id = 42;
    host.comment = "mine".to_string();

    let updated = client.update_host(&host, 2).expect("Host update");
    assert_eq!(updated.comment, "set by server");
    assert!(updated.build);
    assert_eq!(fake.requests().len(), 2);
}

#[test]
fn test_retry_budget_exhausted() {
    let fake = FakeForeman::default()
        .drop_connection()
        .answer(502, "bad gateway")
        .answer(201, r#"{"id": 1, "name": "h1"}"#);
    let client = client(&fake);

    let err = client.create_host(&Host::new("h1"), 2).unwrap_err();
    assert!(
        matches!(err, ForemanError::Status { status: 502, .. }),
        "Expected the second attempt's error, got {err}"
    );
    assert_eq!(fake.requests().len(), 2);
}

#[test]
fn test_power_failure_reported() {
    let fake = FakeForeman::default().answer(200, r#"{"power_action": "on", "power": false}"#);
    let client = client(&fake);
    let err = client
        .send_power_command(42, HostCommand::Power(PowerAction::On), 3)
        .unwrap_err();
    assert!(matches!(err, ForemanError::OperationFailed(_)));
}

#[test]
fn test_untyped_command_rejected() {
    let raw = json!({"reboot": "now"});
    assert!(matches!(
        HostCommand::try_from(&raw),
        Err(ForemanError::InvalidCommand(_))
    ));
}

#[test]
fn test_lookup_not_found_vs_ambiguous() {
    let query_json = std::fs::read_to_string("src/tests/test_data/query_locations_01.json")
        .expect("Error reading query fixture");
    let fake = FakeForeman::default()
        .answer(200, r#"{"total": 5, "subtotal": 0, "results": []}"#)
        .answer(200, &query_json);
    let client = client(&fake);

    let missing = data_source::location_by_name(&client, "dc9").unwrap_err();
    let several = data_source::location_by_name(&client, "dc1").unwrap_err();
    assert!(matches!(missing, ForemanError::NotFound { .. }));
    assert!(matches!(several, ForemanError::Ambiguous { count: 2, .. }));
    assert_ne!(missing.to_string(), several.to_string());
}

#[test]
fn test_query_keeps_every_match() {
    let query_json = std::fs::read_to_string("src/tests/test_data/query_locations_01.json")
        .expect("Error reading query fixture");
    let fake = FakeForeman::default().answer(200, &query_json);
    let client = client(&fake);
    let response = client.query_location(&Location::new("dc1")).expect("Query");
    assert_eq!(response.subtotal, 2);
    let titles: Vec<&str> = response.results.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["dc1", "berlin/dc1"]);
}

#[test]
fn test_hostgroup_read_fixture() {
    let raw = std::fs::read_to_string("src/tests/test_data/hostgroup_01.json")
        .expect("Error reading hostgroup fixture");
    let fake = FakeForeman::default().answer(200, &raw);
    let client = client(&fake);
    let group: Hostgroup = client.read_hostgroup(11).expect("Hostgroup read");
    assert_eq!(group.title, "base/web");
    assert_eq!(group.medium_id.get(), Some(7));
    assert_eq!(fake.requests()[0].path, "/hostgroups/11");
}

#[test]
fn test_client_from_config() {
    let config = ClientConfig::from_lookup(|key| match key {
        "FOREMAN_SERVER_URL" => Some("https://foreman.example.com/api".to_string()),
        "FOREMAN_CLIENT_RETRIES" => Some("5".to_string()),
        _ => None,
    })
    .expect("Config should load");
    let client = Client::from_config(&config).expect("Client should build");
    assert_eq!(client.default_retries(), 5);
}

//! HTTP transport between the client and a Foreman server.
//!
//! The client only depends on the [`Transport`] trait; [`HttpTransport`] is the
//! `reqwest` implementation used against a real server.

use crate::config::ClientConfig;
use crate::error::{ForemanError, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::fmt;
use url::Url;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request relative to the API base url.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base, always starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Build a request, rejecting paths that cannot be appended to the base url.
    pub fn new(method: Method, path: &str, body: Option<String>) -> Result<ApiRequest> {
        if !path.starts_with('/') {
            return Err(ForemanError::Request(format!(
                "path must start with '/': {path:?}"
            )));
        }
        if path.contains(|c: char| c.is_whitespace() || c == '?' || c == '#') {
            return Err(ForemanError::Request(format!(
                "path contains reserved characters: {path:?}"
            )));
        }
        Ok(ApiRequest {
            method,
            path: path.to_string(),
            query: vec![],
            body,
        })
    }

    pub fn with_query(mut self, key: &str, value: &str) -> ApiRequest {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Path plus form-encoded query string, as sent on the wire.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// Raw answer: status code and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations return `Err` only when no HTTP answer was obtained; status codes
/// are checked by the client.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        (**self).send(request)
    }
}

/// Blocking `reqwest` transport with basic auth.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<HttpTransport> {
        let base_url = Url::parse(&config.server_url).map_err(|e| {
            ForemanError::Config(format!("invalid server url '{}': {e}", config.server_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ForemanError::Config(format!(
                "server url cannot be used as a base: {base_url}"
            )));
        }
        if config.insecure {
            log::warn!("TLS certificate verification disabled for {base_url}");
        }
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ForemanError::Config(format!("building HTTP client: {e}")))?;
        Ok(HttpTransport {
            client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Absolute url for `request`.
    pub fn url_for(&self, request: &ApiRequest) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", self.base_url.path().trim_end_matches('/'), request.path);
        url.set_path(&path);
        url.set_query(None);
        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        url
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(request);
        log::trace!("HttpTransport::send {} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.into(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(username) = &self.username {
            builder = builder.basic_auth(username, self.password.as_ref());
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().map_err(|e| {
            log::error!("{} {} failed: {}", request.method, url, e);
            ForemanError::Transport(format!("{} {}: {e}", request.method, url))
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ForemanError::Transport(format!("reading response body from {url}: {e}")))?;
        log::trace!("HttpTransport::send status={status} body.len()={}", body.len());

        Ok(ApiResponse { status, body })
    }
}

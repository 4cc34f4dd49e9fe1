//! Blocking HTTP transport backed by reqwest.

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};

use crate::request::cookie_pair;
use crate::{ClientConfig, Method, RegistryError, RegistryResult, Request, Response, Transport};

/// Content type of ANVL request bodies.
const ANVL_CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

/// HTTP transport for a remote registry.
///
/// Does no retries; the configured timeout bounds every request.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport for the registry at `config.url`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Network` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> RegistryResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RegistryError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the registry URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &Request) -> RegistryResult<Response> {
        let url = format!("{}{}", self.base_url, request.path());
        log::debug!("{} {url}", request.method());

        let mut builder = self.client.request(request.method().into(), &url);
        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, ANVL_CONTENT_TYPE)
                .body(body.to_string());
        }
        if let Some(session) = request.session() {
            builder = builder.header(COOKIE, session);
        } else if let Some(credentials) = request.credentials() {
            builder = builder.basic_auth(credentials.user(), Some(credentials.password()));
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let session = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(cookie_pair);
        let body = response
            .text()
            .map_err(|e| RegistryError::network(format!("failed to read response body: {e}")))?;

        log::debug!("{} {url} -> {status}", request.method());
        Ok(Response::new(status, body).with_session(session))
    }
}

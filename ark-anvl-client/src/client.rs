//! Registry operations over a transport.

use ark_anvl::{AnvlRecord, Ark, BaseConfig, ERROR_KEY, SUCCESS_KEY, anvl};

use crate::request::encode_path;
use crate::{
    ClientConfig, Credentials, Method, RegistryError, RegistryResult, ReqwestTransport, Request,
    Response, Transport,
};

/// Client for an EZID-style identifier registry.
///
/// Every operation resolves its target identifier against the configured
/// [`BaseConfig`] first, so shorthand such as `qc17z06` is accepted
/// anywhere a full ARK is.
///
/// # Examples
///
/// ```
/// use ark_anvl::BaseConfig;
/// use ark_anvl_client::{RegistryClient, SimulatedRegistry};
///
/// let client = RegistryClient::new(SimulatedRegistry::new(), BaseConfig::default());
///
/// let ark = client.create("qc17z06", &[("erc.who", "Quinn")].into_iter().collect()).unwrap();
/// assert_eq!(ark.as_str(), "ark:/99999/fk4qc17z06");
///
/// let record = client.get("fk4qc17z06").unwrap();
/// assert_eq!(record.ark(), Some("ark:/99999/fk4qc17z06"));
/// assert_eq!(record.get("erc.who"), Some("Quinn"));
/// ```
#[derive(Debug)]
pub struct RegistryClient<T> {
    transport: T,
    base: BaseConfig,
    credentials: Option<Credentials>,
    session: Option<String>,
}

impl RegistryClient<ReqwestTransport> {
    /// Creates an HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Network` if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig, base: BaseConfig) -> RegistryResult<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self {
            transport,
            base,
            credentials: config.credentials.clone(),
            session: config.session.clone(),
        })
    }
}

impl<T: Transport> RegistryClient<T> {
    /// Creates an unauthenticated client.
    #[must_use]
    pub const fn new(transport: T, base: BaseConfig) -> Self {
        Self {
            transport,
            base,
            credentials: None,
            session: None,
        }
    }

    /// Sets basic credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the session cookie.
    #[must_use]
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Returns the base identifiers resolve against.
    #[must_use]
    pub const fn base(&self) -> &BaseConfig {
        &self.base
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the current session cookie.
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Resolves `id` against the configured base.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Identifier` if `id` does not resolve.
    pub fn resolve(&self, id: &str) -> RegistryResult<Ark> {
        Ok(self.base.resolve(id)?)
    }

    /// Mints a new identifier on the base shoulder.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the registry refuses or the returned
    /// identifier does not resolve.
    pub fn mint(&self, metadata: &AnvlRecord) -> RegistryResult<Ark> {
        let path = format!("/shoulder/{}", self.base.base());
        let request = self.request(Method::Post, path).with_body(anvl::encode(metadata));
        log::debug!("{} {}", request.method(), request.path());
        let response = self.transport.send(&request)?;
        let body = response.body().to_string();
        let record = interpret(response, None)?;
        let minted = success_id(&record).ok_or(RegistryError::Rejected { body })?;
        log::debug!("minted {minted}");
        self.resolve(minted)
    }

    /// Creates an identifier with a chosen name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if `id` does not resolve or the registry
    /// refuses, for example because the identifier exists.
    pub fn create(&self, id: &str, metadata: &AnvlRecord) -> RegistryResult<Ark> {
        let ark = self.resolve(id)?;
        let request = self
            .request(Method::Put, id_path(&ark))
            .with_body(anvl::encode(metadata));
        self.exchange(&request, None)?;
        Ok(ark)
    }

    /// Fetches an identifier's metadata.
    ///
    /// The returned record carries the identifier under `ark`, unless the
    /// metadata itself defines that element.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if `id` does not resolve or the registry
    /// refuses.
    pub fn get(&self, id: &str) -> RegistryResult<AnvlRecord> {
        let ark = self.resolve(id)?;
        let request = self.request(Method::Get, id_path(&ark));
        let mut record = self.exchange(&request, Some(ark.as_str()))?;
        record.remove(SUCCESS_KEY);
        Ok(record)
    }

    /// Sets metadata elements on an existing identifier.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if `id` does not resolve or the registry
    /// refuses.
    pub fn update(&self, id: &str, metadata: &AnvlRecord) -> RegistryResult<Ark> {
        let ark = self.resolve(id)?;
        let request = self
            .request(Method::Post, id_path(&ark))
            .with_body(anvl::encode(metadata));
        self.exchange(&request, None)?;
        Ok(ark)
    }

    /// Deletes an identifier.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if `id` does not resolve or the registry
    /// refuses.
    pub fn delete(&self, id: &str) -> RegistryResult<Ark> {
        let ark = self.resolve(id)?;
        let request = self.request(Method::Delete, id_path(&ark));
        self.exchange(&request, None)?;
        Ok(ark)
    }

    /// Authenticates with basic credentials and keeps the session cookie.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Session` if no credentials are configured or
    /// the registry sets no cookie, and other variants if it refuses.
    pub fn login(&mut self) -> RegistryResult<String> {
        let credentials = self
            .credentials
            .clone()
            .ok_or_else(|| RegistryError::session("login requires a user and password"))?;
        let request = Request::new(Method::Get, "/login").with_credentials(Some(credentials));

        let response = self.transport.send(&request)?;
        let cookie = response.session().map(str::to_string);
        interpret(response, None)?;

        let cookie = cookie.ok_or_else(|| RegistryError::session("registry set no session cookie"))?;
        self.session = Some(cookie.clone());
        Ok(cookie)
    }

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the registry refuses.
    pub fn logout(&mut self) -> RegistryResult<()> {
        let request = Request::new(Method::Get, "/logout").with_session(self.session.take());
        self.exchange(&request, None)?;
        Ok(())
    }

    fn request(&self, method: Method, path: String) -> Request {
        Request::new(method, path)
            .with_session(self.session.clone())
            .with_credentials(self.credentials.clone())
    }

    fn exchange(&self, request: &Request, ark_override: Option<&str>) -> RegistryResult<AnvlRecord> {
        log::debug!("{} {}", request.method(), request.path());
        let response = self.transport.send(request)?;
        interpret(response, ark_override)
    }
}

fn id_path(ark: &Ark) -> String {
    format!("/id/{}", encode_path(ark.as_str()))
}

/// Returns the identifier named by the `success` element.
///
/// The registry may append more after the identifier (`ark:/... | doi:...`),
/// so only the first word counts.
fn success_id(record: &AnvlRecord) -> Option<&str> {
    record.get(SUCCESS_KEY)?.split_whitespace().next()
}

/// Turns a raw response into a record, or the error it describes.
fn interpret(response: Response, ark_override: Option<&str>) -> RegistryResult<AnvlRecord> {
    let status = response.status();
    let ok = response.is_success();
    let body = response.into_body();

    let record = match anvl::decode(&body, ark_override) {
        Ok(record) => record,
        Err(source) if ok => return Err(RegistryError::MalformedResponse { body, source }),
        Err(_) => return Err(RegistryError::Http { status, body }),
    };

    if let Some(reason) = record.get(ERROR_KEY) {
        log::warn!("registry refused request ({status}): {reason}");
        return Err(RegistryError::Failed {
            reason: reason.to_string(),
            body,
        });
    }
    if !ok {
        return Err(RegistryError::Http { status, body });
    }
    if !record.contains(SUCCESS_KEY) {
        log::warn!("registry response has no success element");
        return Err(RegistryError::Rejected { body });
    }
    Ok(record)
}

//! In-memory registry for tests and offline use.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use ark_anvl::{AnvlRecord, BaseConfig, anvl};

use crate::request::decode_path;
use crate::{Credentials, Method, RegistryResult, Request, Response, Transport};

/// Alphabet used for minted blades: digits and consonants, no `l`.
const BETANUMERIC: &[u8] = b"0123456789bcdfghjkmnpqrstvwxz";

/// Width of minted blades.
const BLADE_WIDTH: usize = 6;

/// Simulated registry.
///
/// Single-process, in-memory implementation of the registry protocol.
/// Answers the way the remote service does, including `error:` bodies and
/// 4xx statuses, so client code can be exercised without a network.
///
/// When an account is configured, every mutating request must carry the
/// matching credentials or a session obtained from `/login`. Reads are
/// always public.
///
/// # Thread Safety
///
/// Uses `RwLock` for interior mutability, allowing concurrent reads
/// and exclusive writes.
///
/// # Examples
///
/// ```
/// use ark_anvl::BaseConfig;
/// use ark_anvl_client::{RegistryClient, SimulatedRegistry};
///
/// let client = RegistryClient::new(SimulatedRegistry::new(), BaseConfig::default());
/// let ark = client.mint(&[("erc.who", "Quinn")].into_iter().collect()).unwrap();
///
/// let record = client.get(ark.as_str()).unwrap();
/// assert_eq!(record.get("erc.who"), Some("Quinn"));
/// ```
#[derive(Debug, Default)]
pub struct SimulatedRegistry {
    /// Identifier string -> metadata
    records: RwLock<BTreeMap<String, AnvlRecord>>,

    /// Live session cookies
    sessions: RwLock<HashSet<String>>,

    /// Every request received, in order
    log: RwLock<Vec<Request>>,

    /// Mint counter, shared by all shoulders
    minted: AtomicU64,

    /// Session counter
    issued: AtomicU64,

    /// Account required for writes
    account: Option<Credentials>,
}

impl SimulatedRegistry {
    /// Creates an open registry that accepts unauthenticated writes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that requires `credentials` for writes.
    #[must_use]
    pub fn with_account(credentials: Credentials) -> Self {
        Self {
            account: Some(credentials),
            ..Self::default()
        }
    }

    /// Returns the number of stored identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no identifiers are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the stored metadata of `id`.
    #[must_use]
    pub fn record(&self, id: &str) -> Option<AnvlRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Stores an identifier directly, bypassing the protocol.
    pub fn insert(&self, id: impl Into<String>, record: AnvlRecord) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), record);
    }

    /// Returns a copy of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.log.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn is_authorized(&self, request: &Request) -> bool {
        let Some(account) = &self.account else {
            return true;
        };
        if let Some(session) = request.session() {
            return self
                .sessions
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(session);
        }
        request.credentials() == Some(account)
    }

    fn next_blade(&self) -> String {
        let mut n = self.minted.fetch_add(1, Ordering::Relaxed) + 1;
        let radix = BETANUMERIC.len() as u64;
        let mut blade = vec![BETANUMERIC[0]; BLADE_WIDTH];
        for slot in blade.iter_mut().rev() {
            // radix is small, the remainder always indexes the alphabet
            *slot = BETANUMERIC[usize::try_from(n % radix).unwrap_or_default()];
            n /= radix;
        }
        String::from_utf8_lossy(&blade).into_owned()
    }

    fn login(&self, request: &Request) -> Response {
        if self.account.is_none() || request.credentials() != self.account.as_ref() {
            return unauthorized();
        }
        let cookie = format!("sessionid=sim{}", self.issued.fetch_add(1, Ordering::Relaxed));
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cookie.clone());
        Response::new(200, "success: session cookie returned\n").with_session(Some(cookie))
    }

    fn logout(&self, request: &Request) -> Response {
        if let Some(session) = request.session() {
            self.sessions
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(session);
        }
        Response::new(200, "success: authentication credentials flushed\n")
    }

    fn mint(&self, shoulder: &str, body: Option<&str>) -> Response {
        let Ok(base) = BaseConfig::parse(shoulder) else {
            return bad_request("unrecognized shoulder");
        };
        let record = match parse_body(body) {
            Ok(record) => record,
            Err(response) => return response,
        };
        let id = format!("{}{}", base.base(), self.next_blade());
        self.insert(id.clone(), record);
        Response::new(201, format!("success: {id}\n"))
    }

    fn create(&self, id: &str, body: Option<&str>) -> Response {
        let record = match parse_body(body) {
            Ok(record) => record,
            Err(response) => return response,
        };
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if records.contains_key(id) {
            return bad_request("identifier already exists");
        }
        records.insert(id.to_string(), record);
        Response::new(201, format!("success: {id}\n"))
    }

    fn fetch(&self, id: &str) -> Response {
        match self.record(id) {
            Some(record) => Response::new(200, format!("success: {id}\n{}", anvl::encode(&record))),
            None => no_such_identifier(),
        }
    }

    fn modify(&self, id: &str, body: Option<&str>) -> Response {
        let changes = match parse_body(body) {
            Ok(record) => record,
            Err(response) => return response,
        };
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let Some(record) = records.get_mut(id) else {
            return no_such_identifier();
        };
        record.extend(changes);
        Response::new(200, format!("success: {id}\n"))
    }

    fn remove(&self, id: &str) -> Response {
        let removed = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        match removed {
            Some(_) => Response::new(200, format!("success: {id}\n")),
            None => no_such_identifier(),
        }
    }
}

impl Transport for SimulatedRegistry {
    fn send(&self, request: &Request) -> RegistryResult<Response> {
        log::debug!("simulated {} {}", request.method(), request.path());
        self.log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let path = decode_path(request.path());
        let path = path.as_str();
        let body = request.body();

        let response = match (request.method(), path) {
            (Method::Get, "/login") => self.login(request),
            (Method::Get, "/logout") => self.logout(request),
            (Method::Get, _) => match path.strip_prefix("/id/") {
                Some(id) => self.fetch(id),
                None => not_found(),
            },
            (_, _) if !self.is_authorized(request) => unauthorized(),
            (Method::Post, _) => {
                if let Some(shoulder) = path.strip_prefix("/shoulder/") {
                    self.mint(shoulder, body)
                } else if let Some(id) = path.strip_prefix("/id/") {
                    self.modify(id, body)
                } else {
                    not_found()
                }
            }
            (Method::Put, _) => match path.strip_prefix("/id/") {
                Some(id) => self.create(id, body),
                None => not_found(),
            },
            (Method::Delete, _) => match path.strip_prefix("/id/") {
                Some(id) => self.remove(id),
                None => not_found(),
            },
        };
        Ok(response)
    }
}

fn parse_body(body: Option<&str>) -> Result<AnvlRecord, Response> {
    anvl::decode(body.unwrap_or_default(), None)
        .map_err(|e| bad_request(&format!("ANVL parse error ({e})")))
}

fn bad_request(reason: &str) -> Response {
    Response::new(400, format!("error: bad request - {}\n", ark_anvl::escape::encode(reason)))
}

fn no_such_identifier() -> Response {
    bad_request("no such identifier")
}

fn unauthorized() -> Response {
    Response::new(401, "error: unauthorized\n")
}

fn not_found() -> Response {
    Response::new(404, "error: not found\n")
}

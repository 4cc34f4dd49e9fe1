//! Registry client for ARK identifiers and ANVL metadata.
//!
//! This crate speaks the EZID-style registry protocol on top of the
//! [`ark_anvl`] core. It includes:
//!
//! - **Transport trait**: [`Transport`], one request in, one response out
//! - **HTTP transport**: [`ReqwestTransport`] on blocking reqwest
//! - **In-memory registry**: [`SimulatedRegistry`] for tests and offline use
//! - **Operations**: [`RegistryClient`] with mint, create, get, update,
//!   delete, login and logout
//! - **Session storage**: [`SessionStore`] for the login cookie
//!
//! # Protocol
//!
//! | Operation | Verb | Path |
//! |-----------|------|------|
//! | mint | POST | `/shoulder/{base}` |
//! | create | PUT | `/id/{id}` |
//! | get | GET | `/id/{id}` |
//! | update | POST | `/id/{id}` |
//! | delete | DELETE | `/id/{id}` |
//! | login | GET | `/login` |
//! | logout | GET | `/logout` |
//!
//! Bodies are ANVL in both directions. A response must carry a `success`
//! element; an `error` element becomes [`RegistryError::Failed`].
//!
//! # Quick Start
//!
//! ```rust
//! use ark_anvl::BaseConfig;
//! use ark_anvl::marshal::record_from_args;
//! use ark_anvl_client::{RegistryClient, SimulatedRegistry};
//!
//! let client = RegistryClient::new(SimulatedRegistry::new(), BaseConfig::default());
//!
//! let metadata = record_from_args(["erc.who:Quinn", "erc.what:The Eskimo"]).unwrap();
//! let ark = client.mint(&metadata).unwrap();
//! assert!(ark.as_str().starts_with("ark:/99999/fk4"));
//!
//! let changes = record_from_args(["erc.when:1978"]).unwrap();
//! client.update(ark.as_str(), &changes).unwrap();
//!
//! let record = client.get(ark.as_str()).unwrap();
//! assert_eq!(record.get("erc.when"), Some("1978"));
//!
//! client.delete(ark.as_str()).unwrap();
//! assert!(client.get(ark.as_str()).is_err());
//! ```
//!
//! Against a real registry, build the client from a [`ClientConfig`]:
//!
//! ```no_run
//! use ark_anvl::BaseConfig;
//! use ark_anvl_client::{ClientConfig, Credentials, RegistryClient};
//!
//! let config = ClientConfig::new().with_credentials(Credentials::new("apitest", "apitest"));
//! let mut client = RegistryClient::from_config(&config, BaseConfig::default())?;
//! client.login()?;
//! # Ok::<(), ark_anvl_client::RegistryError>(())
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod config;
mod error;
mod http;
mod request;
mod session;
mod simulation;
mod traits;

pub use client::RegistryClient;
pub use config::{ClientConfig, Credentials, DEFAULT_URL, USER_AGENT};
pub use error::{RegistryError, RegistryResult};
pub use http::ReqwestTransport;
pub use request::{Method, Request, Response};
pub use session::{SESSION_FILE_NAME, SessionStore};
pub use simulation::SimulatedRegistry;
pub use traits::Transport;

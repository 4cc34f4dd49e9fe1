//! Transport trait for registry requests.

use crate::{RegistryResult, Request, Response};

/// Abstract request/response exchange with a registry.
///
/// Implementations may speak HTTP ([`ReqwestTransport`](crate::ReqwestTransport))
/// or answer in memory ([`SimulatedRegistry`](crate::SimulatedRegistry)).
///
/// A transport only moves bytes. Any status, including 4xx and 5xx, is
/// returned as a [`Response`]; interpreting the body is the client's job.
pub trait Transport: Send + Sync {
    /// Sends one request and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Network` if no response was received.
    fn send(&self, request: &Request) -> RegistryResult<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &Request) -> RegistryResult<Response> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &Request) -> RegistryResult<Response> {
        (**self).send(request)
    }
}

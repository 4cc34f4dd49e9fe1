//! Configuration for registry access.

use std::fmt;
use std::time::Duration;

/// Default registry endpoint.
pub const DEFAULT_URL: &str = "https://ezid.cdlib.org";

/// User agent for registry requests.
pub const USER_AGENT: &str = concat!("ark-anvl/", env!("CARGO_PKG_VERSION"));

/// HTTP basic credentials.
///
/// The password is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from a user name and password.
    #[must_use]
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns the user name.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Configuration for a registry client.
///
/// Controls the endpoint, timeout and authentication.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registry base URL, without trailing slash.
    ///
    /// Default: `https://ezid.cdlib.org`
    pub url: String,

    /// Request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Basic credentials, sent when no session is held.
    ///
    /// Default: None
    pub credentials: Option<Credentials>,

    /// Session cookie from an earlier login.
    ///
    /// Default: None
    pub session: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
            credentials: None,
            session: None,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the registry URL; a trailing slash is dropped.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.url = url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "https://ezid.cdlib.org");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("ark-anvl/"));
        assert!(config.credentials.is_none());
        assert!(config.session.is_none());
    }

    #[test]
    fn builder_pattern() {
        let config = ClientConfig::new()
            .with_url("http://localhost:8080/")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent")
            .with_credentials(Credentials::new("apitest", "secret"))
            .with_session("sessionid=abc");

        assert_eq!(config.url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.credentials.as_ref().map(Credentials::user), Some("apitest"));
        assert_eq!(config.session.as_deref(), Some("sessionid=abc"));
    }

    #[test]
    fn debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("apitest", "secret"));
        assert!(debug.contains("apitest"));
        assert!(!debug.contains("secret"));
    }
}

//! Base configuration: the NAAN and shoulder that identifiers resolve against.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_NAAN, DEFAULT_SHOULDER, NAAN_LENGTH, SCHEME, SCHEME_COMPACT};
use crate::error::ConfigError;

/// The configured naming authority and shoulder.
///
/// Built once at startup and read thereafter. Both parts are validated on
/// construction, so a `BaseConfig` is always well formed.
///
/// # Examples
///
/// ```
/// use ark_anvl::BaseConfig;
///
/// let base = BaseConfig::default();
/// assert_eq!(base.base(), "ark:/99999/fk4");
///
/// let base = BaseConfig::new("13030", "c7").unwrap();
/// assert_eq!(base.to_string(), "ark:/13030/c7");
///
/// assert!(BaseConfig::new("1303", "c7").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseConfig {
    naan: String,
    shoulder: String,
}

impl BaseConfig {
    /// Creates a base from a NAAN and shoulder.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the NAAN is not exactly five digits or the
    /// shoulder is not letters followed by a single digit.
    pub fn new(naan: &str, shoulder: &str) -> Result<Self, ConfigError> {
        if !is_naan(naan) {
            return Err(ConfigError::InvalidNaan {
                value: naan.to_string(),
            });
        }
        if !is_shoulder(shoulder) {
            return Err(ConfigError::InvalidShoulder {
                value: shoulder.to_string(),
            });
        }
        Ok(Self {
            naan: naan.to_string(),
            shoulder: shoulder.to_string(),
        })
    }

    /// Parses a base written as `[ark:/]NAAN/SHOULDER`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the string has no `/` between NAAN and
    /// shoulder, or either part is invalid.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let rest = input
            .strip_prefix(SCHEME)
            .or_else(|| input.strip_prefix(SCHEME_COMPACT))
            .unwrap_or(input);
        let (naan, shoulder) = rest.split_once('/').ok_or_else(|| ConfigError::InvalidBase {
            value: input.to_string(),
        })?;
        Self::new(naan, shoulder)
    }

    /// Returns a copy with a different NAAN.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the NAAN is invalid.
    pub fn with_naan(self, naan: &str) -> Result<Self, ConfigError> {
        Self::new(naan, &self.shoulder)
    }

    /// Returns a copy with a different shoulder.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the shoulder is invalid.
    pub fn with_shoulder(self, shoulder: &str) -> Result<Self, ConfigError> {
        Self::new(&self.naan, shoulder)
    }

    /// Returns the NAAN.
    #[must_use]
    pub fn naan(&self) -> &str {
        &self.naan
    }

    /// Returns the shoulder.
    #[must_use]
    pub fn shoulder(&self) -> &str {
        &self.shoulder
    }

    /// Returns the scheme used for identifiers under this base.
    #[must_use]
    pub const fn scheme(&self) -> &'static str {
        SCHEME
    }

    /// Returns the full base string, e.g. `ark:/99999/fk4`.
    #[must_use]
    pub fn base(&self) -> String {
        format!("{SCHEME}{}/{}", self.naan, self.shoulder)
    }
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            naan: DEFAULT_NAAN.to_string(),
            shoulder: DEFAULT_SHOULDER.to_string(),
        }
    }
}

impl fmt::Display for BaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.naan, self.shoulder)
    }
}

impl FromStr for BaseConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BaseConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BaseConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Returns true if `s` is exactly five ASCII digits.
pub(crate) fn is_naan(s: &str) -> bool {
    s.len() == NAAN_LENGTH && s.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `s` is one or more ASCII letters followed by one digit.
pub(crate) fn is_shoulder(s: &str) -> bool {
    shoulder_len(s) == Some(s.len())
}

/// Length of the leading `letters digit` run of `s`, if it has one.
pub(crate) fn shoulder_len(s: &str) -> Option<usize> {
    let letters = s.bytes().take_while(u8::is_ascii_alphabetic).count();
    if letters == 0 {
        return None;
    }
    match s.as_bytes().get(letters) {
        Some(b) if b.is_ascii_digit() => Some(letters + 1),
        _ => None,
    }
}

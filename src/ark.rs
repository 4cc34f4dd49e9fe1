//! ARK identifiers and resolution against a configured base.

use std::cmp::Ordering;
use std::fmt;

use crate::base::{BaseConfig, shoulder_len};
use crate::constants::{MIN_SEGMENT_LENGTH, NAAN_LENGTH, SCHEME, SCHEME_COMPACT};
use crate::error::{IdentifierError, IdentifierErrorKind};

/// Which rule decided the shoulder/blade split of a resolved identifier.
///
/// The rules are tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShoulderSource {
    /// The input named its own NAAN, so its shoulder (if any) was taken as is.
    Explicit,
    /// The input began with the configured shoulder.
    BaseMatch,
    /// The input was a bare blade; the configured shoulder was prepended.
    BareBlade,
}

/// A fully-qualified ARK identifier.
///
/// Produced by [`Ark::resolve`], which expands shorthand input against a
/// [`BaseConfig`]. No checksum or parity check is applied to the blade.
///
/// # Structure
///
/// ```text
/// ark:/<naan>/<shoulder><blade>[/<extension>]
/// ```
///
/// # Examples
///
/// ```
/// use ark_anvl::{Ark, BaseConfig, ShoulderSource};
///
/// let base = BaseConfig::default();
///
/// let ark = Ark::resolve(&base, "qc17z06").unwrap();
/// assert_eq!(ark.as_str(), "ark:/99999/fk4qc17z06");
/// assert_eq!(ark.source(), ShoulderSource::BareBlade);
///
/// let ark = Ark::resolve(&base, "ark:/13030/c7x2w/page1").unwrap();
/// assert_eq!(ark.naan(), "13030");
/// assert_eq!(ark.shoulder(), "c7");
/// assert_eq!(ark.blade(), "x2w");
/// assert_eq!(ark.extension(), Some("/page1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ark {
    scheme: String,
    naan: String,
    shoulder: String,
    blade: String,
    extension: Option<String>,
    source: ShoulderSource,
    /// Normalized string representation
    normalized: String,
}

/// Structural fields of the input before any defaulting.
#[derive(Debug, PartialEq, Eq)]
struct Matched<'a> {
    scheme: Option<&'a str>,
    naan: Option<&'a str>,
    segment: &'a str,
    extension: Option<&'a str>,
}

impl Ark {
    /// Resolves user input to a fully-qualified identifier.
    ///
    /// Scheme and NAAN default to the base's when absent; without a NAAN the
    /// base scheme is used even if the input wrote `ark:`. The shoulder is
    /// chosen by the first matching [`ShoulderSource`] rule. Only input that
    /// names a NAAN keeps a shoulder other than the base's, so `b5xyz` is a
    /// blade on the base shoulder.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if:
    /// - The input is empty
    /// - Nothing follows the scheme or NAAN
    /// - The blade contains anything but ASCII letters and digits
    /// - The blade is shorter than two characters
    pub fn resolve(base: &BaseConfig, input: &str) -> Result<Self, IdentifierError> {
        let matched = Self::match_structure(input).map_err(|kind| IdentifierError::new(input, kind))?;

        // a NAAN taken from the base brings the base scheme with it
        let (scheme, naan) = match matched.naan {
            Some(naan) => (matched.scheme.unwrap_or(base.scheme()), naan),
            None => (base.scheme(), base.naan()),
        };
        let (shoulder, blade, source) = Self::split_shoulder(base, &matched);
        log::trace!("resolved '{input}' with shoulder '{shoulder}' via {source:?}");

        let extension = matched.extension.map(str::to_string);
        let mut normalized = format!("{scheme}{naan}/{shoulder}{blade}");
        if let Some(ext) = &extension {
            normalized.push_str(ext);
        }

        Ok(Self {
            scheme: scheme.to_string(),
            naan: naan.to_string(),
            shoulder: shoulder.to_string(),
            blade: blade.to_string(),
            extension,
            source,
            normalized,
        })
    }

    /// Returns the scheme prefix, normally `ark:/`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the NAAN.
    #[must_use]
    pub fn naan(&self) -> &str {
        &self.naan
    }

    /// Returns the shoulder; empty when an explicit identifier has none.
    #[must_use]
    pub fn shoulder(&self) -> &str {
        &self.shoulder
    }

    /// Returns the blade.
    #[must_use]
    pub fn blade(&self) -> &str {
        &self.blade
    }

    /// Returns the last character of the blade (the check-character position).
    #[must_use]
    pub fn tip(&self) -> char {
        // blade is never empty after resolution
        self.blade.chars().next_back().unwrap_or_default()
    }

    /// Returns the extension, including its leading `/`.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Returns the rule that decided the shoulder.
    #[must_use]
    pub const fn source(&self) -> ShoulderSource {
        self.source
    }

    /// Returns the identifier without its extension.
    #[must_use]
    pub fn id(&self) -> &str {
        let ext_len = self.extension.as_ref().map_or(0, String::len);
        &self.normalized[..self.normalized.len() - ext_len]
    }

    /// Returns the full identifier string, extension included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    fn match_structure(input: &str) -> Result<Matched<'_>, IdentifierErrorKind> {
        if input.is_empty() {
            return Err(IdentifierErrorKind::Empty);
        }

        let (scheme, rest) = if let Some(rest) = input.strip_prefix(SCHEME) {
            (Some(SCHEME), rest)
        } else if let Some(rest) = input.strip_prefix(SCHEME_COMPACT) {
            (Some(SCHEME_COMPACT), rest)
        } else {
            (None, input)
        };

        let (naan, rest) = Self::split_naan(rest);

        let (segment, extension) = match rest.find('/') {
            Some(idx) => (&rest[..idx], Some(&rest[idx..])),
            None => (rest, None),
        };

        if segment.is_empty() {
            return Err(IdentifierErrorKind::MissingBlade);
        }

        let offset = input.len() - rest.len();
        for (i, c) in segment.char_indices() {
            if !c.is_ascii_alphanumeric() {
                return Err(IdentifierErrorKind::InvalidChar {
                    char: c,
                    position: offset + i,
                });
            }
        }

        if segment.len() < MIN_SEGMENT_LENGTH {
            return Err(IdentifierErrorKind::TooShort {
                min: MIN_SEGMENT_LENGTH,
                actual: segment.len(),
            });
        }

        Ok(Matched {
            scheme,
            naan,
            segment,
            extension,
        })
    }

    fn split_naan(input: &str) -> (Option<&str>, &str) {
        let bytes = input.as_bytes();
        let is_naan = bytes.len() > NAAN_LENGTH
            && bytes[..NAAN_LENGTH].iter().all(u8::is_ascii_digit)
            && bytes[NAAN_LENGTH] == b'/';
        if is_naan {
            (Some(&input[..NAAN_LENGTH]), &input[NAAN_LENGTH + 1..])
        } else {
            (None, input)
        }
    }

    fn split_shoulder<'a>(
        base: &'a BaseConfig,
        matched: &Matched<'a>,
    ) -> (&'a str, &'a str, ShoulderSource) {
        let segment = matched.segment;

        if matched.naan.is_some() {
            return match shoulder_len(segment) {
                Some(n) if n < segment.len() => {
                    (&segment[..n], &segment[n..], ShoulderSource::Explicit)
                }
                _ => ("", segment, ShoulderSource::Explicit),
            };
        }

        match segment.strip_prefix(base.shoulder()) {
            Some(blade) if !blade.is_empty() => (base.shoulder(), blade, ShoulderSource::BaseMatch),
            _ => (base.shoulder(), segment, ShoulderSource::BareBlade),
        }
    }
}

/// Resolves `input` against `base`; shorthand for [`Ark::resolve`].
///
/// # Errors
///
/// Returns `IdentifierError` if the input does not match the identifier
/// grammar.
pub fn resolve(base: &BaseConfig, input: &str) -> Result<Ark, IdentifierError> {
    Ark::resolve(base, input)
}

impl BaseConfig {
    /// Resolves `input` against this base.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the input does not match the identifier
    /// grammar.
    pub fn resolve(&self, input: &str) -> Result<Ark, IdentifierError> {
        Ark::resolve(self, input)
    }
}

impl fmt::Display for Ark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

impl AsRef<str> for Ark {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl PartialOrd for Ark {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ark {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Ark {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

/// Deserializes against the default base; fully-qualified strings are kept
/// unchanged.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Ark {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::resolve(&BaseConfig::default(), &s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseConfig {
        BaseConfig::new("99999", "fk4").unwrap()
    }

    #[test]
    fn shorthand_with_base_shoulder() {
        let ark = Ark::resolve(&base(), "fk4qc17z06").unwrap();
        assert_eq!(ark.as_str(), "ark:/99999/fk4qc17z06");
        assert_eq!(ark.source(), ShoulderSource::BaseMatch);
        assert_eq!(ark.blade(), "qc17z06");
        assert_eq!(ark.tip(), '6');
    }

    #[test]
    fn fully_qualified_is_unchanged() {
        let ark = Ark::resolve(&base(), "ark:/99999/fk4qc17z06").unwrap();
        assert_eq!(ark.as_str(), "ark:/99999/fk4qc17z06");
        assert_eq!(ark.source(), ShoulderSource::Explicit);
        assert_eq!(ark.shoulder(), "fk4");
    }

    #[test]
    fn bare_blade_gets_base_shoulder() {
        let ark = Ark::resolve(&base(), "qc17z06").unwrap();
        assert_eq!(ark.as_str(), "ark:/99999/fk4qc17z06");
        assert_eq!(ark.source(), ShoulderSource::BareBlade);
        assert_eq!(ark.blade(), "qc17z06");
    }

    #[test]
    fn other_naan_and_shoulder_untouched() {
        let ark = Ark::resolve(&base(), "ark:/13030/c7x2w").unwrap();
        assert_eq!(ark.as_str(), "ark:/13030/c7x2w");
        assert_eq!(ark.shoulder(), "c7");
        assert_eq!(ark.blade(), "x2w");
    }

    #[test]
    fn naan_without_scheme_gets_scheme() {
        let ark = Ark::resolve(&base(), "13030/c7x2w").unwrap();
        assert_eq!(ark.as_str(), "ark:/13030/c7x2w");
    }

    #[test]
    fn explicit_naan_without_shoulder_pattern() {
        let ark = Ark::resolve(&base(), "ark:/13030/12345").unwrap();
        assert_eq!(ark.shoulder(), "");
        assert_eq!(ark.blade(), "12345");
        assert_eq!(ark.as_str(), "ark:/13030/12345");
    }

    #[test]
    fn explicit_segment_that_is_only_a_shoulder() {
        let ark = Ark::resolve(&base(), "ark:/13030/c7").unwrap();
        assert_eq!(ark.shoulder(), "");
        assert_eq!(ark.blade(), "c7");
    }

    #[test]
    fn scheme_without_naan_uses_base_naan() {
        let ark = Ark::resolve(&base(), "ark:/fk4abc").unwrap();
        assert_eq!(ark.as_str(), "ark:/99999/fk4abc");
    }

    #[test]
    fn compact_scheme_is_kept() {
        let ark = Ark::resolve(&base(), "ark:13030/c7x2w").unwrap();
        assert_eq!(ark.scheme(), "ark:");
        assert_eq!(ark.as_str(), "ark:13030/c7x2w");
    }

    #[test]
    fn compact_scheme_without_naan_takes_base_form() {
        let ark = Ark::resolve(&base(), "ark:fk4abc").unwrap();
        assert_eq!(ark.scheme(), "ark:/");
        assert_eq!(ark.as_str(), "ark:/99999/fk4abc");
    }

    #[test]
    fn foreign_shoulder_without_naan_is_a_blade() {
        let ark = Ark::resolve(&base(), "ark:/b5xyz").unwrap();
        assert_eq!(ark.as_str(), "ark:/99999/fk4b5xyz");
        assert_eq!(ark.source(), ShoulderSource::BareBlade);
        assert_eq!(ark.blade(), "b5xyz");

        let ark = Ark::resolve(&base(), "b5xyz").unwrap();
        assert_eq!(ark.as_str(), "ark:/99999/fk4b5xyz");
        assert_eq!(ark.source(), ShoulderSource::BareBlade);
    }

    #[test]
    fn extension_is_appended() {
        let ark = Ark::resolve(&base(), "qc17z06/page/2.pdf").unwrap();
        assert_eq!(ark.as_str(), "ark:/99999/fk4qc17z06/page/2.pdf");
        assert_eq!(ark.id(), "ark:/99999/fk4qc17z06");
        assert_eq!(ark.extension(), Some("/page/2.pdf"));
    }

    #[test]
    fn base_shoulder_alone_is_bare_blade() {
        let ark = Ark::resolve(&base(), "fk4").unwrap();
        assert_eq!(ark.source(), ShoulderSource::BareBlade);
        assert_eq!(ark.as_str(), "ark:/99999/fk4fk4");
    }

    #[test]
    fn invalid_chars_rejected() {
        let err = Ark::resolve(&base(), "not-an-ark!!").unwrap_err();
        assert_eq!(
            err.kind,
            IdentifierErrorKind::InvalidChar {
                char: '-',
                position: 3
            }
        );
    }

    #[test]
    fn empty_rejected() {
        let err = Ark::resolve(&base(), "").unwrap_err();
        assert_eq!(err.kind, IdentifierErrorKind::Empty);
    }

    #[test]
    fn missing_blade_rejected() {
        let err = Ark::resolve(&base(), "ark:/99999/").unwrap_err();
        assert_eq!(err.kind, IdentifierErrorKind::MissingBlade);
        let err = Ark::resolve(&base(), "ark:/").unwrap_err();
        assert_eq!(err.kind, IdentifierErrorKind::MissingBlade);
    }

    #[test]
    fn single_char_rejected() {
        let err = Ark::resolve(&base(), "x").unwrap_err();
        assert!(matches!(err.kind, IdentifierErrorKind::TooShort { min: 2, actual: 1 }));
    }

    #[test]
    fn invalid_char_position_counts_prefix() {
        let err = Ark::resolve(&base(), "ark:/99999/fk4_x").unwrap_err();
        assert_eq!(
            err.kind,
            IdentifierErrorKind::InvalidChar {
                char: '_',
                position: 14
            }
        );
    }

    #[test]
    fn ordering_follows_string() {
        let a = Ark::resolve(&base(), "aa").unwrap();
        let b = Ark::resolve(&base(), "bb").unwrap();
        assert!(a < b);
    }

    #[test]
    fn base_config_resolve_shorthand() {
        let ark = base().resolve("qc17z06").unwrap();
        assert_eq!(ark.to_string(), "ark:/99999/fk4qc17z06");
    }
}

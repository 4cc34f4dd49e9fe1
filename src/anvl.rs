//! ANVL record type and line-oriented codec.
//!
//! An ANVL document is a sequence of `name: value` lines. A line starting
//! with spaces or tabs continues the value of the element above it, and a
//! line starting with `#` is a comment:
//!
//! ```text
//! # descriptive metadata
//! erc.who: Quinn
//! erc.what: The Eskimo,
//!     really
//! erc.when: 1968
//! ```
//!
//! Values are unescaped through [`escape::decode`](crate::escape::decode);
//! names are only trimmed.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::str::FromStr;

use crate::constants::ARK_KEY;
use crate::error::{ParseError, ParseErrorKind};
use crate::escape;

/// A decoded ANVL record.
///
/// Maps element names to element values. Names are unique and iteration is
/// sorted by name, so encoding is deterministic.
///
/// # Examples
///
/// ```
/// use ark_anvl::AnvlRecord;
///
/// let record = AnvlRecord::parse("erc.who: Quinn\nerc.what: Eskimo").unwrap();
/// assert_eq!(record.get("erc.who"), Some("Quinn"));
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.to_string(), "erc.what: Eskimo\nerc.who: Quinn\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AnvlRecord {
    elements: BTreeMap<String, String>,
}

impl AnvlRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a record from ANVL text.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` on a continuation line with no open element or
    /// on a line that is not a comment, continuation or `name: value` pair.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        decode(input, None)
    }

    /// Returns the value of an element, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.elements.get(name).map(String::as_str)
    }

    /// Sets an element, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.elements.insert(name.into(), value.into())
    }

    /// Removes an element, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.elements.remove(name)
    }

    /// Returns true if the element is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// Returns true if the record has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns an iterator over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.elements.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the associated identifier stored under `ark`.
    #[must_use]
    pub fn ark(&self) -> Option<&str> {
        self.get(ARK_KEY)
    }

    /// Stores `ark` under the reserved key unless the record already has one.
    pub fn set_ark_fallback(&mut self, ark: &str) {
        self.elements
            .entry(ARK_KEY.to_string())
            .or_insert_with(|| ark.to_string());
    }

    /// Encodes the record as ANVL text, one line per element.
    #[must_use]
    pub fn to_anvl(&self) -> String {
        encode(self)
    }
}

impl fmt::Display for AnvlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.elements {
            writeln!(f, "{}: {}", escape::encode(name), escape::encode(value))?;
        }
        Ok(())
    }
}

impl FromStr for AnvlRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnvlRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            elements: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for AnvlRecord {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.elements
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for AnvlRecord {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Classification of a single input line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Comment,
    Blank,
    Continuation(&'a str),
    Element { name: &'a str, value: &'a str },
    Unknown,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if line.starts_with('#') {
            return Self::Comment;
        }
        if line.is_empty() {
            return Self::Blank;
        }
        if line.starts_with(is_horizontal_space) {
            return Self::Continuation(line.trim_start_matches(is_horizontal_space));
        }
        match line.find(':') {
            Some(idx) if idx > 0 => {
                let name = line[..idx].trim();
                if name.is_empty() {
                    return Self::Unknown;
                }
                let value = line[idx + 1..].trim_start_matches(is_horizontal_space);
                Self::Element { name, value }
            }
            _ => Self::Unknown,
        }
    }
}

const fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Decoder state: either no element is open, or one is collecting its value.
enum State<'a> {
    Idle,
    InValue { name: &'a str, raw: String },
}

/// Decodes ANVL text into a fresh record.
///
/// A line of spaces or tabs only is a continuation with empty text: it adds
/// one space to the open value, or fails when no element is open.
///
/// When `ark_override` is given it is stored under `ark`, unless the text
/// itself defines `ark`, in which case the text wins.
///
/// # Errors
///
/// Returns `ParseError` for a continuation line with no open element or for
/// any line that is not a comment, continuation, blank or `name: value`.
///
/// # Examples
///
/// ```
/// use ark_anvl::anvl;
///
/// let record = anvl::decode("erc.who: Quinn\n  the Eskimo", Some("ark:/99999/fk4x")).unwrap();
/// assert_eq!(record.get("erc.who"), Some("Quinn the Eskimo"));
/// assert_eq!(record.ark(), Some("ark:/99999/fk4x"));
///
/// assert!(anvl::decode("erc.who Quinn", None).is_err());
/// ```
pub fn decode(input: &str, ark_override: Option<&str>) -> Result<AnvlRecord, ParseError> {
    let mut record = AnvlRecord::new();
    let mut state = State::Idle;

    for (idx, raw_line) in input.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let number = idx + 1;

        match Line::classify(line) {
            Line::Comment => log::trace!("skipping comment at line {number}"),
            Line::Blank => {}
            Line::Continuation(text) => match &mut state {
                State::InValue { raw, .. } => {
                    raw.push(' ');
                    raw.push_str(text);
                }
                State::Idle => {
                    return Err(ParseError::new(number, line, ParseErrorKind::BadContinuation));
                }
            },
            Line::Element { name, value } => {
                let next = State::InValue {
                    name,
                    raw: value.to_string(),
                };
                commit(&mut record, std::mem::replace(&mut state, next));
            }
            Line::Unknown => {
                return Err(ParseError::new(number, line, ParseErrorKind::UnknownLine));
            }
        }
    }
    commit(&mut record, state);

    if let Some(ark) = ark_override {
        record.set_ark_fallback(ark);
    }

    Ok(record)
}

fn commit(record: &mut AnvlRecord, state: State<'_>) {
    if let State::InValue { name, raw } = state {
        record.insert(name, escape::decode(&raw));
    }
}

/// Encodes a record as ANVL text.
///
/// Each element becomes one `name: value` line with both sides escaped.
/// Continuation lines are never emitted.
#[must_use]
pub fn encode(record: &AnvlRecord) -> String {
    record.to_string()
}

//! CSV projection of ANVL records.

use std::fmt;
use std::str::FromStr;

use crate::anvl::AnvlRecord;

/// Ordered list of record elements to project into CSV columns.
///
/// Parsed from the colon-separated form used on the command line
/// (`ark:erc.who:erc.what`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns(Vec<String>);

impl Columns {
    /// Creates a column list from element names.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Parses a colon-separated column list.
    ///
    /// Returns `None` if the list is empty or any name is empty.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let names: Vec<String> = text.split(':').map(str::to_string).collect();
        if names.iter().any(String::is_empty) {
            return None;
        }
        Some(Self(names))
    }

    /// Returns the column names in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Returns the header row for these columns.
    #[must_use]
    pub fn header(&self) -> String {
        header_row(&self.0)
    }

    /// Returns the row for `record` under these columns.
    #[must_use]
    pub fn row(&self, record: &AnvlRecord) -> String {
        project_row(record, &self.0)
    }
}

impl fmt::Display for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

impl FromStr for Columns {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid column list '{s}': names must be non-empty"))
    }
}

/// Quotes a field if it contains a comma, double quote or line feed.
///
/// # Examples
///
/// ```
/// use ark_anvl::csv::escape_field;
///
/// assert_eq!(escape_field("Quinn"), "Quinn");
/// assert_eq!(escape_field("The Eskimo, really"), "\"The Eskimo, really\"");
/// assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
#[must_use]
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Projects `record` onto `columns` as a single CSV row.
///
/// Missing elements become empty fields. No trailing newline is added.
///
/// # Examples
///
/// ```
/// use ark_anvl::{AnvlRecord, csv};
///
/// let record = AnvlRecord::parse("who: Quinn\nwhat: The Eskimo, really").unwrap();
/// assert_eq!(csv::project_row(&record, &["who", "what"]), "Quinn,\"The Eskimo, really\"");
/// assert_eq!(csv::project_row(&record, &["who", "when"]), "Quinn,");
/// ```
#[must_use]
pub fn project_row<S: AsRef<str>>(record: &AnvlRecord, columns: &[S]) -> String {
    columns
        .iter()
        .map(|name| escape_field(record.get(name.as_ref()).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Joins raw column names into a header row.
#[must_use]
pub fn header_row<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

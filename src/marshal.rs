//! Conversion between records and argument lists or JSON objects.

use crate::anvl::AnvlRecord;
use crate::error::MarshalError;

/// Builds a record from `name:value` arguments.
///
/// Each argument is split at its first colon. The name is trimmed and
/// leading spaces or tabs are stripped from the value. Later arguments
/// override earlier ones with the same name.
///
/// # Errors
///
/// Returns `MarshalError` if an argument has no colon or an empty name.
///
/// # Examples
///
/// ```
/// use ark_anvl::marshal::record_from_args;
///
/// let record = record_from_args(["erc.who:Quinn", "_target: http://example.org"]).unwrap();
/// assert_eq!(record.get("erc.who"), Some("Quinn"));
/// assert_eq!(record.get("_target"), Some("http://example.org"));
/// ```
pub fn record_from_args<I, S>(args: I) -> Result<AnvlRecord, MarshalError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut record = AnvlRecord::new();
    for arg in args {
        let arg = arg.as_ref();
        let (name, value) = arg
            .split_once(':')
            .ok_or_else(|| MarshalError::MissingSeparator {
                arg: arg.to_string(),
            })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(MarshalError::EmptyName {
                arg: arg.to_string(),
            });
        }
        record.insert(name, value.trim_start_matches([' ', '\t']));
    }
    Ok(record)
}

/// Parses a flat JSON object of strings into a record.
///
/// # Errors
///
/// Returns `MarshalError::Json` if the text is not valid JSON, is not an
/// object, or has a non-string value.
#[cfg(feature = "serde")]
pub fn record_from_json(text: &str) -> Result<AnvlRecord, MarshalError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| MarshalError::Json {
        message: e.to_string(),
    })?;
    let serde_json::Value::Object(map) = value else {
        return Err(MarshalError::Json {
            message: "expected a JSON object".to_string(),
        });
    };

    let mut record = AnvlRecord::new();
    for (name, value) in map {
        let serde_json::Value::String(value) = value else {
            return Err(MarshalError::Json {
                message: format!("value of '{name}' is not a string"),
            });
        };
        record.insert(name, value);
    }
    Ok(record)
}

/// Serializes a record as a pretty-printed JSON object.
///
/// # Errors
///
/// Returns `MarshalError::Json` if serialization fails.
#[cfg(feature = "serde")]
pub fn record_to_json(record: &AnvlRecord) -> Result<String, MarshalError> {
    serde_json::to_string_pretty(record).map_err(|e| MarshalError::Json {
        message: e.to_string(),
    })
}

//! Error types for ANVL decoding, ARK resolution and record marshaling.

use std::fmt;

/// Errors that can occur when decoding ANVL text.
///
/// A failed decode never yields a partial record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based number of the offending line
    pub line: usize,
    /// The offending line as it appeared in the input
    pub content: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific ANVL parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Continuation line with no element open to continue
    BadContinuation,
    /// Line is neither a comment, a continuation nor a `name: value` pair
    UnknownLine,
}

impl ParseError {
    pub(crate) fn new(line: usize, content: &str, kind: ParseErrorKind) -> Self {
        Self {
            line,
            content: content.to_string(),
            kind,
        }
    }

    /// Returns true if the error is a continuation with no open element.
    #[must_use]
    pub const fn is_bad_continuation(&self) -> bool {
        matches!(self.kind, ParseErrorKind::BadContinuation)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::BadContinuation => write!(
                f,
                "bad continuation at line {}: '{}' continues no element",
                self.line, self.content
            ),
            ParseErrorKind::UnknownLine => write!(
                f,
                "unknown line {}: '{}'; expected 'name: value', a continuation, or a comment",
                self.line, self.content
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur when resolving an ARK identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierError {
    /// The input that failed to resolve
    pub input: String,
    /// The specific error that occurred
    pub kind: IdentifierErrorKind,
}

/// Specific identifier error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierErrorKind {
    /// Input is empty
    Empty,
    /// Blade segment is missing (input ends after the scheme or NAAN)
    MissingBlade,
    /// Blade segment is shorter than blade plus tip
    TooShort {
        /// Minimum segment length
        min: usize,
        /// Actual segment length
        actual: usize,
    },
    /// Character outside the identifier alphabet
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl IdentifierError {
    pub(crate) fn new(input: &str, kind: IdentifierErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ARK '{}': ", self.input)?;
        match &self.kind {
            IdentifierErrorKind::Empty => write!(f, "input is empty"),
            IdentifierErrorKind::MissingBlade => write!(f, "no blade after scheme or NAAN"),
            IdentifierErrorKind::TooShort { min, actual } => {
                write!(f, "blade has {actual} characters, at least {min} required")
            }
            IdentifierErrorKind::InvalidChar { char, position } => {
                write!(
                    f,
                    "unexpected character '{char}' at position {position}; blades are letters and digits"
                )
            }
        }
    }
}

impl std::error::Error for IdentifierError {}

/// Errors for base configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// NAAN is not exactly five digits
    InvalidNaan {
        /// The rejected value
        value: String,
    },
    /// Shoulder is not letters followed by one digit
    InvalidShoulder {
        /// The rejected value
        value: String,
    },
    /// Base string could not be split into NAAN and shoulder
    InvalidBase {
        /// The rejected value
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNaan { value } => {
                write!(f, "invalid NAAN '{value}': expected exactly 5 digits")
            }
            Self::InvalidShoulder { value } => {
                write!(
                    f,
                    "invalid shoulder '{value}': expected letters followed by one digit"
                )
            }
            Self::InvalidBase { value } => {
                write!(f, "invalid base '{value}': expected [ark:/]NAAN/SHOULDER")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors when converting between records and other representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarshalError {
    /// Argument has no `:` separating name from value
    MissingSeparator {
        /// The argument
        arg: String,
    },
    /// Argument has an empty element name
    EmptyName {
        /// The argument
        arg: String,
    },
    /// JSON text is not a flat object of strings
    Json {
        /// Error message
        message: String,
    },
}

impl fmt::Display for MarshalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { arg } => {
                write!(f, "argument '{arg}' is not of the form name:value")
            }
            Self::EmptyName { arg } => write!(f, "argument '{arg}' has an empty name"),
            Self::Json { message } => write!(f, "invalid JSON record: {message}"),
        }
    }
}

impl std::error::Error for MarshalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_names_line() {
        let err = ParseError::new(3, "erc.who Quinn", ParseErrorKind::UnknownLine);
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("erc.who Quinn"));
        assert!(!err.is_bad_continuation());
    }

    #[test]
    fn bad_continuation_display() {
        let err = ParseError::new(1, "  more", ParseErrorKind::BadContinuation);
        assert!(err.to_string().contains("bad continuation"));
        assert!(err.is_bad_continuation());
    }

    #[test]
    fn identifier_error_display() {
        let err = IdentifierError::new(
            "not-an-ark!!",
            IdentifierErrorKind::InvalidChar {
                char: '-',
                position: 3,
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("not-an-ark!!"));
        assert!(msg.contains("position 3"));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidNaan {
            value: "1234".to_string(),
        };
        assert!(err.to_string().contains("5 digits"));
    }
}

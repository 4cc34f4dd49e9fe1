//! Constants for ARK resolution and ANVL encoding.

/// The ARK scheme label as written in fully-qualified identifiers.
pub const SCHEME: &str = "ark:/";

/// Compact scheme form (`ark:` without the slash), accepted on input.
pub const SCHEME_COMPACT: &str = "ark:";

/// Number of digits in a Name Assigning Authority Number.
pub const NAAN_LENGTH: usize = 5;

/// NAAN used when none is configured (the test authority).
pub const DEFAULT_NAAN: &str = "99999";

/// Shoulder used when none is configured (the test shoulder).
pub const DEFAULT_SHOULDER: &str = "fk4";

/// Minimum length of the blade segment (blade body plus tip).
pub const MIN_SEGMENT_LENGTH: usize = 2;

/// Reserved record element holding the associated identifier.
pub const ARK_KEY: &str = "ark";

/// Element the registry uses to signal a successful operation.
pub const SUCCESS_KEY: &str = "success";

/// Element the registry uses to signal a failed operation.
pub const ERROR_KEY: &str = "error";

/// Characters the escaping codec protects.
pub const RESERVED_CHARS: [char; 4] = ['%', ':', '\n', '\r'];

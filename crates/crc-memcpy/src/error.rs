//! Error types.
//!
//! The copy path has no error type: every precondition is a caller contract.
//! The only fallible operations are the string parsers used by configuration.

use core::fmt;

/// A configuration string did not name a known value.
///
/// ```
/// use crc_memcpy::EngineKind;
///
/// let err = "turbo".parse::<EngineKind>().unwrap_err();
/// assert_eq!(err.to_string(), "unknown engine kind; expected one of: fallback, accelerated, nontemporal");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct ParseError {
  what: &'static str,
  expected: &'static str,
}

impl ParseError {
  #[inline]
  #[must_use]
  pub(crate) const fn new(what: &'static str, expected: &'static str) -> Self {
    Self { what, expected }
  }

  /// What was being parsed, e.g. `"engine kind"`.
  #[inline]
  #[must_use]
  pub const fn what(&self) -> &'static str {
    self.what
  }

  /// The accepted spellings.
  #[inline]
  #[must_use]
  pub const fn expected(&self) -> &'static str {
    self.expected
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown {}; expected one of: {}", self.what, self.expected)
  }
}

impl core::error::Error for ParseError {}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::string::ToString;

  use super::*;

  #[test]
  fn display_lists_expected_values() {
    let err = ParseError::new("copy policy", "auto, temporal, nontemporal");
    assert_eq!(err.to_string(), "unknown copy policy; expected one of: auto, temporal, nontemporal");
    assert_eq!(err.what(), "copy policy");
  }

  #[test]
  fn is_std_error() {
    fn assert_error<E: core::error::Error + Send + Sync + 'static>() {}
    assert_error::<ParseError>();
  }
}

//! Temporal vs non-temporal store policy for the facade.

use core::{fmt, str::FromStr};

use crate::error::ParseError;

/// How the facade picks between the cache-friendly and cache-bypassing engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CopyPolicy {
  /// Non-temporal for copies of at least the configured threshold, temporal
  /// otherwise.
  #[default]
  Auto,
  /// Always the temporal engine; the copy stays in cache.
  Temporal,
  /// Always the non-temporal engine; the destination bypasses the cache.
  NonTemporal,
}

impl CopyPolicy {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Temporal => "temporal",
      Self::NonTemporal => "nontemporal",
    }
  }

  /// Whether a copy of `len` bytes should use the non-temporal engine.
  #[inline]
  #[must_use]
  pub const fn prefers_non_temporal(self, len: usize, threshold: usize) -> bool {
    match self {
      Self::Auto => len >= threshold,
      Self::Temporal => false,
      Self::NonTemporal => true,
    }
  }
}

impl fmt::Display for CopyPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for CopyPolicy {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("auto") {
      Ok(Self::Auto)
    } else if s.eq_ignore_ascii_case("temporal") {
      Ok(Self::Temporal)
    } else if s.eq_ignore_ascii_case("nontemporal") || s.eq_ignore_ascii_case("non-temporal") {
      Ok(Self::NonTemporal)
    } else {
      Err(ParseError::new("copy policy", "auto, temporal, nontemporal"))
    }
  }
}

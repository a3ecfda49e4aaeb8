//! The copy-and-checksum engine abstraction.

use core::{fmt, str::FromStr};

use checksum::Crc32cValue;

use crate::{error::ParseError, fallback::FallbackEngine, lanes::LaneEngine, non_temporal::NonTemporalEngine};

/// Engine family, as named by configuration and the test factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineKind {
  /// Portable checksum-then-copy over fixed-size blocks.
  Fallback,
  /// Temporal engine interleaving hardware CRC lanes with the copy.
  Accelerated,
  /// Checksum-then-copy with cache-bypassing stores.
  NonTemporal,
}

impl EngineKind {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Fallback => "fallback",
      Self::Accelerated => "accelerated",
      Self::NonTemporal => "nontemporal",
    }
  }
}

impl fmt::Display for EngineKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EngineKind {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("fallback") || s.eq_ignore_ascii_case("portable") {
      Ok(Self::Fallback)
    } else if s.eq_ignore_ascii_case("accelerated") || s.eq_ignore_ascii_case("lanes") {
      Ok(Self::Accelerated)
    } else if s.eq_ignore_ascii_case("nontemporal") || s.eq_ignore_ascii_case("non-temporal") {
      Ok(Self::NonTemporal)
    } else {
      Err(ParseError::new("engine kind", "fallback, accelerated, nontemporal"))
    }
  }
}

/// A stateless copy-and-checksum strategy.
///
/// Every variant copies `src` into `dst` byte for byte and returns
/// `extend_crc32c(initial, src)`. Variants differ only in speed and in how
/// the destination interacts with the cache.
///
/// ```
/// use checksum::{Crc32cValue, compute_crc32c};
/// use crc_memcpy::{Engine, FallbackEngine};
///
/// let engine = Engine::Fallback(FallbackEngine);
/// let mut dst = [0u8; 11];
/// let crc = engine.compute(&mut dst, b"hello world", Crc32cValue::ZERO);
/// assert_eq!(&dst, b"hello world");
/// assert_eq!(crc, compute_crc32c(b"hello world"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
  Fallback(FallbackEngine),
  Lanes(LaneEngine),
  NonTemporal(NonTemporalEngine),
}

impl Engine {
  /// Copy `src` into `dst` and extend `initial` over the copied bytes.
  ///
  /// # Panics
  ///
  /// Panics if `dst` and `src` have different lengths.
  #[inline]
  pub fn compute(&self, dst: &mut [u8], src: &[u8], initial: Crc32cValue) -> Crc32cValue {
    match self {
      Self::Fallback(e) => e.compute(dst, src, initial),
      Self::Lanes(e) => e.compute(dst, src, initial),
      Self::NonTemporal(e) => e.compute(dst, src, initial),
    }
  }

  /// Raw-pointer form of [`compute`](Self::compute).
  ///
  /// # Safety
  ///
  /// When `len > 0`: `src` must be valid for reads of `len` bytes, `dst`
  /// must be valid for writes of `len` bytes, and the two ranges must not
  /// overlap. When `len == 0` neither pointer is dereferenced and both may be
  /// null or dangling.
  #[inline]
  pub unsafe fn compute_raw(&self, dst: *mut u8, src: *const u8, len: usize, initial: Crc32cValue) -> Crc32cValue {
    if len == 0 {
      return initial;
    }
    // SAFETY: the caller guarantees both ranges are valid for `len` bytes
    // and disjoint, so a shared and an exclusive slice may coexist.
    let (dst, src) = unsafe {
      (
        core::slice::from_raw_parts_mut(dst, len),
        core::slice::from_raw_parts(src, len),
      )
    };
    self.compute(dst, src, initial)
  }

  /// Short diagnostic name, e.g. `"fallback"` or `"accelerated/v3i0"`.
  #[must_use]
  pub fn name(&self) -> &'static str {
    match self {
      Self::Fallback(_) => "fallback",
      Self::Lanes(e) => e.name(),
      Self::NonTemporal(_) => "nontemporal",
    }
  }

  #[must_use]
  pub const fn kind(&self) -> EngineKind {
    match self {
      Self::Fallback(_) => EngineKind::Fallback,
      Self::Lanes(_) => EngineKind::Accelerated,
      Self::NonTemporal(_) => EngineKind::NonTemporal,
    }
  }

  /// True for engines that use CPU-specific instructions for the copy.
  #[must_use]
  pub const fn is_hardware_accelerated(&self) -> bool {
    match self {
      Self::Fallback(_) => false,
      Self::Lanes(_) => true,
      Self::NonTemporal(_) => NonTemporalEngine::STREAMING,
    }
  }
}

impl fmt::Display for Engine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Panic like `<[u8]>::copy_from_slice` on mismatched lengths.
#[inline]
#[track_caller]
pub(crate) fn check_lengths(dst: &[u8], src: &[u8]) {
  assert_eq!(
    dst.len(),
    src.len(),
    "destination and source slices have different lengths"
  );
}

//! The finalized CRC32-C value type.

use core::fmt;

/// A finalized CRC32-C checksum.
///
/// This is the value a caller stores and compares: the register with the
/// standard pre/post inversion already applied. `Crc32cValue::ZERO` is the
/// checksum of the empty input and the usual seed for
/// [`extend_crc32c`](crate::extend_crc32c).
///
/// ```
/// use checksum::{Crc32cValue, compute_crc32c, extend_crc32c};
///
/// let crc = compute_crc32c(b"hello world");
/// assert_eq!(crc, Crc32cValue::new(0xC994_65AA));
///
/// let (a, b) = b"hello world".split_at(5);
/// assert_eq!(extend_crc32c(compute_crc32c(a), b), crc);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Crc32cValue(u32);

impl Crc32cValue {
  /// Checksum of the empty input.
  pub const ZERO: Self = Self(0);

  #[inline]
  #[must_use]
  pub const fn new(value: u32) -> Self {
    Self(value)
  }

  /// The 32-bit checksum.
  #[inline]
  #[must_use]
  pub const fn get(self) -> u32 {
    self.0
  }
}

impl From<u32> for Crc32cValue {
  #[inline]
  fn from(value: u32) -> Self {
    Self(value)
  }
}

impl From<Crc32cValue> for u32 {
  #[inline]
  fn from(value: Crc32cValue) -> Self {
    value.0
  }
}

impl fmt::Debug for Crc32cValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Crc32cValue({:#010x})", self.0)
  }
}

impl fmt::Display for Crc32cValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:08x}", self.0)
  }
}

impl fmt::LowerHex for Crc32cValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::LowerHex::fmt(&self.0, f)
  }
}

impl fmt::UpperHex for Crc32cValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::UpperHex::fmt(&self.0, f)
  }
}

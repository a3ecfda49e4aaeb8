//! CRC32-C combine and shift operators.
//!
//! A CRC register is a polynomial over GF(2). Appending `n` bytes multiplies
//! the running value by `x^(8n)` modulo the generator and then adds the
//! contribution of the new bytes, so for finalized values:
//!
//! ```text
//! extend(a, B) = shift(a, len(B)) ^ extend(0, B)
//! crc(A || B)  = shift(crc(A), len(B)) ^ crc(B)
//! ```
//!
//! `shift` is evaluated as a product of precomputed powers `x^(8·2^k) mod P`,
//! one per set bit of the byte length: O(log n) carryless multiplies.
//! Values use the reflected bit order, where bit 31 is the `x^0` coefficient.

use crate::{constants::crc32c::POLYNOMIAL, value::Crc32cValue};

/// `x^0` in reflected form.
const ONE: u32 = 1 << 31;

/// Multiply two reflected polynomials modulo the CRC32-C generator.
#[inline]
const fn mul_mod(a: u32, b: u32) -> u32 {
  let mut product = 0u32;
  let mut b = b;
  let mut mask = ONE;
  while mask != 0 {
    if a & mask != 0 {
      product ^= b;
    }
    // b *= x
    b = if b & 1 != 0 { (b >> 1) ^ POLYNOMIAL } else { b >> 1 };
    mask >>= 1;
  }
  product
}

/// `X8_POW2[k] = x^(8·2^k) mod P`.
static X8_POW2: [u32; 64] = x8_pow2_table();

const fn x8_pow2_table() -> [u32; 64] {
  let mut table = [0u32; 64];
  // x^1 -> x^8
  let mut p = ONE >> 1;
  p = mul_mod(p, p);
  p = mul_mod(p, p);
  p = mul_mod(p, p);

  let mut k = 0;
  while k < 64 {
    table[k] = p;
    p = mul_mod(p, p);
    k += 1;
  }
  table
}

/// The linear operator "append `len` zero bytes", reusable across values.
///
/// Building the operator costs O(log len); applying it is a single carryless
/// multiply. The copy engines build one per call and apply it once per lane.
///
/// ```
/// use checksum::{ShiftOperator, compute_crc32c, extend_crc32c};
///
/// let op = ShiftOperator::for_len(4);
/// let a = compute_crc32c(b"abc");
/// let b = compute_crc32c(b"defg");
/// assert_eq!(op.apply(a).get() ^ b.get(), extend_crc32c(a, b"defg").get());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftOperator(u32);

impl ShiftOperator {
  /// The operator for a zero-length shift.
  pub const IDENTITY: Self = Self(ONE);

  /// Operator multiplying by `x^(8·len)`.
  #[must_use]
  pub fn for_len(len: usize) -> Self {
    let mut op = ONE;
    let mut n = len as u64;
    let mut k = 0;
    while n != 0 {
      if n & 1 != 0 {
        op = mul_mod(X8_POW2[k], op);
      }
      n >>= 1;
      k += 1;
    }
    Self(op)
  }

  /// Apply the operator to a finalized value.
  #[inline]
  #[must_use]
  pub fn apply(self, value: Crc32cValue) -> Crc32cValue {
    Crc32cValue::new(mul_mod(self.0, value.get()))
  }

  /// Compose two operators: shifting by `a` then by `b`.
  #[inline]
  #[must_use]
  pub fn then(self, other: Self) -> Self {
    Self(mul_mod(self.0, other.0))
  }
}

/// Shift `value` as if `len` zero bytes were appended, without the zero bytes'
/// own contribution.
///
/// ```
/// use checksum::{Crc32cValue, crc32c_shift, compute_crc32c, extend_crc32c};
///
/// let tail = b"world";
/// let head = compute_crc32c(b"hello ");
/// let shifted = crc32c_shift(head, tail.len());
/// assert_eq!(
///   Crc32cValue::new(shifted.get() ^ compute_crc32c(tail).get()),
///   extend_crc32c(head, tail),
/// );
/// ```
#[inline]
#[must_use]
pub fn crc32c_shift(value: Crc32cValue, len: usize) -> Crc32cValue {
  if len == 0 {
    return value;
  }
  ShiftOperator::for_len(len).apply(value)
}

/// Combine two CRC32-C values: `crc(A || B)` from `crc(A)`, `crc(B)`, `len(B)`.
///
/// Runs in O(log len_b).
#[inline]
#[must_use]
pub fn crc32c_combine(crc_a: Crc32cValue, crc_b: Crc32cValue, len_b: usize) -> Crc32cValue {
  Crc32cValue::new(crc32c_shift(crc_a, len_b).get() ^ crc_b.get())
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;
  use crate::{compute_crc32c, extend_crc32c};

  fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut x = seed | 1;
    for _ in 0..len {
      // xorshift64*
      x ^= x << 13;
      x ^= x >> 7;
      x ^= x << 17;
      out.push((x as u8).wrapping_add((x >> 8) as u8));
    }
    out
  }

  #[test]
  fn mul_mod_identity() {
    for v in [0u32, 1, 0x8000_0000, 0xDEAD_BEEF, u32::MAX] {
      assert_eq!(mul_mod(ONE, v), v);
      assert_eq!(mul_mod(v, ONE), v);
    }
  }

  #[test]
  fn shift_by_zero_is_identity() {
    let v = Crc32cValue::new(0x1234_5678);
    assert_eq!(crc32c_shift(v, 0), v);
    assert_eq!(ShiftOperator::IDENTITY.apply(v), v);
    assert_eq!(ShiftOperator::for_len(0), ShiftOperator::IDENTITY);
  }

  #[test]
  fn shift_of_zero_is_zero() {
    for len in [1usize, 7, 64, 8192, 1 << 30] {
      assert_eq!(crc32c_shift(Crc32cValue::ZERO, len), Crc32cValue::ZERO);
    }
  }

  #[test]
  fn shift_matches_extending_over_zeros() {
    for len in [1usize, 2, 3, 8, 63, 64, 100, 255, 4096, 8193] {
      let zeros = std::vec![0u8; len];
      let zeros_crc = compute_crc32c(&zeros);
      for seed in [0x0000_0001u32, 0xFFFF_FFFF, 0xC994_65AA] {
        let v = Crc32cValue::new(seed);
        let expected = extend_crc32c(v, &zeros).get() ^ zeros_crc.get();
        assert_eq!(crc32c_shift(v, len).get(), expected, "len={len} seed={seed:#010X}");
      }
    }
  }

  #[test]
  fn combine_matches_oneshot() {
    let data = gen_bytes(3000, 0x9E37_79B9_7F4A_7C15);
    let full = compute_crc32c(&data);
    for split in [0usize, 1, 7, 8, 255, 256, 1024, 2999, 3000] {
      let (a, b) = data.split_at(split);
      let combined = crc32c_combine(compute_crc32c(a), compute_crc32c(b), b.len());
      assert_eq!(combined, full, "split={split}");
    }
  }

  #[test]
  fn operators_compose() {
    let v = Crc32cValue::new(0xA5A5_5A5A);
    let ab = ShiftOperator::for_len(100).then(ShiftOperator::for_len(28));
    assert_eq!(ab.apply(v), ShiftOperator::for_len(128).apply(v));
  }
}

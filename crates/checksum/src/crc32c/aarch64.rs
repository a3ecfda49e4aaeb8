//! aarch64-accelerated CRC32-C (Castagnoli).
//!
//! Uses the ARMv8 CRC32 extension (`crc32c*` instructions).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cb, __crc32cd, __crc32ch, __crc32cw};

/// Compute CRC32-C using the ARMv8 CRC32 extension.
///
/// # Safety
/// Caller must ensure the CPU supports the `crc` target feature.
#[target_feature(enable = "crc")]
pub(crate) unsafe fn compute_crc_unchecked(crc: u32, data: &[u8]) -> u32 {
  let mut current = crc;

  let mut words = data.chunks_exact(8);
  for w in words.by_ref() {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(w);
    current = __crc32cd(current, u64::from_le_bytes(bytes));
  }

  let mut rest = words.remainder();

  if rest.len() >= 4 {
    current = __crc32cw(current, u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]));
    rest = &rest[4..];
  }

  if rest.len() >= 2 {
    current = __crc32ch(current, u16::from_le_bytes([rest[0], rest[1]]));
    rest = &rest[2..];
  }

  if let Some(&b) = rest.first() {
    current = __crc32cb(current, b);
  }

  current
}

/// Runtime-selected CRC-extension kernel.
#[inline]
pub(crate) fn compute_crc_runtime(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: the dispatcher selects this kernel only when `platform::caps()`
  // contains the CRC extension.
  unsafe { compute_crc_unchecked(crc, data) }
}

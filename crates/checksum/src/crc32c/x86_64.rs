//! x86_64-accelerated CRC32-C (Castagnoli).
//!
//! Uses SSE4.2 `crc32` instructions.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u16, _mm_crc32_u32, _mm_crc32_u64};

/// Compute CRC32-C using SSE4.2 `crc32` instructions.
///
/// # Safety
/// Caller must ensure the CPU supports the `sse4.2` target feature.
#[target_feature(enable = "sse4.2")]
pub(crate) unsafe fn compute_sse42_unchecked(crc: u32, data: &[u8]) -> u32 {
  let mut current = crc;

  let mut words = data.chunks_exact(8);
  for w in words.by_ref() {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(w);
    current = _mm_crc32_u64(current as u64, u64::from_le_bytes(bytes)) as u32;
  }

  let mut rest = words.remainder();

  if rest.len() >= 4 {
    let v = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
    current = _mm_crc32_u32(current, v);
    rest = &rest[4..];
  }

  if rest.len() >= 2 {
    let v = u16::from_le_bytes([rest[0], rest[1]]);
    current = _mm_crc32_u16(current, v);
    rest = &rest[2..];
  }

  if let Some(&b) = rest.first() {
    current = _mm_crc32_u8(current, b);
  }

  current
}

/// Runtime-selected SSE4.2 kernel.
///
/// Only handed out by the dispatcher after the capability probe reported
/// SSE4.2.
#[inline]
pub(crate) fn compute_sse42_runtime(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: the dispatcher selects this kernel only when `platform::caps()`
  // contains SSE4.2.
  unsafe { compute_sse42_unchecked(crc, data) }
}

//! x86_64 lane blocks: SSE2 moves, SSE4.1 lane extraction, SSE4.2 `crc32`.

#![allow(unsafe_code)]

use core::arch::x86_64::{
  __m128i, _mm_crc32_u64, _mm_cvtsi128_si64, _mm_extract_epi64, _mm_loadu_si128, _mm_storeu_si128,
};

super::define_lane_kernel!("sse2,sse4.1,sse4.2");

/// Move one 64-byte block through four XMM registers, checksumming each.
///
/// # Safety
/// Requires SSE4.1 + SSE4.2; `src` readable and `dst` writable for 64 bytes.
#[target_feature(enable = "sse2,sse4.1,sse4.2")]
#[inline]
unsafe fn vector_block(mut crc: u32, dst: *mut u8, src: *const u8) -> u32 {
  for j in 0..4 {
    // SAFETY: `16 * j + 16 <= 64` stays inside the block.
    let v = unsafe { _mm_loadu_si128(src.add(16 * j).cast::<__m128i>()) };
    // SAFETY: as above, for the destination block.
    unsafe { _mm_storeu_si128(dst.add(16 * j).cast::<__m128i>(), v) };
    crc = _mm_crc32_u64(crc as u64, _mm_cvtsi128_si64(v) as u64) as u32;
    crc = _mm_crc32_u64(crc as u64, _mm_extract_epi64::<1>(v) as u64) as u32;
  }
  crc
}

/// Move one 64-byte block as eight 64-bit words, checksumming each.
///
/// # Safety
/// Requires SSE4.2; `src` readable and `dst` writable for 64 bytes.
#[target_feature(enable = "sse4.2")]
#[inline]
unsafe fn integer_block(mut crc: u32, dst: *mut u8, src: *const u8) -> u32 {
  for j in 0..8 {
    // SAFETY: `8 * j + 8 <= 64` stays inside the block.
    let w = unsafe { core::ptr::read_unaligned(src.add(8 * j).cast::<u64>()) };
    // SAFETY: as above, for the destination block.
    unsafe { core::ptr::write_unaligned(dst.add(8 * j).cast::<u64>(), w) };
    crc = _mm_crc32_u64(crc as u64, w) as u32;
  }
  crc
}

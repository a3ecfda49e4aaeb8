//! aarch64 lane blocks: NEON moves, CRC extension `crc32cx`.

#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cd, vgetq_lane_u64, vld1q_u8, vreinterpretq_u64_u8, vst1q_u8};

super::define_lane_kernel!("neon,crc");

/// Move one 64-byte block through four Q registers, checksumming each.
///
/// # Safety
/// Requires NEON + CRC; `src` readable and `dst` writable for 64 bytes.
#[target_feature(enable = "neon,crc")]
#[inline]
unsafe fn vector_block(mut crc: u32, dst: *mut u8, src: *const u8) -> u32 {
  for j in 0..4 {
    // SAFETY: `16 * j + 16 <= 64` stays inside the block.
    let v = unsafe { vld1q_u8(src.add(16 * j)) };
    // SAFETY: as above, for the destination block.
    unsafe { vst1q_u8(dst.add(16 * j), v) };
    let q = vreinterpretq_u64_u8(v);
    crc = __crc32cd(crc, vgetq_lane_u64::<0>(q));
    crc = __crc32cd(crc, vgetq_lane_u64::<1>(q));
  }
  crc
}

/// Move one 64-byte block as eight 64-bit words, checksumming each.
///
/// # Safety
/// Requires CRC; `src` readable and `dst` writable for 64 bytes.
#[target_feature(enable = "crc")]
#[inline]
unsafe fn integer_block(mut crc: u32, dst: *mut u8, src: *const u8) -> u32 {
  for j in 0..8 {
    // SAFETY: `8 * j + 8 <= 64` stays inside the block.
    let w = unsafe { core::ptr::read_unaligned(src.add(8 * j).cast::<u64>()) };
    // SAFETY: as above, for the destination block.
    unsafe { core::ptr::write_unaligned(dst.add(8 * j).cast::<u64>(), w) };
    crc = __crc32cd(crc, w);
  }
  crc
}

//! Portable CRC32-C implementation using slicing-by-8.
//!
//! For each 8-byte chunk:
//! 1. XOR the chunk with the current CRC
//! 2. Look up each byte in its corresponding table
//! 3. XOR all 8 table entries to get the new CRC

use crate::constants::crc32c::TABLES;

/// Compute CRC32-C using slicing-by-8.
///
/// `crc` is the raw register (no pre/post inversion); the updated raw
/// register is returned.
#[inline]
pub fn compute(crc: u32, data: &[u8]) -> u32 {
  let t = &TABLES.0;
  let mut crc = crc;
  let mut chunks = data.chunks_exact(8);

  for chunk in chunks.by_ref() {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(chunk);
    let d = u64::from_le_bytes(bytes);

    let lo = (crc as u64) ^ (d & 0xFFFF_FFFF);
    let hi = d >> 32;

    // table[7] handles byte 0 (LSB), table[0] handles byte 7.
    crc = t[7][lo as u8 as usize]
      ^ t[6][(lo >> 8) as u8 as usize]
      ^ t[5][(lo >> 16) as u8 as usize]
      ^ t[4][(lo >> 24) as u8 as usize]
      ^ t[3][hi as u8 as usize]
      ^ t[2][(hi >> 8) as u8 as usize]
      ^ t[1][(hi >> 16) as u8 as usize]
      ^ t[0][(hi >> 24) as u8 as usize];
  }

  for &byte in chunks.remainder() {
    crc = compute_byte(crc, byte);
  }

  crc
}

/// Compute CRC32-C for a single byte.
#[inline]
pub const fn compute_byte(crc: u32, byte: u8) -> u32 {
  let idx = (crc as u8 ^ byte) as usize;
  (crc >> 8) ^ TABLES.0[0][idx]
}

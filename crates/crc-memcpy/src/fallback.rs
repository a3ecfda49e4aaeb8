//! Portable engine: checksum a block, then copy it.

use checksum::{Crc32cValue, extend_crc32c};

use crate::engine::check_lengths;

/// Portable copy-and-checksum engine.
///
/// The input is processed in [`BLOCK_SIZE`](Self::BLOCK_SIZE) blocks. Each
/// block is checksummed first and copied second, so the checksum pass reads
/// the source while it is still cache-resident and the copy then reuses it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FallbackEngine;

impl FallbackEngine {
  pub const BLOCK_SIZE: usize = 8192;

  /// See [`Engine::compute`](crate::Engine::compute).
  #[track_caller]
  pub fn compute(&self, dst: &mut [u8], src: &[u8], initial: Crc32cValue) -> Crc32cValue {
    check_lengths(dst, src);
    let len = src.len();

    let mut crc = initial;
    let mut offset = 0;
    while offset + Self::BLOCK_SIZE < len {
      let end = offset + Self::BLOCK_SIZE;
      crc = extend_crc32c(crc, &src[offset..end]);
      dst[offset..end].copy_from_slice(&src[offset..end]);
      offset = end;
    }

    // Remainder, which may itself be a full block.
    let tail = &src[offset..];
    crc = extend_crc32c(crc, tail);
    dst[offset..].copy_from_slice(tail);
    crc
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec;

  use checksum::compute_crc32c;

  use super::*;

  #[test]
  fn hello_world_golden() {
    let mut dst = [0u8; 11];
    let crc = FallbackEngine.compute(&mut dst, b"hello world", Crc32cValue::ZERO);
    assert_eq!(&dst, b"hello world");
    assert_eq!(crc.get(), 0xC994_65AA);
  }

  #[test]
  fn zero_length_returns_initial() {
    let seed = Crc32cValue::new(0x0BAD_CAFE);
    assert_eq!(FallbackEngine.compute(&mut [], &[], seed), seed);
  }

  #[test]
  fn block_boundaries() {
    for len in [8191usize, 8192, 8193, 16383, 16384, 16385] {
      let src: std::vec::Vec<u8> = (0..len).map(|i| (i * 31 + 7) as u8).collect();
      let mut dst = vec![0u8; len];
      let crc = FallbackEngine.compute(&mut dst, &src, Crc32cValue::ZERO);
      assert_eq!(dst, src, "len={len}");
      assert_eq!(crc, compute_crc32c(&src), "len={len}");
    }
  }
}

//! Non-temporal engine: checksum a block, then stream it past the cache.
//!
//! Large copies whose destination will not be read soon would otherwise
//! evict the working set. The copy half of each block uses streaming stores
//! (`movntdq` on x86_64, `stnp` on aarch64); the destination head up to the
//! next 64-byte boundary and the sub-line tail use ordinary stores.

use checksum::{Crc32cValue, extend_crc32c};

use crate::engine::check_lengths;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

/// Destination alignment for the streaming loop.
pub(crate) const LINE: usize = 64;

/// Cache-bypassing copy-and-checksum engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NonTemporalEngine;

impl NonTemporalEngine {
  pub const BLOCK_SIZE: usize = 8192;

  /// Whether this target has streaming stores. Elsewhere the engine copies
  /// with ordinary stores and only keeps the block-wise checksum order.
  pub const STREAMING: bool = cfg!(any(target_arch = "x86_64", target_arch = "aarch64"));

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
      stream_copy(&mut dst[offset..end], &src[offset..end]);
      offset = end;
    }

    let tail = &src[offset..];
    crc = extend_crc32c(crc, tail);
    stream_copy(&mut dst[offset..], tail);
    crc
  }
}

/// Copy `src` into `dst` with streaming stores where the target has them
/// (see [`NonTemporalEngine::STREAMING`]).
#[inline]
pub(crate) fn stream_copy(dst: &mut [u8], src: &[u8]) {
  debug_assert_eq!(dst.len(), src.len());
  if src.len() < LINE {
    dst.copy_from_slice(src);
    return;
  }

  #[cfg(target_arch = "x86_64")]
  {
    // SAFETY: SSE2 is part of the x86_64 baseline. The slices are valid for
    // `len` bytes and cannot overlap.
    unsafe { x86_64::stream_copy(dst.as_mut_ptr(), src.as_ptr(), src.len()) }
  }

  #[cfg(target_arch = "aarch64")]
  {
    // SAFETY: NEON is part of the aarch64 baseline. The slices are valid for
    // `len` bytes and cannot overlap.
    unsafe { aarch64::stream_copy(dst.as_mut_ptr(), src.as_ptr(), src.len()) }
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    dst.copy_from_slice(src);
  }
}

/// Bytes from `ptr` up to the next `LINE` boundary.
#[inline]
#[cfg_attr(not(any(target_arch = "x86_64", target_arch = "aarch64")), allow(dead_code))]
pub(crate) fn head_len(ptr: *const u8) -> usize {
  (LINE - (ptr.addr() & (LINE - 1))) & (LINE - 1)
}

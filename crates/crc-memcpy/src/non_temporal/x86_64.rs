//! x86_64 streaming copy (`movdqu` loads, `movntdq` stores).

#![allow(unsafe_code)]

use core::arch::x86_64::{__m128i, _mm_loadu_si128, _mm_sfence, _mm_stream_si128};

use super::{LINE, head_len};

/// Copy `len` bytes, streaming every full destination cache line.
///
/// # Safety
/// `src` valid for `len` reads, `dst` valid for `len` writes, no overlap.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn stream_copy(dst: *mut u8, src: *const u8, len: usize) {
  let head = head_len(dst).min(len);
  // SAFETY: `head <= len`.
  unsafe { core::ptr::copy_nonoverlapping(src, dst, head) };

  // SAFETY: `head <= len` keeps both cursors in bounds.
  let (mut d, mut s) = unsafe { (dst.add(head), src.add(head)) };
  let mut rem = len - head;

  while rem >= LINE {
    // SAFETY: `rem >= 64` bytes remain on both sides; `d` is 64-byte
    // aligned, which satisfies `_mm_stream_si128`'s 16-byte requirement.
    unsafe {
      let a = _mm_loadu_si128(s.cast::<__m128i>());
      let b = _mm_loadu_si128(s.add(16).cast::<__m128i>());
      let c = _mm_loadu_si128(s.add(32).cast::<__m128i>());
      let e = _mm_loadu_si128(s.add(48).cast::<__m128i>());
      _mm_stream_si128(d.cast::<__m128i>(), a);
      _mm_stream_si128(d.add(16).cast::<__m128i>(), b);
      _mm_stream_si128(d.add(32).cast::<__m128i>(), c);
      _mm_stream_si128(d.add(48).cast::<__m128i>(), e);
      d = d.add(LINE);
      s = s.add(LINE);
    }
    rem -= LINE;
  }

  // SAFETY: exactly `rem` bytes remain on both sides.
  unsafe { core::ptr::copy_nonoverlapping(s, d, rem) };

  // Streaming stores are weakly ordered.
  _mm_sfence();
}

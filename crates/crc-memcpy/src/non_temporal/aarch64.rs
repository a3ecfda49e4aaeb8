//! aarch64 streaming copy (`ldp` loads, `stnp` non-temporal pair stores).

#![allow(unsafe_code)]

use core::arch::asm;

use super::{LINE, head_len};

/// Copy `len` bytes, streaming every full destination cache line.
///
/// # Safety
/// `src` valid for `len` reads, `dst` valid for `len` writes, no overlap.
#[target_feature(enable = "neon")]
pub(super) unsafe fn stream_copy(dst: *mut u8, src: *const u8, len: usize) {
  let head = head_len(dst).min(len);
  // SAFETY: `head <= len`.
  unsafe { core::ptr::copy_nonoverlapping(src, dst, head) };

  // SAFETY: `head <= len` keeps both cursors in bounds.
  let (mut d, mut s) = unsafe { (dst.add(head), src.add(head)) };
  let mut rem = len - head;

  while rem >= LINE {
    // SAFETY: `rem >= 64` bytes remain on both sides. The asm only touches
    // those 64 bytes and the four clobbered vector registers.
    unsafe {
      asm!(
        "ldp {a:q}, {b:q}, [{s}]",
        "ldp {c:q}, {e:q}, [{s}, #32]",
        "stnp {a:q}, {b:q}, [{d}]",
        "stnp {c:q}, {e:q}, [{d}, #32]",
        s = in(reg) s,
        d = in(reg) d,
        a = out(vreg) _,
        b = out(vreg) _,
        c = out(vreg) _,
        e = out(vreg) _,
        options(nostack, preserves_flags),
      );
      d = d.add(LINE);
      s = s.add(LINE);
    }
    rem -= LINE;
  }

  // SAFETY: exactly `rem` bytes remain on both sides.
  unsafe { core::ptr::copy_nonoverlapping(s, d, rem) };

  // Order the non-temporal stores before any later store.
  // SAFETY: a barrier has no memory operands.
  unsafe { asm!("dmb ishst", options(nostack, preserves_flags)) };
}

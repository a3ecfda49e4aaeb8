//! Temporal accelerated engine: interleaved hardware CRC lanes.
//!
//! A copy of `len` bytes is cut into `vector_lanes + integer_lanes` equal
//! regions of whole 64-byte blocks followed by a short tail:
//!
//! ```text
//! | region 0 | region 1 | ... | region n-1 | tail |
//!   vector lanes first,  then integer lanes
//! ```
//!
//! Every region owns a CRC register. The kernel walks all regions in
//! lock-step, one block per region per step, so the CPU always has `n`
//! independent `crc32` dependency chains in flight. Vector lanes move a block
//! as four 128-bit loads/stores and feed both 64-bit halves of each register
//! to the CRC unit; integer lanes move eight 64-bit words.
//!
//! Region 0 starts from the caller's value and the others from zero. Since
//! `extend(a, B) = shift(a, len B) ^ extend(0, B)`, the regions fold back
//! together left to right with one shift operator built for the region
//! length. The tail is extended and copied normally.

use checksum::{Crc32cValue, extend_crc32c};
use platform::Caps;

use crate::engine::check_lengths;

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

/// Bytes each lane moves per step.
pub(crate) const BLOCK: usize = 64;

pub const MAX_VECTOR_LANES: u8 = 3;
pub const MAX_INTEGER_LANES: u8 = 3;

/// Temporal accelerated copy-and-checksum engine.
///
/// A `LaneEngine` value can only be obtained on a machine with the required
/// CRC instructions (x86_64 SSE4.1 + SSE4.2, little-endian aarch64 CRC +
/// NEON).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneEngine {
  vector_lanes: u8,
  integer_lanes: u8,
}

impl LaneEngine {
  /// Copies shorter than this skip the lane machinery.
  pub const SMALL_COPY: usize = 256;

  /// Build an engine for the running CPU.
  ///
  /// Lane counts are clamped to `0..=3` each; `(0, 0)` becomes `(0, 1)`.
  /// Returns `None` when the CPU lacks hardware CRC32-C.
  ///
  /// ```
  /// use crc_memcpy::LaneEngine;
  ///
  /// if let Some(engine) = LaneEngine::new(9, 1) {
  ///   assert_eq!((engine.vector_lanes(), engine.integer_lanes()), (3, 1));
  /// }
  /// ```
  #[must_use]
  pub fn new(vector_lanes: u8, integer_lanes: u8) -> Option<Self> {
    Self::with_caps(vector_lanes, integer_lanes, platform::caps())
  }

  /// Like [`new`](Self::new), but also requires `caps` to advertise the
  /// hardware. Used by the selector so that a pinned detection result
  /// without CRC support yields no lane engine.
  #[must_use]
  pub fn with_caps(vector_lanes: u8, integer_lanes: u8, caps: Caps) -> Option<Self> {
    // A pinned result can remove features but never add instructions the
    // CPU lacks; `platform::hardware()` is the cached real probe.
    if !caps_support_lanes(caps) || !caps_support_lanes(platform::hardware().caps) {
      return None;
    }
    let (vector_lanes, integer_lanes) = clamp_lanes(vector_lanes, integer_lanes);
    Some(Self {
      vector_lanes,
      integer_lanes,
    })
  }

  #[inline]
  #[must_use]
  pub const fn vector_lanes(&self) -> u8 {
    self.vector_lanes
  }

  #[inline]
  #[must_use]
  pub const fn integer_lanes(&self) -> u8 {
    self.integer_lanes
  }

  /// Total number of interleaved lanes.
  #[inline]
  #[must_use]
  pub const fn lanes(&self) -> usize {
    self.vector_lanes as usize + self.integer_lanes as usize
  }

  #[must_use]
  pub fn name(&self) -> &'static str {
    NAMES[self.vector_lanes as usize][self.integer_lanes as usize]
  }

  /// See [`Engine::compute`](crate::Engine::compute).
  #[track_caller]
  pub fn compute(&self, dst: &mut [u8], src: &[u8], initial: Crc32cValue) -> Crc32cValue {
    check_lengths(dst, src);
    if src.len() < Self::SMALL_COPY {
      return copy_and_extend(dst, src, initial);
    }
    self.compute_lanes(dst, src, initial)
  }

  #[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little")))]
  fn compute_lanes(&self, dst: &mut [u8], src: &[u8], initial: Crc32cValue) -> Crc32cValue {
    let kernel = KERNELS[self.vector_lanes as usize][self.integer_lanes as usize];
    // SAFETY: a `LaneEngine` exists only after `caps_support_lanes` confirmed
    // the kernel's target features on this CPU. The slices have equal
    // length and cannot overlap.
    unsafe { kernel(dst.as_mut_ptr(), src.as_ptr(), src.len(), initial) }
  }

  #[cfg(not(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little"))))]
  fn compute_lanes(&self, dst: &mut [u8], src: &[u8], initial: Crc32cValue) -> Crc32cValue {
    copy_and_extend(dst, src, initial)
  }
}

/// Clamp each lane count to its maximum; at least one lane survives.
#[inline]
#[must_use]
pub const fn clamp_lanes(vector_lanes: u8, integer_lanes: u8) -> (u8, u8) {
  let v = if vector_lanes > MAX_VECTOR_LANES { MAX_VECTOR_LANES } else { vector_lanes };
  let i = if integer_lanes > MAX_INTEGER_LANES { MAX_INTEGER_LANES } else { integer_lanes };
  if v == 0 && i == 0 { (0, 1) } else { (v, i) }
}

/// True when `caps` include every feature the lane kernels use.
#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64/aarch64
pub fn caps_support_lanes(caps: Caps) -> bool {
  #[cfg(target_arch = "x86_64")]
  {
    caps.has(platform::caps::x86::CRC32C_READY)
  }
  #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
  {
    caps.has(platform::caps::aarch64::CRC_READY)
  }
  #[cfg(not(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little"))))]
  {
    false
  }
}

/// Extend over `src` and copy it in one go.
#[inline]
fn copy_and_extend(dst: &mut [u8], src: &[u8], initial: Crc32cValue) -> Crc32cValue {
  let crc = extend_crc32c(initial, src);
  dst.copy_from_slice(src);
  crc
}

/// Raw-pointer form of [`copy_and_extend`] for the kernels' tails.
///
/// # Safety
/// `src` valid for `len` reads, `dst` valid for `len` writes, no overlap.
#[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little")))]
#[inline]
unsafe fn copy_and_extend_raw(dst: *mut u8, src: *const u8, len: usize, initial: Crc32cValue) -> Crc32cValue {
  // SAFETY: forwarded caller contract.
  let (dst, src) = unsafe { (core::slice::from_raw_parts_mut(dst, len), core::slice::from_raw_parts(src, len)) };
  copy_and_extend(dst, src, initial)
}

// ─────────────────────────────────────────────────────────────────────────────
// Kernel definition
// ─────────────────────────────────────────────────────────────────────────────

/// Expands to `compute::<V, I>`, the lane driver, inside an arch module that
/// provides `vector_block` and `integer_block` compiled with `$features`.
#[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little")))]
macro_rules! define_lane_kernel {
  ($features:literal) => {
    /// Lane driver for `V` vector lanes and `I` integer lanes.
    ///
    /// # Safety
    /// The CPU must support the enabled target features. `src` must be valid
    /// for `len` reads and `dst` for `len` writes, without overlap.
    #[target_feature(enable = $features)]
    pub(super) unsafe fn compute<const V: usize, const I: usize>(
      dst: *mut u8,
      src: *const u8,
      len: usize,
      initial: checksum::Crc32cValue,
    ) -> checksum::Crc32cValue {
      use checksum::{Crc32cValue, ShiftOperator};

      use super::BLOCK;

      const INIT: u32 = 0xFFFF_FFFF;

      let lanes = V + I;
      let region_blocks = len / (BLOCK * lanes);
      if region_blocks == 0 {
        // SAFETY: forwarded caller contract.
        return unsafe { super::copy_and_extend_raw(dst, src, len, initial) };
      }
      let region = region_blocks * BLOCK;

      // Raw registers; a finalized zero is the raw value INIT.
      let mut vcrc = [INIT; 3];
      let mut icrc = [INIT; 3];
      if V > 0 {
        vcrc[0] = initial.get() ^ INIT;
      } else {
        icrc[0] = initial.get() ^ INIT;
      }

      let mut off = 0;
      while off < region {
        for (k, crc) in vcrc.iter_mut().enumerate().take(V) {
          let at = k * region + off;
          // SAFETY: `at + BLOCK <= region * lanes <= len`.
          *crc = unsafe { vector_block(*crc, dst.add(at), src.add(at)) };
        }
        for (k, crc) in icrc.iter_mut().enumerate().take(I) {
          let at = (V + k) * region + off;
          // SAFETY: `at + BLOCK <= region * lanes <= len`.
          *crc = unsafe { integer_block(*crc, dst.add(at), src.add(at)) };
        }
        off += BLOCK;
      }

      // Fold regions in address order: vector lanes, then integer lanes.
      let op = ShiftOperator::for_len(region);
      let mut regs = vcrc[..V].iter().chain(icrc[..I].iter());
      let mut crc = match regs.next() {
        Some(&r) => Crc32cValue::new(r ^ INIT),
        None => initial,
      };
      for &r in regs {
        crc = Crc32cValue::new(op.apply(crc).get() ^ r ^ INIT);
      }

      let done = region * lanes;
      // SAFETY: `done <= len`; the tail lies inside both ranges.
      unsafe { super::copy_and_extend_raw(dst.add(done), src.add(done), len - done, crc) }
    }
  };
}

#[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little")))]
pub(crate) use define_lane_kernel;

// ─────────────────────────────────────────────────────────────────────────────
// Kernel table
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little")))]
type LaneKernel = unsafe fn(*mut u8, *const u8, usize, Crc32cValue) -> Crc32cValue;

#[cfg(target_arch = "x86_64")]
use x86_64 as arch;

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
use aarch64 as arch;

/// `KERNELS[v][i]`; the `[0][0]` slot is never selected (clamped to `[0][1]`).
#[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little")))]
static KERNELS: [[LaneKernel; 4]; 4] = [
  [
    arch::compute::<0, 1>,
    arch::compute::<0, 1>,
    arch::compute::<0, 2>,
    arch::compute::<0, 3>,
  ],
  [
    arch::compute::<1, 0>,
    arch::compute::<1, 1>,
    arch::compute::<1, 2>,
    arch::compute::<1, 3>,
  ],
  [
    arch::compute::<2, 0>,
    arch::compute::<2, 1>,
    arch::compute::<2, 2>,
    arch::compute::<2, 3>,
  ],
  [
    arch::compute::<3, 0>,
    arch::compute::<3, 1>,
    arch::compute::<3, 2>,
    arch::compute::<3, 3>,
  ],
];

static NAMES: [[&str; 4]; 4] = [
  ["accelerated/v0i1", "accelerated/v0i1", "accelerated/v0i2", "accelerated/v0i3"],
  ["accelerated/v1i0", "accelerated/v1i1", "accelerated/v1i2", "accelerated/v1i3"],
  ["accelerated/v2i0", "accelerated/v2i1", "accelerated/v2i2", "accelerated/v2i3"],
  ["accelerated/v3i0", "accelerated/v3i1", "accelerated/v3i2", "accelerated/v3i3"],
];

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use checksum::compute_crc32c;

  use super::*;

  fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut x = seed | 1;
    for _ in 0..len {
      x ^= x << 13;
      x ^= x >> 7;
      x ^= x << 17;
      out.push((x as u8).wrapping_add((x >> 8) as u8));
    }
    out
  }

  #[test]
  fn clamp() {
    assert_eq!(clamp_lanes(0, 0), (0, 1));
    assert_eq!(clamp_lanes(7, 9), (3, 3));
    assert_eq!(clamp_lanes(1, 2), (1, 2));
    assert_eq!(clamp_lanes(3, 0), (3, 0));
  }

  #[test]
  fn no_lanes_without_caps() {
    assert_eq!(LaneEngine::with_caps(3, 0, Caps::NONE), None);
  }

  #[test]
  #[cfg(not(miri))]
  fn every_configuration_matches_extend() {
    let sizes = [0usize, 1, 255, 256, 257, 383, 384, 385, 1000, 4096, 8191, 8192, 8193, 20_000];
    for v in 0..=MAX_VECTOR_LANES {
      for i in 0..=MAX_INTEGER_LANES {
        let Some(engine) = LaneEngine::new(v, i) else {
          return;
        };
        for &len in &sizes {
          let src = gen_bytes(len, len as u64 ^ 0x9E37_79B9_7F4A_7C15);
          let mut dst = std::vec![0u8; len];
          let seed = Crc32cValue::new(0x1234_5678 ^ len as u32);
          let crc = engine.compute(&mut dst, &src, seed);
          assert_eq!(dst, src, "{} len={len}", engine.name());
          assert_eq!(crc, extend_crc32c(seed, &src), "{} len={len}", engine.name());
        }
      }
    }
  }

  #[test]
  #[cfg(not(miri))]
  fn names_match_lane_counts() {
    if let Some(e) = LaneEngine::new(1, 2) {
      assert_eq!(e.name(), "accelerated/v1i2");
      assert_eq!(e.lanes(), 3);
    }
    if let Some(e) = LaneEngine::new(0, 0) {
      assert_eq!(e.name(), "accelerated/v0i1");
    }
  }

  #[test]
  #[cfg(not(miri))]
  fn hello_world_small_copy() {
    if let Some(e) = LaneEngine::new(3, 0) {
      let mut dst = [0u8; 11];
      assert_eq!(e.compute(&mut dst, b"hello world", Crc32cValue::ZERO), compute_crc32c(b"hello world"));
      assert_eq!(&dst, b"hello world");
    }
  }
}

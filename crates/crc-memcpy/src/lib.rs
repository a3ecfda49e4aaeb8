//! Copy a byte range and compute its CRC32-C in the same pass.
//!
//! Storage and network paths often move a buffer and checksum it right
//! after. Doing both in one pass reads the source once, and the hardware CRC
//! unit runs in parallel with the loads and stores.
//!
//! # Quick Start
//!
//! ```rust
//! use crc_memcpy::{Crc32cValue, compute};
//!
//! let src = b"hello world";
//! let mut dst = [0u8; 11];
//! let crc = compute(&mut dst, src, Crc32cValue::ZERO);
//!
//! assert_eq!(&dst, src);
//! assert_eq!(crc.get(), 0xC994_65AA);
//! ```
//!
//! The result is always `extend_crc32c(initial, src)`, so a stream copied in
//! pieces chains by passing each result as the next `initial`.
//!
//! # Engines
//!
//! | Engine | Copy | Checksum |
//! |--------|------|----------|
//! | [`FallbackEngine`] | `copy_from_slice` per 8 KiB block | dispatched CRC32-C |
//! | [`LaneEngine`] | interleaved with the CRC, 1-6 lanes | hardware `crc32` |
//! | [`NonTemporalEngine`] | streaming stores per 8 KiB block | dispatched CRC32-C |
//!
//! [`engines()`] picks a temporal and a non-temporal engine once per process
//! from the detected CPU (see [`platform`]) and [`config`]. The facade
//! functions forward to one of them according to a [`CopyPolicy`].
//!
//! # Configuration
//!
//! See [`config`] for the `CRCMEMCPY_*` environment variables. Selection is
//! logged at `debug` level through the `log` facade.
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible. Without `std`, configuration uses
//! detected defaults; the CPU probe and the engine set are still computed
//! once and cached in a [`platform::InitOnce`].

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
mod engine;
mod error;
mod fallback;
mod lanes;
mod non_temporal;
mod policy;
mod select;

pub use checksum::{Crc32cValue, compute_crc32c, extend_crc32c};
pub use engine::{Engine, EngineKind};
pub use error::ParseError;
pub use fallback::FallbackEngine;
pub use lanes::{LaneEngine, MAX_INTEGER_LANES, MAX_VECTOR_LANES};
pub use non_temporal::NonTemporalEngine;
pub use policy::CopyPolicy;
pub use select::{EngineSet, engine_for_testing, engines};

/// Copy `src` into `dst` and return `extend_crc32c(initial, src)`.
///
/// Large copies go to the non-temporal engine (see [`CopyPolicy::Auto`]).
///
/// # Panics
///
/// Panics if `dst` and `src` have different lengths.
#[inline]
#[track_caller]
pub fn compute(dst: &mut [u8], src: &[u8], initial: Crc32cValue) -> Crc32cValue {
  compute_with_policy(dst, src, initial, CopyPolicy::Auto)
}

/// [`compute`] with an explicit temporal/non-temporal choice.
///
/// ```
/// use crc_memcpy::{CopyPolicy, Crc32cValue, compute_crc32c, compute_with_policy};
///
/// let src = vec![0x5Au8; 100_000];
/// let mut dst = vec![0u8; src.len()];
/// let crc = compute_with_policy(&mut dst, &src, Crc32cValue::ZERO, CopyPolicy::NonTemporal);
/// assert_eq!(dst, src);
/// assert_eq!(crc, compute_crc32c(&src));
/// ```
///
/// # Panics
///
/// Panics if `dst` and `src` have different lengths.
#[inline]
#[track_caller]
pub fn compute_with_policy(dst: &mut [u8], src: &[u8], initial: Crc32cValue, policy: CopyPolicy) -> Crc32cValue {
  engines().engine_for(policy, src.len()).compute(dst, src, initial)
}

/// Raw-pointer form of [`compute`].
///
/// # Safety
///
/// Same contract as [`Engine::compute_raw`]: for `len > 0`, `src` valid for
/// `len` reads, `dst` valid for `len` writes, no overlap.
#[inline]
pub unsafe fn compute_raw(dst: *mut u8, src: *const u8, len: usize, initial: Crc32cValue) -> Crc32cValue {
  let set = engines();
  // SAFETY: forwarded caller contract.
  unsafe { set.engine_for(CopyPolicy::Auto, len).compute_raw(dst, src, len, initial) }
}

/// Name of the temporal engine in use, e.g. `"accelerated/v3i0"`.
///
/// Intended for diagnostics and benchmarking.
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  engines().temporal.name()
}

//! CPU detection, capabilities, and tuning for crc-memcpy.
//!
//! This crate is the **single source of truth** for the capability probe that
//! decides which copy-and-checksum engines a process uses.
//!
//! # Core Types
//!
//! - [`Caps`]: What instructions can run on this machine (capabilities)
//! - [`Tune`]: What strategies are preferable on this machine (lane layout,
//!   non-temporal threshold)
//! - [`Detected`]: Both of the above plus the [`Arch`] they were probed on
//!
//! # Main Entry Point
//!
//! ```
//! let det = platform::get();
//!
//! #[cfg(target_arch = "x86_64")]
//! if det.caps.has(platform::caps::x86::CRC32C_READY) {
//!   // SSE4.2 `crc32` + SSE4.1 lane extraction are usable
//! }
//!
//! assert!(det.tune.non_temporal_threshold > 0);
//! ```
//!
//! # Design Philosophy
//!
//! 1. **One probe**: engine selection queries `platform::get()` instead of doing
//!    ad-hoc detection.
//! 2. **Capabilities vs Tuning**: `Caps` says what's *possible*; `Tune` says
//!    what's *preferable*.
//! 3. **Compile-time first**: features enabled via `-C target-feature` are folded
//!    in with `cfg!` and never re-probed.
//! 4. **Initialize once**: runtime detection is cached in an [`InitOnce`] cell,
//!    with or without `std`. Downstream crates cache their own selections in
//!    the same cell type.
//! 5. **Miri-safe**: under Miri, always returns portable-only caps.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
pub mod detect;
mod once;
pub mod tune;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Caps};
pub use detect::{Detected, OverrideError, caps_static, detect_uncached};
pub use once::InitOnce;
pub use tune::{Tune, TuneKind};

/// Get detected CPU capabilities, tuning hints, and architecture.
///
/// This is the main entry point for capability-based selection. The first call
/// probes the CPU; later calls return the cached value.
#[inline]
#[must_use]
pub fn get() -> Detected {
  detect::get()
}

/// Get just the CPU capabilities.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::get().caps
}

/// Get just the tuning hints.
#[inline]
#[must_use]
pub fn tune() -> Tune {
  detect::get().tune
}

/// Get the architecture the capabilities were detected on.
#[inline]
#[must_use]
pub fn arch() -> Arch {
  detect::get().arch
}

/// What the CPU itself reports, ignoring any pinned value.
///
/// Probed once and cached like [`get()`].
#[inline]
#[must_use]
pub fn hardware() -> Detected {
  detect::hardware()
}

/// Pin the detection result for the rest of the process.
///
/// Must be called before the first [`get()`]; see [`try_set_override`].
///
/// # Panics
///
/// Panics if detection has already been cached.
#[inline]
pub fn set_override(value: Detected) {
  detect::set_override(value);
}

/// Try to pin the detection result for the rest of the process.
///
/// Useful for bare metal targets where the CPU is known at deployment, and for
/// tests that want to pin the portable path:
///
/// ```
/// # use platform::{Detected, OverrideError};
/// match platform::try_set_override(Detected::portable()) {
///   Ok(()) | Err(OverrideError::AlreadyInitialized) => {}
///   Err(err) => panic!("{err}"),
/// }
/// ```
///
/// # Errors
///
/// See [`detect::try_set_override`].
#[inline]
pub fn try_set_override(value: Detected) -> Result<(), OverrideError> {
  detect::try_set_override(value)
}

//! Runtime CPU detection.
//!
//! [`get()`] returns the capabilities and tuning the engines select on:
//!
//! - Features the build already assumes (`-C target-feature`) via [`caps_static`]
//! - Runtime probing (`is_x86_feature_detected!`, `is_aarch64_feature_detected!`,
//!   CPUID vendor) when `std` is enabled
//! - One probe per process, cached in an [`InitOnce`](crate::InitOnce)
//! - A pinned value supplied before first use, for bare metal deployments
//! - Portable caps under Miri
//!
//! # Pinning
//!
//! ```
//! use platform::{Detected, detect};
//!
//! // Only before first use: once `get()` has cached a value, pinning fails.
//! if detect::try_set_override(Detected::portable()).is_ok() {
//!   assert!(platform::get().caps.is_empty());
//! }
//! ```

use core::fmt;

use crate::{
  caps::{Arch, Caps},
  tune::Tune,
};

mod cache;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86;

#[cfg(test)]
mod tests;

pub use cache::{get, hardware, set_override, try_set_override};

/// Result of the capability probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detected {
  /// Instructions that can run on this machine.
  pub caps: Caps,
  /// Preferences derived from the microarchitecture.
  pub tune: Tune,
  /// Architecture the probe ran on.
  pub arch: Arch,
}

impl Detected {
  /// Portable-only result: no ISA extensions, portable tuning.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self {
      caps: Caps::NONE,
      tune: Tune::PORTABLE,
      arch: Arch::Other,
    }
  }
}

/// Why a pinned detection result was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OverrideError {
  /// Detection already ran and its result is cached for the process.
  AlreadyInitialized,
  /// This target cannot cache anything (no byte atomics).
  Unsupported,
}

impl fmt::Display for OverrideError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::AlreadyInitialized => f.write_str("capability detection already initialized"),
      Self::Unsupported => f.write_str("capability overrides unsupported on this target"),
    }
  }
}

impl core::error::Error for OverrideError {}

/// Features the compiler was told it may assume.
///
/// A `const` value: with `-C target-cpu=native` or explicit
/// `-C target-feature=+sse4.2` the hardware engines need no runtime probe.
///
/// ```
/// const CAPS: platform::Caps = platform::caps_static();
///
/// #[cfg(target_arch = "x86_64")]
/// assert!(CAPS.has(platform::caps::x86::SSE2));
/// #[cfg(target_arch = "aarch64")]
/// assert!(CAPS.has(platform::caps::aarch64::NEON));
/// ```
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;

    let mut caps = x86::SSE2;
    if cfg!(target_feature = "sse4.1") {
      caps = caps.union(x86::SSE41);
    }
    if cfg!(target_feature = "sse4.2") {
      caps = caps.union(x86::SSE42);
    }
    caps
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;

    if cfg!(target_feature = "crc") {
      aarch64::CRC_READY
    } else {
      aarch64::NEON
    }
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    Caps::NONE
  }
}

/// Probe the CPU now, bypassing the cache and any pinned value.
///
/// Without `std` only [`caps_static`] is available.
#[inline]
#[must_use]
pub fn detect_uncached() -> Detected {
  #[cfg(target_arch = "x86_64")]
  {
    x86::detect()
  }

  #[cfg(target_arch = "aarch64")]
  {
    aarch64::detect()
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    Detected {
      caps: caps_static(),
      tune: Tune::PORTABLE,
      arch: Arch::current(),
    }
  }
}

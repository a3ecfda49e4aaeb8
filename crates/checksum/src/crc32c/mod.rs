//! CRC32-C (Castagnoli) checksum.
//!
//! CRC32-C uses polynomial 0x1EDC6F41, which was specifically designed to have
//! excellent error detection properties for data storage and networking.
//!
//! # Usage
//!
//! ```
//! use checksum::Crc32c;
//!
//! // One-shot computation
//! let crc = Crc32c::checksum(b"hello world");
//!
//! // Incremental computation (for streaming)
//! let mut hasher = Crc32c::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), crc);
//! ```
//!
//! # Hardware Acceleration
//!
//! - **x86_64**: SSE4.2 `crc32` → portable
//! - **aarch64**: CRC32 extension → portable
//!
//! The kernel is chosen once from [`platform::caps()`] and the
//! `CRCMEMCPY_CRC32C_FORCE` override, then cached as a function pointer.

pub(crate) mod portable;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

use crate::{
  combine,
  config::{self, Crc32cConfig, Crc32cForce},
  constants::crc32c::INIT,
  value::Crc32cValue,
};

/// Extend a finalized CRC32-C value over `data`.
///
/// `extend_crc32c(compute_crc32c(a), b) == compute_crc32c(a ++ b)`.
///
/// ```
/// use checksum::{Crc32cValue, extend_crc32c};
///
/// assert_eq!(extend_crc32c(Crc32cValue::ZERO, b"123456789").get(), 0xE306_9283);
/// assert_eq!(extend_crc32c(Crc32cValue::new(7), b""), Crc32cValue::new(7));
/// ```
#[inline]
#[must_use]
pub fn extend_crc32c(crc: Crc32cValue, data: &[u8]) -> Crc32cValue {
  Crc32cValue::new(dispatch(crc.get() ^ INIT, data) ^ INIT)
}

/// CRC32-C of `data`, starting from the empty-input value.
#[inline]
#[must_use]
pub fn compute_crc32c(data: &[u8]) -> Crc32cValue {
  extend_crc32c(Crc32cValue::ZERO, data)
}

/// CRC32-C (Castagnoli) checksum.
///
/// Streaming CRC32-C computation with automatic hardware acceleration when
/// available.
///
/// # Thread Safety
///
/// `Crc32c` is `Send` and `Sync`. Multiple hashers can operate in parallel
/// on different data, and results can be combined using [`combine`](Self::combine).
#[derive(Clone, Debug)]
pub struct Crc32c {
  /// Raw register (inverted; XOR applied on finalize).
  state: u32,
  /// Register value restored by `reset`.
  initial: u32,
}

impl Crc32c {
  /// Create a new hasher with the default initial value.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      state: INIT,
      initial: INIT,
    }
  }

  /// Create a new hasher that continues from a previous CRC.
  ///
  /// ```
  /// use checksum::Crc32c;
  ///
  /// let data = b"hello world";
  /// let (first, second) = data.split_at(6);
  ///
  /// let mut hasher = Crc32c::resume(Crc32c::checksum(first));
  /// hasher.update(second);
  ///
  /// assert_eq!(hasher.finalize(), Crc32c::checksum(data));
  /// ```
  #[inline]
  #[must_use]
  pub const fn resume(crc: Crc32cValue) -> Self {
    Self {
      state: crc.get() ^ INIT,
      initial: crc.get() ^ INIT,
    }
  }

  /// Compute CRC32-C of data in one shot.
  ///
  /// ```
  /// use checksum::Crc32c;
  ///
  /// assert_eq!(Crc32c::checksum(b"123456789").get(), 0xE306_9283);
  /// ```
  #[inline]
  #[must_use]
  pub fn checksum(data: &[u8]) -> Crc32cValue {
    compute_crc32c(data)
  }

  /// Update the hasher with additional data.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.state = dispatch(self.state, data);
  }

  /// Finalize and return the checksum.
  ///
  /// This does not consume the hasher, allowing further updates.
  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> Crc32cValue {
    Crc32cValue::new(self.state ^ INIT)
  }

  /// Reset the hasher to its initial state.
  #[inline]
  pub fn reset(&mut self) {
    self.state = self.initial;
  }

  /// Combine two CRCs: `crc(A || B)` from `crc(A)`, `crc(B)`, `len(B)`.
  ///
  /// ```
  /// use checksum::Crc32c;
  ///
  /// let data = b"hello world";
  /// let (a, b) = data.split_at(6);
  ///
  /// let combined = Crc32c::combine(Crc32c::checksum(a), Crc32c::checksum(b), b.len());
  /// assert_eq!(combined, Crc32c::checksum(data));
  /// ```
  #[inline]
  #[must_use]
  pub fn combine(crc_a: Crc32cValue, crc_b: Crc32cValue, len_b: usize) -> Crc32cValue {
    combine::crc32c_combine(crc_a, crc_b, len_b)
  }
}

impl Default for Crc32c {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(feature = "std")]
impl std::io::Write for Crc32c {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// A raw-register CRC32-C kernel.
#[derive(Clone, Copy)]
struct Kernel {
  name: &'static str,
  func: fn(u32, &[u8]) -> u32,
}

const PORTABLE: Kernel = Kernel {
  name: "portable/slice8",
  func: portable::compute,
};

#[allow(unused_variables)] // `caps` only used on x86_64/aarch64
fn select_kernel(config: Crc32cConfig, caps: platform::Caps) -> Kernel {
  if config.effective_force == Crc32cForce::Portable || !config::has_hwcrc(caps) {
    return PORTABLE;
  }

  #[cfg(target_arch = "x86_64")]
  {
    Kernel {
      name: "x86_64/sse4.2",
      func: x86_64::compute_sse42_runtime,
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    Kernel {
      name: "aarch64/crc",
      func: aarch64::compute_crc_runtime,
    }
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    PORTABLE
  }
}

#[inline]
fn kernel() -> Kernel {
  static KERNEL: platform::InitOnce<Kernel> = platform::InitOnce::new();
  KERNEL.get_or_init(|| {
    let cfg = config::get();
    let k = select_kernel(cfg, platform::caps());
    log::debug!(
      "crc32c kernel: {} (force requested={}, effective={})",
      k.name,
      cfg.requested_force.as_str(),
      cfg.effective_force.as_str()
    );
    k
  })
}

/// Run the selected kernel over `data` starting from the raw register `crc`.
#[inline]
fn dispatch(crc: u32, data: &[u8]) -> u32 {
  if data.is_empty() {
    return crc;
  }
  (kernel().func)(crc, data)
}

/// Returns the CRC32-C backend in use on the current machine.
///
/// Intended for diagnostics and benchmarking.
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  kernel().name
}

//! Process-wide detection state.
//!
//! Two cells: what the CPU reports, and what selection sees. They differ only
//! when a caller pins a value with [`try_set_override`] before first use.

use super::{Detected, OverrideError, detect_uncached};
use crate::once::InitOnce;

static HARDWARE: InitOnce<Detected> = InitOnce::new();
static SELECTED: InitOnce<Detected> = InitOnce::new();

#[cfg(test)]
pub(super) static PROBES: core::sync::atomic::AtomicUsize = core::sync::atomic::AtomicUsize::new(0);

/// What the CPU reports, probed once per process.
///
/// Never replaced by a pinned value, so engines can check that the
/// instructions they are about to run exist.
#[inline]
#[must_use]
pub fn hardware() -> Detected {
  if cfg!(miri) {
    return Detected::portable();
  }
  HARDWARE.get_or_init(|| {
    #[cfg(test)]
    PROBES.fetch_add(1, core::sync::atomic::Ordering::Relaxed);
    detect_uncached()
  })
}

/// The detection result selection uses: the pinned value if one was set
/// before first use, otherwise [`hardware()`].
#[inline]
#[must_use]
pub fn get() -> Detected {
  SELECTED.get_or_init(hardware)
}

/// Pin the value [`get()`] returns.
///
/// # Panics
///
/// Panics if [`try_set_override`] fails.
#[cold]
pub fn set_override(value: Detected) {
  if let Err(err) = try_set_override(value) {
    panic!("platform::set_override failed: {err}");
  }
}

/// Pin the value [`get()`] returns for the rest of the process.
///
/// # Errors
///
/// [`OverrideError::AlreadyInitialized`] once [`get()`] has cached a value,
/// [`OverrideError::Unsupported`] on targets without byte atomics.
#[cold]
pub fn try_set_override(value: Detected) -> Result<(), OverrideError> {
  if cfg!(not(target_has_atomic = "8")) {
    return Err(OverrideError::Unsupported);
  }
  SELECTED.set(value).map_err(|_| OverrideError::AlreadyInitialized)
}

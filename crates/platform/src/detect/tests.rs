use super::*;
use crate::{caps::Arch, tune::TuneKind};

#[test]
#[cfg(not(miri))] // get() returns portable() under Miri, which has a different arch
fn get_returns_valid() {
  let det = get();

  #[cfg(target_arch = "x86_64")]
  assert_eq!(det.arch, Arch::X86_64);
  #[cfg(target_arch = "aarch64")]
  assert_eq!(det.arch, Arch::Aarch64);

  assert!(det.tune.lanes() >= 1);
  assert!(det.tune.non_temporal_threshold > 0);
}

#[test]
#[cfg(not(miri))] // Uses syscalls for feature detection
fn detect_uncached_consistent() {
  let d1 = detect_uncached();
  let d2 = detect_uncached();
  assert_eq!(d1, d2);
}

#[test]
#[cfg(not(miri))]
fn get_is_stable_across_calls() {
  assert_eq!(get(), get());
  assert_eq!(crate::caps(), get().caps);
  assert_eq!(crate::tune(), get().tune);
  assert_eq!(crate::arch(), get().arch);
}

#[test]
#[cfg(not(miri))]
fn get_is_stable_across_threads() {
  let expected = get();
  let handles: std::vec::Vec<_> = (0..8).map(|_| std::thread::spawn(get)).collect();
  for h in handles {
    assert_eq!(h.join().unwrap(), expected);
  }
}

#[test]
#[cfg(not(miri))]
fn override_rejected_after_init() {
  let _ = get();
  assert_eq!(
    try_set_override(Detected::portable()),
    Err(OverrideError::AlreadyInitialized)
  );
}

#[test]
#[cfg(not(miri))]
fn hardware_probes_once_per_process() {
  use core::sync::atomic::Ordering;

  let expected = hardware();
  let handles: std::vec::Vec<_> = (0..8)
    .map(|_| std::thread::spawn(|| (0..1000).map(|_| (hardware(), get())).last()))
    .collect();
  for h in handles {
    let (hw, selected) = h.join().unwrap().unwrap();
    assert_eq!(hw, expected);
    assert_eq!(selected, get());
  }
  assert_eq!(super::cache::PROBES.load(Ordering::Relaxed), 1);
  assert_eq!(hardware(), detect_uncached());
}

#[test]
#[cfg(miri)]
fn miri_returns_portable() {
  let det = get();
  assert_eq!(det.caps, Caps::NONE);
  assert_eq!(det.arch, Arch::Other);
}

#[test]
fn portable_has_no_caps() {
  let p = Detected::portable();
  assert!(p.caps.is_empty());
  assert_eq!(p.tune.kind, TuneKind::Portable);
}

#[test]
fn override_error_display() {
  use std::string::ToString;
  assert_eq!(
    OverrideError::AlreadyInitialized.to_string(),
    "capability detection already initialized"
  );
  assert!(OverrideError::Unsupported.to_string().contains("unsupported"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Detection Tests (caps_static)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn caps_static_is_const() {
  const STATIC_CAPS: Caps = caps_static();
  let _ = STATIC_CAPS;
}

#[test]
#[cfg(target_arch = "x86_64")]
fn caps_static_x86_64_baseline() {
  assert!(caps_static().has(crate::caps::x86::SSE2));
}

#[test]
#[cfg(target_arch = "aarch64")]
fn caps_static_aarch64_baseline() {
  assert!(caps_static().has(crate::caps::aarch64::NEON));
}

#[test]
#[cfg(not(miri))]
fn runtime_is_superset_of_static() {
  let det = detect_uncached();
  assert!(det.caps.has(caps_static()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tune Selection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
#[cfg(target_arch = "x86_64")]
fn x86_tune_requires_crc32c() {
  use super::x86::{Vendor, select_tune};
  use crate::caps::x86;

  assert_eq!(select_tune(x86::SSE2, Vendor::Intel), Tune::PORTABLE);
  assert_eq!(select_tune(x86::SSE42, Vendor::Amd), Tune::PORTABLE);

  assert_eq!(select_tune(x86::SSE2 | x86::SSE41, Vendor::Intel), Tune::PORTABLE);

  let ready = x86::SSE2 | x86::CRC32C_READY;
  assert_eq!(select_tune(ready, Vendor::Intel), Tune::X86_INTEL);
  assert_eq!(select_tune(ready, Vendor::Amd), Tune::X86_AMD);
  assert_eq!(select_tune(ready, Vendor::Unknown), Tune::DEFAULT);
}

#[test]
#[cfg(target_arch = "aarch64")]
fn aarch64_tune_requires_crc() {
  use super::aarch64::select_tune;
  use crate::caps::aarch64;

  assert_eq!(select_tune(aarch64::NEON), Tune::PORTABLE);
  assert_eq!(select_tune(aarch64::CRC_READY), Tune::AARCH64);
}

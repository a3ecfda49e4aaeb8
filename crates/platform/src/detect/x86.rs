// ─────────────────────────────────────────────────────────────────────────────
// x86_64 Detection
// ─────────────────────────────────────────────────────────────────────────────

use super::{Detected, caps_static};
use crate::{
  caps::{Arch, Caps, x86},
  tune::Tune,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Vendor {
  Intel,
  Amd,
  Unknown,
}

pub(super) fn detect() -> Detected {
  // SSE2 is part of the x86_64 baseline and already in the static set.
  #[cfg_attr(not(feature = "std"), allow(unused_mut))]
  let mut caps = caps_static();

  #[cfg(feature = "std")]
  {
    caps |= runtime_caps();
  }

  Detected {
    caps,
    tune: select_tune(caps, vendor()),
    arch: Arch::X86_64,
  }
}

#[cfg(feature = "std")]
fn runtime_caps() -> Caps {
  use std::arch::is_x86_feature_detected;

  let mut caps = Caps::NONE;
  if is_x86_feature_detected!("sse4.1") {
    caps |= x86::SSE41;
  }
  if is_x86_feature_detected!("sse4.2") {
    caps |= x86::SSE42;
  }
  caps
}

/// Read the CPUID vendor string (leaf 0).
#[allow(unsafe_code)]
fn vendor() -> Vendor {
  use core::arch::x86_64::__cpuid;

  // "GenuineIntel" / "AuthenticAMD" / "HygonGenuine" split across ebx:edx:ecx.
  const INTEL_EBX: u32 = 0x756E_6547; // "Genu"
  const AMD_EBX: u32 = 0x6874_7541; // "Auth"
  const HYGON_EBX: u32 = 0x6F67_7948; // "Hygo"

  // SAFETY: CPUID leaf 0 is available on every x86_64 processor.
  #[allow(unused_unsafe)]
  let leaf0 = unsafe { __cpuid(0) };

  match leaf0.ebx {
    INTEL_EBX => Vendor::Intel,
    AMD_EBX | HYGON_EBX => Vendor::Amd,
    _ => Vendor::Unknown,
  }
}

pub(super) fn select_tune(caps: Caps, vendor: Vendor) -> Tune {
  if !caps.has(x86::CRC32C_READY) {
    return Tune::PORTABLE;
  }

  match vendor {
    Vendor::Intel => Tune::X86_INTEL,
    Vendor::Amd => Tune::X86_AMD,
    Vendor::Unknown => Tune::DEFAULT,
  }
}

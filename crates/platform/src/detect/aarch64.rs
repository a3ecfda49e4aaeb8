// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Detection
// ─────────────────────────────────────────────────────────────────────────────

use super::{Detected, caps_static};
use crate::{
  caps::{Arch, Caps, aarch64},
  tune::Tune,
};

pub(super) fn detect() -> Detected {
  #[cfg_attr(not(feature = "std"), allow(unused_mut))]
  let mut caps = caps_static();

  #[cfg(feature = "std")]
  {
    caps |= runtime_caps();
  }

  Detected {
    caps,
    tune: select_tune(caps),
    arch: Arch::Aarch64,
  }
}

#[cfg(feature = "std")]
fn runtime_caps() -> Caps {
  if std::arch::is_aarch64_feature_detected!("crc") {
    aarch64::CRC
  } else {
    Caps::NONE
  }
}

pub(super) fn select_tune(caps: Caps) -> Tune {
  if caps.has(aarch64::CRC_READY) {
    Tune::AARCH64
  } else {
    Tune::PORTABLE
  }
}

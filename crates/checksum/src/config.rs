//! CRC32-C runtime configuration (forced backend selection).
//!
//! Forced modes are always clamped to detected CPU capabilities.

use platform::Caps;

/// Forced backend selection for CRC32-C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Crc32cForce {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Force the portable table-based implementation.
  Portable,
  /// Force hardware CRC instructions (if available).
  ///
  /// - x86_64: SSE4.2 `crc32`
  /// - aarch64: ARMv8 CRC extension
  Hwcrc,
}

impl Crc32cForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Hwcrc => "hwcrc",
    }
  }

  /// Parse a force name, accepting a few common aliases.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable")
      || value.eq_ignore_ascii_case("scalar")
      || value.eq_ignore_ascii_case("table")
    {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("hwcrc") || value.eq_ignore_ascii_case("crc") {
      return Some(Self::Hwcrc);
    }
    None
  }
}

/// Full CRC32-C runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crc32cConfig {
  /// Requested force mode (env/programmatic).
  pub requested_force: Crc32cForce,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Crc32cForce,
}

impl Crc32cConfig {
  /// Build a configuration from an explicit request and capability set.
  #[must_use]
  pub fn from_parts(requested_force: Crc32cForce, caps: Caps) -> Self {
    Self {
      requested_force,
      effective_force: clamp_force_to_caps(requested_force, caps),
    }
  }
}

/// Environment variable selecting the CRC32-C backend.
pub const FORCE_ENV: &str = "CRCMEMCPY_CRC32C_FORCE";

#[cfg(feature = "std")]
fn read_env_force() -> Crc32cForce {
  let Ok(value) = std::env::var(FORCE_ENV) else {
    return Crc32cForce::Auto;
  };
  if value.trim().is_empty() {
    return Crc32cForce::Auto;
  }
  match Crc32cForce::parse(&value) {
    Some(force) => force,
    None => {
      log::warn!("ignoring {FORCE_ENV}={value:?}: expected auto, portable or hwcrc");
      Crc32cForce::Auto
    }
  }
}

#[cfg(feature = "std")]
fn requested_force() -> Crc32cForce {
  use std::sync::OnceLock;
  static FORCE: OnceLock<Crc32cForce> = OnceLock::new();
  *FORCE.get_or_init(read_env_force)
}

#[cfg(not(feature = "std"))]
fn requested_force() -> Crc32cForce {
  Crc32cForce::Auto
}

/// True when the capability set includes the hardware CRC32-C instruction.
#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64/aarch64
pub fn has_hwcrc(caps: Caps) -> bool {
  #[cfg(target_arch = "x86_64")]
  {
    caps.has(platform::caps::x86::SSE42)
  }
  #[cfg(target_arch = "aarch64")]
  {
    caps.has(platform::caps::aarch64::CRC)
  }
  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  {
    false
  }
}

#[inline]
#[must_use]
fn clamp_force_to_caps(requested: Crc32cForce, caps: Caps) -> Crc32cForce {
  match requested {
    Crc32cForce::Auto | Crc32cForce::Portable => requested,
    Crc32cForce::Hwcrc if has_hwcrc(caps) => Crc32cForce::Hwcrc,
    Crc32cForce::Hwcrc => Crc32cForce::Auto,
  }
}

/// Get the effective CRC32-C configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Crc32cConfig {
  Crc32cConfig::from_parts(requested_force(), platform::caps())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_accepts_aliases() {
    assert_eq!(Crc32cForce::parse("AUTO"), Some(Crc32cForce::Auto));
    assert_eq!(Crc32cForce::parse(" table "), Some(Crc32cForce::Portable));
    assert_eq!(Crc32cForce::parse("crc"), Some(Crc32cForce::Hwcrc));
    assert_eq!(Crc32cForce::parse("pclmul"), None);
  }

  #[test]
  fn as_str_round_trips() {
    for f in [Crc32cForce::Auto, Crc32cForce::Portable, Crc32cForce::Hwcrc] {
      assert_eq!(Crc32cForce::parse(f.as_str()), Some(f));
    }
  }

  #[test]
  fn hwcrc_clamped_without_caps() {
    let cfg = Crc32cConfig::from_parts(Crc32cForce::Hwcrc, Caps::NONE);
    assert_eq!(cfg.requested_force, Crc32cForce::Hwcrc);
    assert_eq!(cfg.effective_force, Crc32cForce::Auto);

    let cfg = Crc32cConfig::from_parts(Crc32cForce::Portable, Caps::NONE);
    assert_eq!(cfg.effective_force, Crc32cForce::Portable);
  }

  #[test]
  #[cfg(target_arch = "x86_64")]
  fn hwcrc_kept_with_sse42() {
    let cfg = Crc32cConfig::from_parts(Crc32cForce::Hwcrc, platform::caps::x86::SSE42);
    assert_eq!(cfg.effective_force, Crc32cForce::Hwcrc);
  }
}

//! Engine selection configuration (overrides + tunables).
//!
//! Defaults come from the detected [`Tune`](platform::Tune). With `std`, the
//! environment can override them:
//!
//! | Variable | Values |
//! |----------|--------|
//! | `CRCMEMCPY_FORCE` | `auto`, `fallback`, `accelerated`, `nontemporal` |
//! | `CRCMEMCPY_NT_THRESHOLD` | bytes |
//! | `CRCMEMCPY_VECTOR_LANES` | `0..=3` |
//! | `CRCMEMCPY_INTEGER_LANES` | `0..=3` |
//!
//! Invalid values are logged and ignored. Forced modes are clamped to
//! detected CPU capabilities.

use core::{fmt, str::FromStr};

use platform::Detected;

#[cfg(feature = "std")]
use crate::lanes::{MAX_INTEGER_LANES, MAX_VECTOR_LANES};
use crate::{error::ParseError, lanes};

pub const FORCE_ENV: &str = "CRCMEMCPY_FORCE";
pub const NT_THRESHOLD_ENV: &str = "CRCMEMCPY_NT_THRESHOLD";
pub const VECTOR_LANES_ENV: &str = "CRCMEMCPY_VECTOR_LANES";
pub const INTEGER_LANES_ENV: &str = "CRCMEMCPY_INTEGER_LANES";

/// Forced engine selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineForce {
  /// Accelerated engines when the CPU supports them, fallback otherwise.
  #[default]
  Auto,
  /// Fallback for both the temporal and non-temporal slots.
  Fallback,
  /// Lane engine for both slots (if available).
  Accelerated,
  /// Non-temporal engine for both slots.
  NonTemporal,
}

impl EngineForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Fallback => "fallback",
      Self::Accelerated => "accelerated",
      Self::NonTemporal => "nontemporal",
    }
  }
}

impl fmt::Display for EngineForce {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EngineForce {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.trim().eq_ignore_ascii_case("auto") {
      return Ok(Self::Auto);
    }
    match s.parse::<crate::EngineKind>() {
      Ok(crate::EngineKind::Fallback) => Ok(Self::Fallback),
      Ok(crate::EngineKind::Accelerated) => Ok(Self::Accelerated),
      Ok(crate::EngineKind::NonTemporal) => Ok(Self::NonTemporal),
      Err(_) => Err(ParseError::new("engine force", "auto, fallback, accelerated, nontemporal")),
    }
  }
}

/// Selection tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tunables {
  /// 128-bit lanes for the temporal accelerated engine.
  pub vector_lanes: u8,
  /// 64-bit lanes for the temporal accelerated engine.
  pub integer_lanes: u8,
  /// `CopyPolicy::Auto` goes non-temporal at this many bytes.
  pub non_temporal_threshold: usize,
}

/// User-supplied overrides; `None` keeps the detected default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
  pub force: EngineForce,
  pub non_temporal_threshold: Option<usize>,
  pub vector_lanes: Option<u8>,
  pub integer_lanes: Option<u8>,
}

/// Full engine configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  /// Requested force mode (env/programmatic).
  pub requested_force: EngineForce,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: EngineForce,
  pub tunables: Tunables,
}

impl Config {
  /// Combine detected defaults with explicit overrides.
  ///
  /// ```
  /// use crc_memcpy::config::{Config, EngineForce, Overrides};
  ///
  /// let ov = Overrides { force: EngineForce::Accelerated, ..Overrides::default() };
  /// let cfg = Config::from_parts(&ov, &platform::Detected::portable());
  /// // No CRC instructions in a portable probe: the force is dropped.
  /// assert_eq!(cfg.effective_force, EngineForce::Auto);
  /// ```
  #[must_use]
  pub fn from_parts(overrides: &Overrides, det: &Detected) -> Self {
    let (vector_lanes, integer_lanes) = lanes::clamp_lanes(
      overrides.vector_lanes.unwrap_or(det.tune.vector_lanes),
      overrides.integer_lanes.unwrap_or(det.tune.integer_lanes),
    );
    Self {
      requested_force: overrides.force,
      effective_force: clamp_force_to_caps(overrides.force, det),
      tunables: Tunables {
        vector_lanes,
        integer_lanes,
        non_temporal_threshold: overrides.non_temporal_threshold.unwrap_or(det.tune.non_temporal_threshold),
      },
    }
  }
}

#[inline]
#[must_use]
fn clamp_force_to_caps(requested: EngineForce, det: &Detected) -> EngineForce {
  match requested {
    EngineForce::Accelerated if !lanes::caps_support_lanes(det.caps) => EngineForce::Auto,
    other => other,
  }
}

/// Build overrides from a variable lookup; blank values count as unset.
#[cfg(feature = "std")]
fn overrides_from(lookup: impl Fn(&str) -> Option<std::string::String>) -> Overrides {
  use std::{borrow::ToOwned, string::String};

  let var = |name: &str| -> Option<String> {
    let value = lookup(name)?;
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_owned()) }
  };

  let parse_lanes = |name: &str, max: u8| -> Option<u8> {
    let value = var(name)?;
    match value.parse::<u8>() {
      Ok(n) if n <= max => Some(n),
      _ => {
        log::warn!("ignoring {name}={value:?}: expected 0..={max}");
        None
      }
    }
  };

  let force = var(FORCE_ENV).map_or(EngineForce::Auto, |value| match value.parse() {
    Ok(force) => force,
    Err(err) => {
      log::warn!("ignoring {FORCE_ENV}={value:?}: {err}");
      EngineForce::Auto
    }
  });

  let non_temporal_threshold = var(NT_THRESHOLD_ENV).and_then(|value| match value.parse::<usize>() {
    Ok(n) => Some(n),
    Err(err) => {
      log::warn!("ignoring {NT_THRESHOLD_ENV}={value:?}: {err}");
      None
    }
  });

  Overrides {
    force,
    non_temporal_threshold,
    vector_lanes: parse_lanes(VECTOR_LANES_ENV, MAX_VECTOR_LANES),
    integer_lanes: parse_lanes(INTEGER_LANES_ENV, MAX_INTEGER_LANES),
  }
}

/// Overrides read from the environment once per process.
#[cfg(feature = "std")]
#[must_use]
pub fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(|| overrides_from(|name| std::env::var(name).ok()))
}

#[cfg(not(feature = "std"))]
#[must_use]
pub fn overrides() -> Overrides {
  Overrides::default()
}

/// Get the effective configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Config {
  Config::from_parts(&overrides(), &platform::get())
}

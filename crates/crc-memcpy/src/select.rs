//! Engine selection: one [`EngineSet`] per process.
//!
//! # Selection Order
//!
//! 1. `effective_force` from [`Config`] (clamped to detected caps)
//! 2. Hardware CRC present: lane engine (temporal) + non-temporal engine
//! 3. Otherwise: fallback for both slots
//!
//! The set is built from [`platform::get()`] and [`config::get()`] on first
//! use, then cached.

use core::fmt;

use platform::Detected;

use crate::{
  config::{self, Config, EngineForce},
  engine::{Engine, EngineKind},
  fallback::FallbackEngine,
  lanes::LaneEngine,
  non_temporal::NonTemporalEngine,
  policy::CopyPolicy,
};

const FALLBACK: Engine = Engine::Fallback(FallbackEngine);

/// The temporal and non-temporal engines the facade forwards to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineSet {
  /// Engine whose writes stay in cache.
  pub temporal: Engine,
  /// Engine for large copies whose destination is not read back soon.
  pub non_temporal: Engine,
  /// `CopyPolicy::Auto` picks `non_temporal` at this many bytes.
  pub non_temporal_threshold: usize,
}

impl EngineSet {
  /// Both slots on the fallback engine.
  pub const FALLBACK: Self = Self {
    temporal: FALLBACK,
    non_temporal: FALLBACK,
    non_temporal_threshold: usize::MAX,
  };

  /// Build the set for `det` under `cfg`.
  ///
  /// ```
  /// use crc_memcpy::{EngineKind, EngineSet, config};
  ///
  /// let det = platform::Detected::portable();
  /// let cfg = config::Config::from_parts(&config::Overrides::default(), &det);
  /// let set = EngineSet::select(&det, &cfg);
  /// assert_eq!(set.temporal.kind(), EngineKind::Fallback);
  /// assert_eq!(set.non_temporal.kind(), EngineKind::Fallback);
  /// ```
  #[must_use]
  pub fn select(det: &Detected, cfg: &Config) -> Self {
    let t = cfg.tunables;
    let lanes = LaneEngine::with_caps(t.vector_lanes, t.integer_lanes, det.caps).map(Engine::Lanes);
    let nt = Engine::NonTemporal(NonTemporalEngine);

    let (temporal, non_temporal) = match cfg.effective_force {
      EngineForce::Fallback => (FALLBACK, FALLBACK),
      EngineForce::NonTemporal => (nt, nt),
      EngineForce::Accelerated => {
        let e = lanes.unwrap_or(FALLBACK);
        (e, e)
      }
      EngineForce::Auto => match lanes {
        Some(e) => (e, nt),
        None => (FALLBACK, FALLBACK),
      },
    };

    Self {
      temporal,
      non_temporal,
      non_temporal_threshold: t.non_temporal_threshold,
    }
  }

  /// The engine `policy` picks for a copy of `len` bytes.
  #[inline]
  #[must_use]
  pub const fn engine_for(&self, policy: CopyPolicy, len: usize) -> &Engine {
    if policy.prefers_non_temporal(len, self.non_temporal_threshold) {
      &self.non_temporal
    } else {
      &self.temporal
    }
  }
}

impl fmt::Display for EngineSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "temporal={} non_temporal={}", self.temporal, self.non_temporal)?;
    if self.non_temporal_threshold != usize::MAX {
      write!(f, " threshold={}", self.non_temporal_threshold)?;
    }
    Ok(())
  }
}

static ENGINES: platform::InitOnce<EngineSet> = platform::InitOnce::new();

#[cfg(test)]
static BUILDS: core::sync::atomic::AtomicUsize = core::sync::atomic::AtomicUsize::new(0);

/// The process-wide engine set.
///
/// The first call probes the CPU and reads configuration; later calls return
/// the cached value, with or without `std`.
#[inline]
#[must_use]
pub fn engines() -> EngineSet {
  ENGINES.get_or_init(|| {
    #[cfg(test)]
    BUILDS.fetch_add(1, core::sync::atomic::Ordering::Relaxed);
    let det = platform::get();
    let cfg = config::get();
    let set = EngineSet::select(&det, &cfg);
    log::debug!(
      "crc-memcpy engines: {set} (tune={}, force requested={}, effective={})",
      det.tune.name(),
      cfg.requested_force,
      cfg.effective_force
    );
    set
  })
}

/// Build an engine of `kind` directly, ignoring configuration.
///
/// Lane counts only matter for [`EngineKind::Accelerated`] and are clamped.
/// When the CPU lacks the instructions an accelerated engine needs, the
/// fallback engine is returned instead.
///
/// ```
/// use checksum::{Crc32cValue, compute_crc32c};
/// use crc_memcpy::{EngineKind, engine_for_testing};
///
/// let engine = engine_for_testing(EngineKind::Accelerated, 1, 2);
/// let mut dst = [0u8; 11];
/// assert_eq!(engine.compute(&mut dst, b"hello world", Crc32cValue::ZERO), compute_crc32c(b"hello world"));
/// ```
#[must_use]
pub fn engine_for_testing(kind: EngineKind, vector_lanes: u8, integer_lanes: u8) -> Engine {
  match kind {
    EngineKind::Fallback => FALLBACK,
    EngineKind::NonTemporal => Engine::NonTemporal(NonTemporalEngine),
    EngineKind::Accelerated => {
      LaneEngine::with_caps(vector_lanes, integer_lanes, platform::hardware().caps).map_or(FALLBACK, Engine::Lanes)
    }
  }
}

//! Microarchitecture-derived tuning hints.
//!
//! `Tune` answers: "What should I *prefer* on this machine?"
//!
//! Unlike [`Caps`](crate::Caps) (which describes what's *possible*), `Tune`
//! describes what's *preferable* for the copy engines:
//!
//! - How many interleaved CRC lanes the accelerated engine runs, split into
//!   128-bit vector lanes and 64-bit integer lanes
//! - The copy size at which cache-bypassing stores start to pay off
//!
//! Lane presets come from the shape of the CRC unit: on Intel cores the
//! `crc32` instruction has a 3-cycle latency and 1/cycle throughput, so three
//! independent streams saturate it. AMD Zen cores prefer a mix of one vector
//! lane and two integer lanes. Neoverse/Apple cores run well with two vector
//! lanes and one integer lane.

/// Identifies which tuning preset is in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TuneKind {
  Default,
  Portable,
  IntelX86,
  AmdX86,
  Aarch64,
}

impl TuneKind {
  /// Returns the human-readable name for this tuning preset.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Default => "Default",
      Self::Portable => "Portable",
      Self::IntelX86 => "Intel x86_64",
      Self::AmdX86 => "AMD x86_64",
      Self::Aarch64 => "AArch64",
    }
  }
}

/// Tuning hints for engine selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tune {
  /// Which preset produced these values.
  pub kind: TuneKind,
  /// 128-bit vector lanes for the accelerated temporal engine.
  pub vector_lanes: u8,
  /// 64-bit integer lanes for the accelerated temporal engine.
  pub integer_lanes: u8,
  /// Copies of at least this many bytes prefer the non-temporal engine.
  pub non_temporal_threshold: usize,
}

impl Tune {
  /// Hints for targets without hardware CRC.
  pub const PORTABLE: Self = Self {
    kind: TuneKind::Portable,
    vector_lanes: 0,
    integer_lanes: 1,
    non_temporal_threshold: usize::MAX,
  };

  /// Hints used when the microarchitecture is unknown.
  pub const DEFAULT: Self = Self {
    kind: TuneKind::Default,
    vector_lanes: 1,
    integer_lanes: 2,
    non_temporal_threshold: 1 << 20,
  };

  pub const X86_INTEL: Self = Self {
    kind: TuneKind::IntelX86,
    vector_lanes: 3,
    integer_lanes: 0,
    non_temporal_threshold: 1 << 20,
  };

  pub const X86_AMD: Self = Self {
    kind: TuneKind::AmdX86,
    vector_lanes: 1,
    integer_lanes: 2,
    non_temporal_threshold: 2 << 20,
  };

  pub const AARCH64: Self = Self {
    kind: TuneKind::Aarch64,
    vector_lanes: 2,
    integer_lanes: 1,
    non_temporal_threshold: 1 << 20,
  };

  /// Total number of interleaved CRC lanes.
  #[inline]
  #[must_use]
  pub const fn lanes(&self) -> usize {
    self.vector_lanes as usize + self.integer_lanes as usize
  }

  /// Human-readable preset name.
  #[inline]
  #[must_use]
  pub const fn name(&self) -> &'static str {
    self.kind.name()
  }
}

impl Default for Tune {
  fn default() -> Self {
    Self::DEFAULT
  }
}

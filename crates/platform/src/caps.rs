//! CPU capability representation.
//!
//! This module answers the question: "What instructions can I legally run on
//! this machine?" for the small set of ISA extensions the copy engines care
//! about.
//!
//! # Usage
//!
//! ```
//! use platform::Caps;
//!
//! let c = platform::caps();
//! # #[cfg(target_arch = "x86_64")]
//! if c.has(platform::caps::x86::CRC32C_READY) {
//!   // Hardware CRC32C + 128-bit lane extraction
//! }
//! # let _ = Caps::NONE;
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities as a flag word.
///
/// The low byte holds x86_64 features and the next byte aarch64 features;
/// a set only ever carries flags for the architecture it was probed on.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(u16);

impl Caps {
  /// No features.
  pub const NONE: Self = Self(0);

  const fn flag(index: u32) -> Self {
    Self(1 << index)
  }

  /// True when every feature in `required` is present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    self.0 & required.0 == required.0
  }

  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// This set with every feature in `other` cleared.
  #[inline]
  #[must_use]
  pub const fn without(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Names of the features present, lowest flag first.
  pub fn names(self) -> impl Iterator<Item = &'static str> {
    NAMES.iter().filter(move |(cap, _)| self.has(*cap)).map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_set().entries(self.names()).finish()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  Arm,
  Riscv64,
  Powerpc64,
  Wasm32,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "x86") {
      Self::X86
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else if cfg!(target_arch = "arm") {
      Self::Arm
    } else if cfg!(target_arch = "riscv64") {
      Self::Riscv64
    } else if cfg!(target_arch = "powerpc64") {
      Self::Powerpc64
    } else if cfg!(target_arch = "wasm32") {
      Self::Wasm32
    } else {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Arm => "arm",
      Self::Riscv64 => "riscv64",
      Self::Powerpc64 => "powerpc64",
      Self::Wasm32 => "wasm32",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature Flags
// ─────────────────────────────────────────────────────────────────────────────

/// x86_64 features the copy engines read.
pub mod x86 {
  use super::Caps;

  /// Baseline on x86_64; `movntdq` streaming stores.
  pub const SSE2: Caps = Caps::flag(0);
  /// `pextrq`, used to feed 128-bit lanes into the CRC unit.
  pub const SSE41: Caps = Caps::flag(1);
  /// The `crc32` instruction (Castagnoli polynomial).
  pub const SSE42: Caps = Caps::flag(2);

  /// Everything the lane engine needs.
  pub const CRC32C_READY: Caps = SSE41.union(SSE42);
}

/// AArch64 features the copy engines read.
pub mod aarch64 {
  use super::Caps;

  /// Baseline on AArch64; q registers for `stnp` and vector lanes.
  pub const NEON: Caps = Caps::flag(8);
  /// The `crc32c*` instructions.
  pub const CRC: Caps = Caps::flag(9);

  /// Everything the lane engine needs.
  pub const CRC_READY: Caps = CRC.union(NEON);
}

const NAMES: &[(Caps, &str)] = &[
  (x86::SSE2, "sse2"),
  (x86::SSE41, "sse4.1"),
  (x86::SSE42, "sse4.2"),
  (aarch64::NEON, "neon"),
  (aarch64::CRC, "crc"),
];

//! CRC32-C (Castagnoli) with hardware acceleration.
//!
//! This crate is the checksum primitive the copy engines build on:
//!
//! - [`Crc32cValue`]: a finalized CRC32-C value
//! - [`extend_crc32c`] / [`compute_crc32c`]: the pure extend operation
//! - [`Crc32c`]: a streaming hasher
//! - [`crc32c_combine`] / [`crc32c_shift`] / [`ShiftOperator`]: O(log n)
//!   operators for recombining independently computed pieces
//!
//! # Hardware Acceleration
//!
//! | Platform | Instruction |
//! |----------|-------------|
//! | x86_64 | SSE4.2 `crc32` |
//! | aarch64 | ARMv8 CRC32 extension |
//! | everything else | slicing-by-8 tables |
//!
//! # Example
//!
//! ```rust
//! use checksum::{Crc32c, compute_crc32c, crc32c_combine};
//!
//! let data = b"123456789";
//! let crc = compute_crc32c(data);
//! assert_eq!(crc.get(), 0xE306_9283);
//!
//! let mut hasher = Crc32c::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc);
//!
//! let (a, b) = data.split_at(4);
//! assert_eq!(crc32c_combine(compute_crc32c(a), compute_crc32c(b), b.len()), crc);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Without `std`, backend selection uses
//! compile-time target features only.
//!
//! ```toml
//! [dependencies]
//! checksum = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod combine;
pub mod config;
pub mod constants;
mod crc32c;
mod value;

pub use combine::{ShiftOperator, crc32c_combine, crc32c_shift};
pub use config::{Crc32cConfig, Crc32cForce};
pub use crc32c::{Crc32c, compute_crc32c, extend_crc32c, selected_backend};
pub use value::Crc32cValue;

//! Property-based tests for the CRC32-C primitive.
//!
//! These tests verify invariants that must hold for all inputs, not just
//! specific test vectors.

use checksum::{Crc32c, Crc32cValue, compute_crc32c, crc32c_combine, crc32c_shift, extend_crc32c};
use crc_fast::CrcAlgorithm;
use proptest::prelude::*;

/// Reference CRC32-C (iSCSI) from `crc-fast`, extended from `seed`.
fn reference(seed: u32, data: &[u8]) -> u32 {
  let crc = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, data);
  crc_fast::checksum_combine(CrcAlgorithm::Crc32Iscsi, u64::from(seed), crc, data.len() as u64) as u32
}

/// Generate arbitrary byte vectors up to 8KB.
fn arb_data() -> impl Strategy<Value = Vec<u8>> {
  prop::collection::vec(any::<u8>(), 0..8192)
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn matches_reference_crate(data in arb_data(), seed in any::<u32>()) {
    prop_assert_eq!(compute_crc32c(&data).get(), reference(0, &data));
    prop_assert_eq!(extend_crc32c(Crc32cValue::new(seed), &data).get(), reference(seed, &data));
  }

  #[test]
  fn incremental_equals_oneshot(data in arb_data(), split in any::<prop::sample::Index>()) {
    let split = split.index(data.len() + 1);
    let (a, b) = data.split_at(split);

    let mut h = Crc32c::new();
    h.update(a);
    h.update(b);
    prop_assert_eq!(h.finalize(), Crc32c::checksum(&data));
  }

  #[test]
  fn combine_equals_oneshot(data in arb_data(), split in any::<prop::sample::Index>()) {
    let split = split.index(data.len() + 1);
    let (a, b) = data.split_at(split);
    prop_assert_eq!(crc32c_combine(compute_crc32c(a), compute_crc32c(b), b.len()), compute_crc32c(&data));
  }

  #[test]
  fn shift_is_linear(x in any::<u32>(), y in any::<u32>(), len in 0usize..1 << 20) {
    let sx = crc32c_shift(Crc32cValue::new(x), len).get();
    let sy = crc32c_shift(Crc32cValue::new(y), len).get();
    prop_assert_eq!(crc32c_shift(Crc32cValue::new(x ^ y), len).get(), sx ^ sy);
  }

  #[test]
  fn resume_continues(data in arb_data(), split in any::<prop::sample::Index>()) {
    let split = split.index(data.len() + 1);
    let (a, b) = data.split_at(split);
    let mut h = Crc32c::resume(Crc32c::checksum(a));
    h.update(b);
    prop_assert_eq!(h.finalize(), Crc32c::checksum(&data));
  }
}

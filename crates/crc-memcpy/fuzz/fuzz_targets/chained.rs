//! Fuzz chaining: a copy split at arbitrary points through the facade must
//! equal the one-shot checksum.

#![no_main]

use arbitrary::Arbitrary;
use crc_memcpy::{CopyPolicy, Crc32cValue, compute_crc32c, compute_with_policy};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  splits: Vec<usize>,
  non_temporal: bool,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let policy = if input.non_temporal { CopyPolicy::NonTemporal } else { CopyPolicy::Temporal };

  let mut splits: Vec<usize> = input.splits.iter().map(|s| s % (data.len() + 1)).collect();
  splits.push(data.len());
  splits.sort_unstable();
  splits.dedup();

  let mut dst = vec![0u8; data.len()];
  let mut crc = Crc32cValue::ZERO;
  let mut prev = 0;
  for split in splits {
    crc = compute_with_policy(&mut dst[prev..split], &data[prev..split], crc, policy);
    prev = split;
  }

  assert_eq!(crc, compute_crc32c(data), "chained checksum mismatch");
  assert!(dst == *data, "chained copy mismatch");
});

//! Differential fuzzing of every engine against `crc-fast`.

#![no_main]

use arbitrary::Arbitrary;
use crc_fast::CrcAlgorithm;
use crc_memcpy::{Crc32cValue, EngineKind, engine_for_testing};
use libfuzzer_sys::fuzz_target;

/// Reference CRC32-C (iSCSI) from `crc-fast`, extended from `seed`.
fn reference(seed: u32, data: &[u8]) -> u32 {
  let crc = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, data);
  crc_fast::checksum_combine(CrcAlgorithm::Crc32Iscsi, u64::from(seed), crc, data.len() as u64) as u32
}

#[derive(Arbitrary, Debug)]
struct Input {
  seed: u32,
  vector_lanes: u8,
  integer_lanes: u8,
  dst_offset: u8,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let expected = reference(input.seed, &input.data);
  let offset = usize::from(input.dst_offset % 64);

  for kind in [EngineKind::Fallback, EngineKind::Accelerated, EngineKind::NonTemporal] {
    let engine = engine_for_testing(kind, input.vector_lanes, input.integer_lanes);
    let mut buf = vec![0u8; input.data.len() + offset];
    let crc = engine.compute(&mut buf[offset..], &input.data, Crc32cValue::new(input.seed));

    assert_eq!(
      crc.get(),
      expected,
      "{} mismatch: len={}, offset={offset}",
      engine.name(),
      input.data.len()
    );
    assert!(buf[offset..] == input.data[..], "{} copy mismatch", engine.name());
  }
});

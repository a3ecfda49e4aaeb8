//! Known-answer and differential tests for the CRC32-C primitive.

use checksum::{Crc32c, Crc32cValue, ShiftOperator, compute_crc32c, crc32c_combine, crc32c_shift, extend_crc32c};
use crc_fast::CrcAlgorithm;

/// Reference CRC32-C (iSCSI) from `crc-fast`, extended from `seed`.
fn reference(seed: u32, data: &[u8]) -> u32 {
  let crc = crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, data);
  crc_fast::checksum_combine(CrcAlgorithm::Crc32Iscsi, u64::from(seed), crc, data.len() as u64) as u32
}

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

fn crc32c_bitwise(data: &[u8]) -> u32 {
  let mut crc = 0xffff_ffffu32;
  for &b in data {
    crc ^= b as u32;
    for _ in 0..8 {
      let mask = 0u32.wrapping_sub(crc & 1);
      crc = (crc >> 1) ^ (0x82F6_3B78 & mask);
    }
  }
  crc ^ 0xffff_ffff
}

// ─────────────────────────────────────────────────────────────────────────────
// Known answers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn golden_vectors() {
  let cases: [(&[u8], u32); 5] = [
    (b"", 0x0000_0000),
    (b"123456789", 0xE306_9283),
    (b"hello world", 0xC994_65AA),
    (&[0u8; 32], 0x8A91_36AA),
    (&[0xFFu8; 32], 0x62A8_AB43),
  ];
  for (data, expected) in cases {
    let got = compute_crc32c(data).get();
    assert_eq!(got, expected, "len={} got={got:#010X} expected={expected:#010X}", data.len());
  }
}

#[test]
fn matches_bitwise_reference() {
  for len in (0..=300).chain([1023, 1024, 1025, 8191, 8192, 8193]) {
    let data = gen_bytes(len, 0xA076_1D64_78BD_642F ^ len as u64);
    assert_eq!(compute_crc32c(&data).get(), crc32c_bitwise(&data), "len={len}");
  }
}

#[test]
fn matches_crc_fast() {
  for len in [0usize, 1, 3, 8, 17, 255, 4096, 65_537] {
    let data = gen_bytes(len, 0xE703_7ED1_A0B4_28DB ^ len as u64);
    assert_eq!(compute_crc32c(&data).get(), reference(0, &data), "len={len}");

    let seed = 0x5EED_0000 | len as u32;
    assert_eq!(
      extend_crc32c(Crc32cValue::new(seed), &data).get(),
      reference(seed, &data),
      "append len={len}"
    );
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extend / shift / combine
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn extend_threads_through_chunks() {
  let data = gen_bytes(10_000, 42);
  let oneshot = compute_crc32c(&data);
  for chunk in [1usize, 7, 64, 8192] {
    let crc = data.chunks(chunk).fold(Crc32cValue::ZERO, extend_crc32c);
    assert_eq!(crc, oneshot, "chunk={chunk}");
  }
}

#[test]
fn extend_is_affine_in_the_seed() {
  let data = gen_bytes(777, 7);
  let base = compute_crc32c(&data);
  for seed in [1u32, 0xFFFF_FFFF, 0x1357_9BDF] {
    let v = Crc32cValue::new(seed);
    let got = extend_crc32c(v, &data);
    assert_eq!(got.get(), crc32c_shift(v, data.len()).get() ^ base.get());
  }
}

#[test]
fn lane_style_recombination() {
  // Independent regions from a zero seed, recombined left to right.
  let data = gen_bytes(4 * 1024, 99);
  let initial = Crc32cValue::new(0xCAFE_F00D);
  let expected = extend_crc32c(initial, &data);

  let region = 1024;
  let op = ShiftOperator::for_len(region);
  let mut acc = extend_crc32c(initial, &data[..region]);
  for r in data[region..].chunks(region) {
    acc = Crc32cValue::new(op.apply(acc).get() ^ compute_crc32c(r).get());
  }
  assert_eq!(acc, expected);
}

#[test]
fn combine_with_empty_second_part() {
  let a = compute_crc32c(b"abc");
  assert_eq!(crc32c_combine(a, Crc32cValue::ZERO, 0), a);
}

#[test]
fn hasher_streaming() {
  let data = gen_bytes(5000, 3);
  let mut h = Crc32c::new();
  for c in data.chunks(333) {
    h.update(c);
  }
  assert_eq!(h.finalize(), Crc32c::checksum(&data));
}

#[test]
fn backend_name_is_known() {
  let name = checksum::selected_backend();
  assert!(
    ["portable/slice8", "x86_64/sse4.2", "aarch64/crc"].contains(&name),
    "unexpected backend {name}"
  );
}

//! CRC32-C benchmarks.
//!
//! Run: `cargo bench -p checksum -- crc32c`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p checksum -- crc32c`

use checksum::{Crc32cValue, ShiftOperator, compute_crc32c, crc32c_shift};
use crc_fast::CrcAlgorithm;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Standard benchmark sizes.
const SIZES: [usize; 7] = [64, 256, 1024, 4096, 16384, 65536, 1048576];

/// Benchmark the dispatched extend path.
fn bench_dispatch(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/dispatch");
  eprintln!("crc32c backend: {}", checksum::selected_backend());

  for size in SIZES {
    let data = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(compute_crc32c(data)));
    });
  }

  group.finish();
}

/// Benchmark building and applying shift operators.
fn bench_shift(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/shift");
  let v = Crc32cValue::new(0xDEAD_BEEF);

  for size in SIZES {
    group.bench_with_input(BenchmarkId::new("build+apply", size), &size, |b, &size| {
      b.iter(|| core::hint::black_box(crc32c_shift(v, size)));
    });

    let op = ShiftOperator::for_len(size);
    group.bench_with_input(BenchmarkId::new("apply", size), &op, |b, op| {
      b.iter(|| core::hint::black_box(op.apply(v)));
    });
  }

  group.finish();
}

/// Compare against `crc-fast` on the same inputs.
fn bench_reference(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/crc-fast");

  for size in SIZES {
    let data = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(crc_fast::checksum(CrcAlgorithm::Crc32Iscsi, data) as u32));
    });
  }

  group.finish();
}

criterion_group!(benches, bench_dispatch, bench_shift, bench_reference);
criterion_main!(benches);

//! Copy-and-checksum benchmarks.
//!
//! Run: `cargo bench -p crc-memcpy -- copy`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p crc-memcpy -- copy`

use crc_memcpy::{Crc32cValue, Engine, EngineKind, compute, engine_for_testing, engines};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const SIZES: [usize; 7] = [64, 256, 1024, 8192, 65536, 1048576, 16777216];

fn lane_configs() -> Vec<Engine> {
  let mut out: Vec<Engine> = Vec::new();
  for v in 0..=crc_memcpy::MAX_VECTOR_LANES {
    for i in 0..=crc_memcpy::MAX_INTEGER_LANES {
      let e = engine_for_testing(EngineKind::Accelerated, v, i);
      if e.kind() == EngineKind::Accelerated && !out.contains(&e) {
        out.push(e);
      }
    }
  }
  out
}

/// Every engine variant at every size.
fn bench_engines(c: &mut Criterion) {
  let mut group = c.benchmark_group("copy/engine");
  eprintln!("crc-memcpy engines: {}", engines());

  let mut all = vec![
    engine_for_testing(EngineKind::Fallback, 0, 0),
    engine_for_testing(EngineKind::NonTemporal, 0, 0),
  ];
  all.extend(lane_configs());

  for size in SIZES {
    let src = vec![0xA5u8; size];
    let mut dst = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    for engine in &all {
      group.bench_with_input(BenchmarkId::new(engine.name(), size), &src, |b, src| {
        b.iter(|| core::hint::black_box(engine.compute(&mut dst, src, Crc32cValue::ZERO)));
      });
    }
  }

  group.finish();
}

/// Baseline: separate checksum then `copy_from_slice`.
fn bench_baseline(c: &mut Criterion) {
  let mut group = c.benchmark_group("copy/baseline");

  for size in SIZES {
    let src = vec![0xA5u8; size];
    let mut dst = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::new("memcpy", size), &src, |b, src| {
      b.iter(|| dst.copy_from_slice(core::hint::black_box(src)));
    });
    group.bench_with_input(BenchmarkId::new("facade", size), &src, |b, src| {
      b.iter(|| core::hint::black_box(compute(&mut dst, src, Crc32cValue::ZERO)));
    });
  }

  group.finish();
}

criterion_group!(benches, bench_engines, bench_baseline);
criterion_main!(benches);

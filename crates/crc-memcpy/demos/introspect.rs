//! Print the detected CPU, the selected engines, and a quick self-check.
//!
//! Run: `RUST_LOG=debug cargo run -p crc-memcpy --example introspect`

use crc_memcpy::{CopyPolicy, Crc32cValue, compute_crc32c, compute_with_policy, config, engines};

fn main() {
  env_logger::init();

  let det = platform::get();
  let cfg = config::get();
  println!("arch:      {:?}", det.arch);
  println!("caps:      {:?}", det.caps);
  println!("tune:      {} ({} vector + {} integer lanes)", det.tune.name(), det.tune.vector_lanes, det.tune.integer_lanes);
  println!(
    "force:     requested={} effective={}",
    cfg.requested_force, cfg.effective_force
  );
  println!("crc32c:    {}", checksum::selected_backend());
  println!("engines:   {}", engines());

  let src: Vec<u8> = (0..(4usize << 20)).map(|i| (i % 251) as u8).collect();
  let expected = compute_crc32c(&src);
  for policy in [CopyPolicy::Temporal, CopyPolicy::NonTemporal] {
    let mut dst = vec![0u8; src.len()];
    let crc = compute_with_policy(&mut dst, &src, Crc32cValue::ZERO, policy);
    let ok = crc == expected && dst == src;
    println!(
      "{policy}: {} crc={crc} {}",
      engines().engine_for(policy, src.len()),
      if ok { "ok" } else { "MISMATCH" }
    );
  }
}

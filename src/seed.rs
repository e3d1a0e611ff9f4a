use rand::{rngs::SmallRng, SeedableRng};

/// Food RNG for a session. A configured seed makes placement reproducible.
pub fn food_rng(seed:Option<u64>) -> SmallRng {
  SmallRng::seed_from_u64(seed.unwrap_or_else(entropy))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
extern "C" {
  #[wasm_bindgen(js_namespace = Math, js_name = random)]
  fn random() -> f64;
}

#[cfg(target_arch = "wasm32")]
fn entropy() -> u64 {
  // Two draws, since one f64 carries only 53 random bits.
  let hi = (random() * u32::MAX as f64).floor() as u64;
  let lo = (random() * u32::MAX as f64).floor() as u64;
  (hi << 32) | lo
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy() -> u64 {
  use std::time::{SystemTime, UNIX_EPOCH};
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_nanos() as u64)
    .unwrap_or(0x5EED)
}

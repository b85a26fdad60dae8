use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::types::City;

/// Generates a deterministic set of random cities scattered over central
/// Europe, for demo runs without a dataset file and for tests.
pub fn generate_random_cities(count: usize, seed: u64) -> Vec<City> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let lat = rng.gen_range(49.0..55.0);
            let lng = rng.gen_range(14.0..24.0);
            City::new(format!("city-{:02}", i), lat, lng)
        })
        .collect()
}

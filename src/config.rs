pub mod constant {
    pub(crate) const DATASET_PATH: &str = "cities.json";
    pub(crate) const CITY_COUNT: usize = 25;
    pub(crate) const SEED: usize = 64;

    pub(crate) const NUM_ANTS: usize = 20;
    pub(crate) const ALPHA: f64 = 1.0;
    pub(crate) const BETA: f64 = 2.0;
    pub(crate) const EVAPORATION_RATE: f64 = 0.1;
    pub(crate) const MAX_ITERATIONS: usize = 2000;
    pub(crate) const MAX_STAGNATION_ITERATIONS: usize = 200;
}

use std::error::Error;

use colored::Colorize;
use csv::Writer;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::constant::{
    ALPHA, BETA, CITY_COUNT, DATASET_PATH, EVAPORATION_RATE, MAX_ITERATIONS,
    MAX_STAGNATION_ITERATIONS, NUM_ANTS, SEED,
};
use crate::dataset::load_cities;
use crate::distance::matrix::DistanceModel;
use crate::domain::solution::named_route;
use crate::domain::types::{City, RunParameters, Tour};
use crate::error::SolverError;
use crate::fixtures::data_generator::generate_random_cities;
use crate::solver::ant_colony::construction::construct_tour;
use crate::solver::ant_colony::pheromone::PheromoneField;

/// Mutable state of one optimization run. Owns the pheromone field for the
/// duration of the run; nothing here survives past the returned outcome.
struct SearchState {
    pheromones: PheromoneField,
    best_so_far: Option<Tour>,
    stagnation: usize,
    best_updates: Vec<(usize, f64)>,
    rng: ChaCha8Rng,
}

impl SearchState {
    fn new(num_cities: usize, rng: ChaCha8Rng) -> Self {
        SearchState {
            pheromones: PheromoneField::new(num_cities),
            best_so_far: None,
            stagnation: 0,
            best_updates: vec![],
            rng,
        }
    }

    fn best_length(&self) -> f64 {
        self.best_so_far
            .as_ref()
            .map_or(f64::INFINITY, |tour| tour.length)
    }
}

/// Result of one completed run: the incumbent tour, how many outer
/// iterations ran, and one `(iteration, length)` entry per incumbent update.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Tour,
    pub iterations: usize,
    pub best_updates: Vec<(usize, f64)>,
}

/// Run the full optimization against a prebuilt distance model and return
/// the best tour found. Terminates when `max_stagnation_iterations`
/// consecutive iterations pass without beating an established incumbent,
/// or when `max_iterations` is reached, whichever comes first.
pub fn solve(
    dm: &DistanceModel,
    params: &RunParameters,
    rng: ChaCha8Rng,
) -> Result<SearchOutcome, SolverError> {
    params.validate()?;
    if dm.len() < 2 {
        return Err(SolverError::InvalidConfiguration(format!(
            "distance model has {} cities, need at least 2",
            dm.len()
        )));
    }

    let mut state = SearchState::new(dm.len(), rng);
    let mut iteration = 0;

    let loop_span = span!(Level::INFO, "search_loop", cities = dm.len(), ants = params.num_ants);
    let _loop_guard = loop_span.enter();

    while state.stagnation < params.max_stagnation_iterations && iteration < params.max_iterations {
        iteration += 1;
        perform_iteration(iteration, &mut state, dm, params)?;
    }

    info!(
        "Search finished after {} iterations, best length {:.2} km",
        iteration,
        state.best_length()
    );

    let best = state
        .best_so_far
        .ok_or_else(|| SolverError::DegenerateInput("search ended with no constructed tour".into()))?;

    Ok(SearchOutcome {
        best,
        iterations: iteration,
        best_updates: state.best_updates,
    })
}

/// One outer iteration: construct `num_ants` tours in parallel against the
/// frozen pheromone field, then apply evaporation, per-ant deposits, the
/// elitist incumbent bonus, and stagnation accounting sequentially.
fn perform_iteration(
    iteration: usize,
    state: &mut SearchState,
    dm: &DistanceModel,
    params: &RunParameters,
) -> Result<(), SolverError> {
    let iter_span = span!(Level::DEBUG, "iteration", iter = iteration);
    let _iter_guard = iter_span.enter();

    let incumbent_before = state.best_length();

    // Constructions only read the field, so they fan out freely; each ant
    // gets a child RNG forked from the run RNG to keep the run reproducible.
    let seeds: Vec<u64> = (0..params.num_ants).map(|_| state.rng.gen()).collect();
    let pheromones = &state.pheromones;
    let tours: Vec<Tour> = seeds
        .into_par_iter()
        .map(|seed| {
            let mut ant_rng = ChaCha8Rng::seed_from_u64(seed);
            construct_tour(dm, pheromones, params.alpha, params.beta, &mut ant_rng)
        })
        .collect::<Result<_, _>>()?;

    state.pheromones.evaporate(params.evaporation_rate);

    for tour in tours {
        if tour.length < state.best_length() {
            debug!(
                "New best at iteration {}: {:.2} km (was {:.2})",
                iteration,
                tour.length,
                state.best_length()
            );
            state.best_updates.push((iteration, tour.length));
            state.best_so_far = Some(tour.clone());
        }
        deposit_along(&mut state.pheromones, &tour);
    }

    // Elitist bonus: the incumbent's edges get reinforced once more.
    if let Some(best) = &state.best_so_far {
        deposit_along(&mut state.pheromones, best);
    }

    // The counter resets only when an established incumbent was strictly
    // beaten; the seeding iteration counts as stagnant, so a cap of 1 stops
    // the loop after exactly one iteration.
    if state.best_length() < incumbent_before && incumbent_before.is_finite() {
        state.stagnation = 0;
    } else {
        state.stagnation += 1;
    }

    Ok(())
}

/// Deposit `1/length` along every edge of the tour, closing edge included.
/// A zero-length tour (all cities coincident) deposits nothing.
fn deposit_along(pheromones: &mut PheromoneField, tour: &Tour) {
    if tour.length <= 0.0 {
        return;
    }
    let amount = 1.0 / tour.length;
    let n = tour.route.len();
    for i in 0..n {
        let from = tour.route[i];
        let to = tour.route[(i + 1) % n];
        pheromones.deposit(from, to, amount);
    }
}

/// Initialize tracing from the environment.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();
}

/// Load the configured dataset, falling back to generated cities when the
/// file is missing or unreadable.
fn load_or_generate_cities() -> Vec<City> {
    match load_cities(DATASET_PATH) {
        Ok(cities) => {
            info!("Loaded {} cities from {}", cities.len(), DATASET_PATH);
            cities
        }
        Err(err) => {
            warn!(
                "Failed to load dataset at {}: {}. Falling back to generated cities.",
                DATASET_PATH, err
            );
            generate_random_cities(CITY_COUNT, SEED as u64)
        }
    }
}

/// Entry point used by the `aco-solver` binary: load a dataset, run the
/// optimization with the configured parameters, report the best tour, and
/// write the incumbent-improvement trace to CSV.
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let cities = load_or_generate_cities();

    let dm = {
        let setup_span = span!(Level::INFO, "setup", cities = cities.len());
        let _guard = setup_span.enter();
        DistanceModel::build(&cities)?
    };

    let params = RunParameters {
        num_ants: NUM_ANTS,
        alpha: ALPHA,
        beta: BETA,
        evaporation_rate: EVAPORATION_RATE,
        max_iterations: MAX_ITERATIONS,
        max_stagnation_iterations: MAX_STAGNATION_ITERATIONS,
    };

    info!(
        "Starting ACO run: {} cities, {} ants, alpha {}, beta {}, evaporation {}",
        dm.len(),
        params.num_ants,
        params.alpha,
        params.beta,
        params.evaporation_rate
    );

    let rng = ChaCha8Rng::seed_from_u64(SEED as u64);
    let outcome = solve(&dm, &params, rng)?;

    println!(
        "{}",
        format!(
            "Best tour after {} iterations: {:.2} km",
            outcome.iterations, outcome.best.length
        )
        .green()
    );
    println!("{}", named_route(&outcome.best, &dm).join(" -> "));

    save_to_csv(&outcome.best_updates, "best_so_far.csv")?;

    Ok(())
}

fn save_to_csv(best_updates: &[(usize, f64)], filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["iteration", "new_best_length"])?;

    for (iteration, length) in best_updates {
        wtr.write_record([iteration.to_string(), length.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::City;
    use crate::evaluation::fitness::tour_length;

    fn unit_square() -> DistanceModel {
        // Degree-scale offsets small enough that curvature is negligible.
        let cities = vec![
            City::new("sw", 0.0, 0.0),
            City::new("nw", 0.0, 0.01),
            City::new("ne", 0.01, 0.01),
            City::new("se", 0.01, 0.0),
        ];
        DistanceModel::build(&cities).unwrap()
    }

    fn params() -> RunParameters {
        RunParameters {
            num_ants: 10,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.1,
            max_iterations: 1000,
            max_stagnation_iterations: 20,
        }
    }

    #[test]
    fn rejects_invalid_configuration() {
        let dm = unit_square();
        let bad = RunParameters {
            num_ants: 0,
            ..params()
        };
        let result = solve(&dm, &bad, ChaCha8Rng::seed_from_u64(1));
        assert!(matches!(
            result,
            Err(SolverError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn stagnation_cap_of_one_means_one_iteration() {
        let dm = unit_square();
        let p = RunParameters {
            num_ants: 1,
            max_stagnation_iterations: 1,
            ..params()
        };
        let outcome = solve(&dm, &p, ChaCha8Rng::seed_from_u64(2)).unwrap();
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn max_iterations_is_a_hard_ceiling() {
        let dm = unit_square();
        let p = RunParameters {
            max_iterations: 3,
            max_stagnation_iterations: 10_000,
            ..params()
        };
        let outcome = solve(&dm, &p, ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(outcome.iterations, 3);
    }

    #[test]
    fn incumbent_updates_are_monotonically_decreasing() {
        let dm = unit_square();
        let outcome = solve(&dm, &params(), ChaCha8Rng::seed_from_u64(4)).unwrap();

        for pair in outcome.best_updates.windows(2) {
            assert!(pair[1].1 < pair[0].1, "updates not decreasing: {:?}", pair);
        }
        let last = outcome.best_updates.last().unwrap();
        assert_eq!(last.1, outcome.best.length);
    }

    #[test]
    fn finds_the_perimeter_of_a_convex_square() {
        let dm = unit_square();
        // Perimeter order is the optimal tour for a convex quadrilateral.
        let perimeter = tour_length(&[0, 1, 2, 3], &dm);

        let outcome = solve(&dm, &params(), ChaCha8Rng::seed_from_u64(5)).unwrap();

        assert_eq!(outcome.best.route.len(), 4);
        assert!(
            (outcome.best.length - perimeter).abs() < perimeter * 1e-6,
            "expected perimeter {:.6}, got {:.6}",
            perimeter,
            outcome.best.length
        );
    }

    #[test]
    fn returned_tour_is_a_permutation_of_all_cities() {
        let dm = unit_square();
        let outcome = solve(&dm, &params(), ChaCha8Rng::seed_from_u64(6)).unwrap();

        let mut sorted = outcome.best.route.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }
}

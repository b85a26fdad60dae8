use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::distance::matrix::DistanceModel;
use crate::domain::types::Tour;
use crate::error::SolverError;
use crate::evaluation::fitness::tour_length;
use crate::solver::ant_colony::pheromone::PheromoneField;

/// Heuristic value substituted for `1/distance` on a zero-length edge
/// (coincident coordinates), so those edges are strongly preferred instead
/// of dividing by zero.
const ZERO_DISTANCE_HEURISTIC: f64 = 1e9;

/// Build one tour visiting every city exactly once, starting from a random
/// city and choosing each next city by weighted random sampling over
/// `pheromone^alpha * (1/distance)^beta`. Reads the pheromone field but
/// never mutates it.
pub fn construct_tour(
    dm: &DistanceModel,
    pheromones: &PheromoneField,
    alpha: f64,
    beta: f64,
    rng: &mut ChaCha8Rng,
) -> Result<Tour, SolverError> {
    let num_cities = dm.len();

    let start = rng.gen_range(0..num_cities);
    let mut route = Vec::with_capacity(num_cities);
    let mut visited = vec![false; num_cities];
    route.push(start);
    visited[start] = true;

    let mut current = start;
    while route.len() < num_cities {
        let next = select_next_city(dm, pheromones, alpha, beta, current, &visited, rng)?;
        route.push(next);
        visited[next] = true;
        current = next;
    }

    let length = tour_length(&route, dm);
    Ok(Tour { route, length })
}

/// Weighted random choice over the unvisited candidates: build a cumulative
/// weight array, draw a uniform value in [0, total), and scan for the
/// sampled index.
fn select_next_city(
    dm: &DistanceModel,
    pheromones: &PheromoneField,
    alpha: f64,
    beta: f64,
    current: usize,
    visited: &[bool],
    rng: &mut ChaCha8Rng,
) -> Result<usize, SolverError> {
    let mut candidates: Vec<usize> = Vec::with_capacity(visited.len());
    let mut cumulative: Vec<f64> = Vec::with_capacity(visited.len());
    let mut total = 0.0;

    for (city, seen) in visited.iter().enumerate() {
        if *seen {
            continue;
        }

        let distance = dm.distance(current, city);
        let heuristic = if distance > 0.0 {
            1.0 / distance
        } else {
            ZERO_DISTANCE_HEURISTIC
        };

        let weight = pheromones.intensity(current, city).powf(alpha) * heuristic.powf(beta);
        total += weight;
        candidates.push(city);
        cumulative.push(total);
    }

    if !total.is_finite() || total <= 0.0 {
        return Err(SolverError::DegenerateInput(format!(
            "candidate weights from city {} sum to {}",
            current, total
        )));
    }

    let draw = rng.gen::<f64>() * total;
    let position = cumulative
        .iter()
        .position(|&bound| draw < bound)
        .unwrap_or(candidates.len() - 1);

    Ok(candidates[position])
}

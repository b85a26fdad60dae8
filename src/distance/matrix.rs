use tracing::info;

use crate::distance::haversine::haversine;
use crate::domain::types::City;
use crate::error::SolverError;

/// Complete pairwise great-circle distance matrix over a fixed city set.
///
/// Cities are assigned dense indices once, at construction, in the order
/// they are supplied; every later lookup goes through those indices. The
/// matrix is symmetric with a zero diagonal and is computed eagerly for
/// all pairs before any optimization starts.
#[derive(Debug, Clone)]
pub struct DistanceModel {
    names: Vec<String>,
    matrix: Vec<Vec<f64>>,
}

impl DistanceModel {
    pub fn build(cities: &[City]) -> Result<Self, SolverError> {
        if cities.len() < 2 {
            return Err(SolverError::InvalidInput(format!(
                "need at least 2 cities, got {}",
                cities.len()
            )));
        }
        for city in cities {
            if !city.lat.is_finite() || !city.lng.is_finite() {
                return Err(SolverError::InvalidInput(format!(
                    "city '{}' has a non-numeric coordinate ({}, {})",
                    city.name, city.lat, city.lng
                )));
            }
        }

        let n = cities.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine(cities[i].lat, cities[i].lng, cities[j].lat, cities[j].lng);
                matrix[i][j] = d;
                matrix[j][i] = d;
            }
        }

        info!("Built distance matrix for {} cities", n);

        Ok(DistanceModel {
            names: cities.iter().map(|c| c.name.clone()).collect(),
            matrix,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.matrix[from][to]
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

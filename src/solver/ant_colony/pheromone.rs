/// Trail intensities over the same index space as the distance matrix.
///
/// Every ordered pair starts at 1.0 (self-entries included; construction
/// never reads them since no tour revisits a city). The field is owned by
/// one optimization run and is never resized after creation.
#[derive(Debug, Clone)]
pub struct PheromoneField {
    matrix: Vec<Vec<f64>>,
}

impl PheromoneField {
    pub fn new(num_cities: usize) -> Self {
        PheromoneField {
            matrix: vec![vec![1.0; num_cities]; num_cities],
        }
    }

    pub fn intensity(&self, from: usize, to: usize) -> f64 {
        self.matrix[from][to]
    }

    /// Add `amount` to the trail on the directed edge `from -> to`.
    pub fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        self.matrix[from][to] += amount;
    }

    /// Scale every entry by `1 - rate`. Called once per iteration by the
    /// optimization loop; never triggered implicitly by deposits.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for row in &mut self.matrix {
            for trail in row.iter_mut() {
                *trail *= keep;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uniform_at_one() {
        let field = PheromoneField::new(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(field.intensity(i, j), 1.0);
            }
        }
    }

    #[test]
    fn deposit_is_directed_and_additive() {
        let mut field = PheromoneField::new(3);
        field.deposit(0, 1, 0.25);
        field.deposit(0, 1, 0.25);
        assert!((field.intensity(0, 1) - 1.5).abs() < 1e-12);
        assert_eq!(field.intensity(1, 0), 1.0);
    }

    #[test]
    fn evaporation_scales_every_entry() {
        let mut field = PheromoneField::new(2);
        field.deposit(0, 1, 1.0);
        field.evaporate(0.5);
        assert!((field.intensity(0, 1) - 1.0).abs() < 1e-12);
        assert!((field.intensity(1, 0) - 0.5).abs() < 1e-12);
    }
}

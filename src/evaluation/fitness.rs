use itertools::Itertools;

use crate::distance::matrix::DistanceModel;

/// Total length of a closed tour: the consecutive edges of `route` plus the
/// implicit edge from the last city back to the first.
pub fn tour_length(route: &[usize], dm: &DistanceModel) -> f64 {
    if route.len() < 2 {
        return 0.0;
    }

    let open_length: f64 = route
        .iter()
        .tuple_windows()
        .map(|(&from, &to)| dm.distance(from, to))
        .sum();

    let closing = dm.distance(route[route.len() - 1], route[0]);

    open_length + closing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::City;

    fn line_of_three() -> DistanceModel {
        let cities = vec![
            City::new("a", 0.0, 0.0),
            City::new("b", 0.0, 1.0),
            City::new("c", 0.0, 2.0),
        ];
        DistanceModel::build(&cities).unwrap()
    }

    #[test]
    fn closes_the_cycle() {
        let dm = line_of_three();
        let length = tour_length(&[0, 1, 2], &dm);
        let by_hand = dm.distance(0, 1) + dm.distance(1, 2) + dm.distance(2, 0);
        assert!((length - by_hand).abs() < 1e-9);
    }

    #[test]
    fn rotation_preserves_length() {
        let dm = line_of_three();
        let a = tour_length(&[0, 1, 2], &dm);
        let b = tour_length(&[1, 2, 0], &dm);
        assert!((a - b).abs() < 1e-9);
    }
}

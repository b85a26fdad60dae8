use crate::distance::matrix::DistanceModel;
use crate::domain::types::Tour;

/// Map a tour's city indices back to the model's city names, in visiting
/// order.
pub fn named_route(tour: &Tour, dm: &DistanceModel) -> Vec<String> {
    tour.route
        .iter()
        .map(|&index| dm.name(index).to_string())
        .collect()
}

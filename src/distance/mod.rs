pub mod haversine;
pub mod matrix;

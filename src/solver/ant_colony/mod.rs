pub mod construction;
pub mod pheromone;
pub mod search;

pub use construction::*;
pub use pheromone::*;
pub use search::*;

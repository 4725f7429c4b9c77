pub mod bodies;
pub mod water_mesh;

pub use bodies::*;
pub use water_mesh::*;

use bevy::prelude::*;

/// Fixed-step ordering: the surface is deformed and its collider refreshed
/// before any body samples it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaterFixedSet {
    Surface,
    Buoyancy,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaterUpdateSet {
    Input,
    Rendering,
}

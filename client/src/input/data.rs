use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Drop a new sphere above the water
    SpawnBody,
    /// Remove every floating body
    ClearBodies,
    /// Flatten the water by dropping all ripples
    ClearWaves,
    ResetCamera,
    Escape,
}

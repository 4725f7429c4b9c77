//! Rippling water surface.
//!
//! ## Architecture
//!
//! ```text
//!   WaveField ──displacement──▶ SurfaceMesh ──triangles──▶ SurfaceCollider
//!   (sources)                   (deformed)                 (XZ grid + rays)
//!                                     │                          │
//!                                     └──────── HeightQuery ─────┘
//! ```
//!
//! [`WaterSimulation`] owns all three pieces and advances them in order. The
//! mesh is authored in local space and placed in the world by a translation;
//! wave origins are stored locally, queries take world coordinates.

pub mod collider;
pub mod config;
pub mod plane;
pub mod plugin;
pub mod query;
pub mod simulation;
pub mod surface;
pub mod wave_field;

pub use collider::{SurfaceCollider, SurfaceHit, SurfaceRay};
pub use config::{WaveParams, WaveSettings, DEFAULT_MAX_SOURCES};
pub use plane::{PlaneMesh, PlaneSettings};
pub use plugin::WaterPlugin;
pub use query::HeightQuery;
pub use simulation::WaterSimulation;
pub use surface::{SurfaceBounds, SurfaceMesh};
pub use wave_field::{decay_factor, WaveField, WaveSource};

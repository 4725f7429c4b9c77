//! Bevy plugin driving the water simulation on the fixed schedule.

use bevy::prelude::*;

use super::WaterSimulation;
use crate::config::WaterConfig;
use crate::constants::TICKS_PER_SECOND;
use crate::sets::WaterFixedSet;

/// Adds a [`WaterSimulation`] built from `config` and advances it every fixed
/// tick in [`WaterFixedSet::Surface`], ahead of [`WaterFixedSet::Buoyancy`].
#[derive(Default)]
pub struct WaterPlugin {
    pub config: WaterConfig,
}

impl WaterPlugin {
    pub fn new(config: WaterConfig) -> Self {
        Self { config }
    }
}

impl Plugin for WaterPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND as f64))
            .insert_resource(self.config.clone())
            .insert_resource(WaterSimulation::from_config(&self.config))
            .configure_sets(
                FixedUpdate,
                (WaterFixedSet::Surface, WaterFixedSet::Buoyancy).chain(),
            )
            .add_systems(FixedUpdate, advance_water.in_set(WaterFixedSet::Surface));
    }
}

/// Purges, deforms and re-colliders the surface for the current fixed time.
fn advance_water(mut water: ResMut<WaterSimulation>, time: Res<Time<Fixed>>) {
    water.tick(time.elapsed_secs());
}

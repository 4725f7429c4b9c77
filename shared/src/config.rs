use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use bevy::math::Vec3;
use bevy_ecs::resource::Resource;
use bevy_log::info;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::buoyancy::BuoyancyConfig;
use crate::constants::DEFAULT_BODY_RADIUS;
use crate::water::{PlaneSettings, WaveSettings};

/// Where and how new floating bodies are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    /// Bodies land uniformly inside a disc of this radius around the water centre
    pub area_radius: f32,
    /// Height above the base water level at which bodies are released
    pub drop_height: f32,
    pub body_radius: f32,
    pub body_mass: f32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            area_radius: 5.0,
            drop_height: 5.0,
            body_radius: DEFAULT_BODY_RADIUS,
            body_mass: 1.0,
        }
    }
}

/// Everything a host needs to build the water scene.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub waves: WaveSettings,
    pub plane: PlaneSettings,
    /// World position of the plane's centre
    pub placement: Vec3,
    pub buoyancy: BuoyancyConfig,
    pub spawn: SpawnSettings,
}

/// Reads a RON config. A missing file is not an error and yields defaults.
pub fn load_water_config(path: &Path) -> Result<WaterConfig, Box<dyn std::error::Error>> {
    if !path.exists() {
        info!(
            "Water config not found: {}. Using default settings.",
            path.display()
        );
        return Ok(WaterConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: WaterConfig = ron::de::from_str(&contents)?;
    info!("Loaded water config from {}", path.display());
    Ok(config)
}

pub fn save_water_config(
    config: &WaterConfig,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(4)
        .with_separate_tuple_members(true);

    let serialized = ron::ser::to_string_pretty(config, pretty_config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(serialized.as_bytes())?;
    info!("Water config saved to {}", path.display());
    Ok(())
}

mod camera;
mod constants;
mod input;
mod world;

use std::collections::BTreeMap;
use std::path::PathBuf;

use bevy::{prelude::*, window::PresentMode};
use clap::Parser;
use input::{data::GameAction, keyboard::get_bindings};
use ripple_shared::constants::{CONFIG_READ_ERROR, DEFAULT_CONFIG_PATH};
use ripple_shared::physics::rapier::FloatingPhysicsPlugin;
use ripple_shared::sets::WaterUpdateSet;
use ripple_shared::water::WaterPlugin;
use serde::{Deserialize, Serialize};

use constants::{BINDS_PATH, WINDOW_TITLE};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[arg(short, long, default_value = BINDS_PATH, help = "Key bindings file, created when missing")]
    keybinds: PathBuf,
}

#[derive(Resource, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "input::keyboard::default_key_map")]
    pub map: BTreeMap<GameAction, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: input::keyboard::default_key_map(),
        }
    }
}

fn main() {
    let args = Args::parse();

    let config = match ripple_shared::load_water_config(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}: {err}", CONFIG_READ_ERROR, args.config.display());
            std::process::exit(1);
        }
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: WINDOW_TITLE.to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    app.add_plugins((WaterPlugin::new(config), FloatingPhysicsPlugin))
        .insert_resource(get_bindings(&args.keybinds))
        .insert_resource(ClearColor(Color::srgb(0.62, 0.75, 0.86)))
        .configure_sets(
            Update,
            (WaterUpdateSet::Input, WaterUpdateSet::Rendering).chain(),
        )
        .add_systems(
            Startup,
            (
                camera::spawn_camera,
                world::spawn_water_mesh,
                world::setup_body_assets,
            ),
        )
        .add_systems(
            Update,
            (
                (camera::control_orbit_camera, world::handle_body_actions)
                    .in_set(WaterUpdateSet::Input),
                world::sync_water_mesh.in_set(WaterUpdateSet::Rendering),
            ),
        )
        .run();
}

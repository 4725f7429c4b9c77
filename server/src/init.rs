use std::time::Duration;

use bevy::prelude::*;
use bevy_app::{AppExit, ScheduleRunnerPlugin};
use bevy_log::{debug, info, LogPlugin};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ripple_shared::sets::WaterFixedSet;
use ripple_shared::spawning::drop_position;
use ripple_shared::water::{WaterPlugin, WaterSimulation};
use ripple_shared::{
    BuoyancyBody, FloatState, FloatStep, KinematicBody, WaterConfig, TICKS_PER_SECOND,
};

/// Parameters of one headless run.
#[derive(Resource, Debug, Clone)]
pub struct SimulationRun {
    pub bodies: usize,
    pub duration: f32,
    pub seed: u64,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct BodyId(pub usize);

#[derive(Resource, Debug, Default)]
pub struct RunStats {
    pub impacts: usize,
    pub splashes: usize,
    pub settled_steps: usize,
    pub off_surface_steps: usize,
    pub finished: bool,
}

pub fn init(config: WaterConfig, run: SimulationRun) {
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TICKS_PER_SECOND as f64,
        ))),
    );
    app.add_plugins(LogPlugin::default());

    info!(
        "Starting water simulation: {} bodies for {:.1}s (seed {})",
        run.bodies, run.duration, run.seed
    );

    setup_simulation(&mut app, config, run);
    app.run();
}

/// Everything except the runner, so tests can drive the schedules themselves.
pub fn setup_simulation(app: &mut App, config: WaterConfig, run: SimulationRun) {
    app.add_plugins(WaterPlugin::new(config))
        .insert_resource(run)
        .init_resource::<RunStats>()
        .add_systems(Startup, spawn_bodies)
        .add_systems(
            FixedUpdate,
            (
                step_bodies.in_set(WaterFixedSet::Buoyancy),
                finish_run.after(WaterFixedSet::Buoyancy),
            ),
        );
}

fn spawn_bodies(
    mut commands: Commands,
    config: Res<WaterConfig>,
    water: Res<WaterSimulation>,
    run: Res<SimulationRun>,
) {
    let mut rng = StdRng::seed_from_u64(run.seed);
    let center = water.placement().with_y(water.base_height());

    for id in 0..run.bodies {
        let position = drop_position(&mut rng, center, &config.spawn);
        debug!("Spawning body {} at {:?}", id, position);
        commands.spawn((
            BodyId(id),
            BuoyancyBody::new(config.spawn.body_radius, config.buoyancy),
            KinematicBody::new(position, config.spawn.body_mass),
        ));
    }
}

fn step_bodies(
    mut water: ResMut<WaterSimulation>,
    time: Res<Time<Fixed>>,
    mut stats: ResMut<RunStats>,
    mut bodies: Query<(&BodyId, &mut BuoyancyBody, &mut KinematicBody)>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    for (id, mut float, mut body) in bodies.iter_mut() {
        match float.step(&mut *body, &mut *water, now, delta) {
            FloatStep::Impact { splashed } => {
                stats.impacts += 1;
                if splashed {
                    stats.splashes += 1;
                }
                info!(
                    "Body {} landed at t={:.2}s, {} waves active",
                    id.0,
                    now,
                    water.waves().active_count()
                );
            }
            FloatStep::Settled => stats.settled_steps += 1,
            FloatStep::NoSurface => stats.off_surface_steps += 1,
            FloatStep::Airborne | FloatStep::Bobbing => {}
        }
        body.integrate(delta);
    }
}

fn finish_run(
    time: Res<Time<Fixed>>,
    run: Res<SimulationRun>,
    water: Res<WaterSimulation>,
    mut stats: ResMut<RunStats>,
    bodies: Query<(&BodyId, &BuoyancyBody, &KinematicBody)>,
    mut exit: EventWriter<AppExit>,
) {
    if stats.finished || time.elapsed_secs() < run.duration {
        return;
    }
    stats.finished = true;

    info!(
        "Run finished after {:.2}s: {} impacts, {} splashes, {} waves active, surface generation {}",
        time.elapsed_secs(),
        stats.impacts,
        stats.splashes,
        water.waves().active_count(),
        water.surface().generation()
    );

    let query = water.query();
    let mut sorted: Vec<_> = bodies.iter().collect();
    sorted.sort_by_key(|(id, _, _)| id.0);
    for (id, float, body) in sorted {
        let point = Vec2::new(body.position.x, body.position.z);
        let precise = query.interpolated_height(point);
        let nearest = query.nearest_vertex_height(point);
        info!(
            "Body {}: {:?} at {:.3?}, water precise {:?} nearest vertex {:?}",
            id.0,
            float.state(),
            body.position,
            precise,
            nearest
        );
    }

    let floating = bodies
        .iter()
        .filter(|(_, float, _)| float.state() == FloatState::Floating)
        .count();
    info!("{} of {} bodies floating", floating, run.bodies);
    exit.write(AppExit::Success);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(bodies: usize, duration: f32) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        setup_simulation(
            &mut app,
            WaterConfig::default(),
            SimulationRun {
                bodies,
                duration,
                seed: 42,
            },
        );
        app.update();
        app
    }

    fn tick(app: &mut App, steps: u32) {
        for _ in 0..steps {
            app.world_mut()
                .resource_mut::<Time<Fixed>>()
                .advance_by(Duration::from_secs_f64(1.0 / TICKS_PER_SECOND as f64));
            app.world_mut().run_schedule(FixedUpdate);
        }
    }

    #[test]
    fn test_bodies_spawn_above_water() {
        let mut app = test_app(5, 10.0);
        let mut query = app.world_mut().query::<(&BuoyancyBody, &KinematicBody)>();
        let bodies: Vec<_> = query.iter(app.world()).collect();
        assert_eq!(bodies.len(), 5);
        for (float, body) in bodies {
            assert_eq!(float.state(), FloatState::Falling);
            assert_eq!(body.position.y, 5.0);
        }
    }

    #[test]
    fn test_every_body_lands_once() {
        let mut app = test_app(4, 10.0);
        tick(&mut app, 150);

        let stats = app.world().resource::<RunStats>();
        assert_eq!(stats.impacts, 4);
        assert_eq!(stats.splashes, 4);

        let mut query = app.world_mut().query::<&BuoyancyBody>();
        assert!(query
            .iter(app.world())
            .all(|float| float.state() == FloatState::Floating));
    }

    #[test]
    fn test_run_finishes_after_duration() {
        let mut app = test_app(1, 0.5);
        tick(&mut app, 20);
        assert!(!app.world().resource::<RunStats>().finished);
        tick(&mut app, 10);
        assert!(app.world().resource::<RunStats>().finished);
    }
}

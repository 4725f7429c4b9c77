pub const TICKS_PER_SECOND: u64 = 50;
pub const FIXED_DELTA: f32 = 1.0 / TICKS_PER_SECOND as f32;

/// Amplitudes below this are treated as flat water.
pub const NEGLIGIBLE_AMPLITUDE: f32 = 0.001;

/// Smallest sphere radius accepted before falling back to `DEFAULT_BODY_RADIUS`.
pub const MIN_BODY_RADIUS: f32 = 0.001;
pub const DEFAULT_BODY_RADIUS: f32 = 0.5;

/// Impact speed that maps to a splash of exactly the default amplitude.
pub const REFERENCE_IMPACT_SPEED: f32 = 3.0;
pub const MIN_SPLASH_SCALE: f32 = 0.2;
pub const MAX_SPLASH_SCALE: f32 = 2.5;

/// Fraction of vertical velocity kept (and reversed) on first contact.
pub const IMPACT_REBOUND: f32 = -0.2;

/// Horizontal drag is this fraction of the vertical drag.
pub const HORIZONTAL_DRAG_FACTOR: f32 = 0.5;

/// Height above the surface bounds where precise height rays start.
pub const RAY_CLEARANCE: f32 = 10.0;

pub const DEFAULT_CONFIG_PATH: &str = "ripple.ron";
pub const CONFIG_READ_ERROR: &str = "Failed to read water config";

pub const WINDOW_TITLE: &str = "Ripple";
pub const BINDS_PATH: &str = "ripple_keys.ron";

pub const CAMERA_MIN_DISTANCE: f32 = 3.0;
pub const CAMERA_MAX_DISTANCE: f32 = 60.0;
pub const CAMERA_RESET_YAW: f32 = 30.0;
pub const CAMERA_RESET_PITCH: f32 = -35.0;
pub const CAMERA_RESET_DISTANCE: f32 = 16.0;
/// Degrees of rotation per pixel of mouse motion
pub const CAMERA_ROTATE_SPEED: f32 = 0.25;
pub const CAMERA_ZOOM_SPEED: f32 = 1.5;

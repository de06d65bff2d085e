// Shared tuning constants for the tunnel engine. `TunnelConfig::default()`
// reads from here; nothing in this module is mutated at runtime.

// Lifecycle durations (seconds)
pub const FADE_IN_SEC: f32 = 3.0;
pub const ACTIVE_SEC: f32 = 5.0;
pub const FADE_OUT_SEC: f32 = 2.0;

// Opacity of the inner layer and ring accents relative to the outer layer
pub const INNER_OPACITY_FRACTION: f32 = 0.8;
pub const RING_OPACITY_FRACTION: f32 = 0.6;

// Fraction of the fade-out after which both palettes are fully black
pub const SHUTDOWN_BLACKOUT_FRACTION: f32 = 0.5;

// Frame timing
pub const FIRST_FRAME_DT_SEC: f32 = 1.0 / 60.0; // assumed interval before any real delta exists
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp long stalls (background tab, debugger)
pub const SHAPE_CLOCK_RATE: f32 = 1.0;
pub const PALETTE_CLOCK_RATE: f32 = 1.0;

// Path (tunnel centerline). Point 0 sits at the mouth near the viewer.
pub const PATH_POINT_COUNT: usize = 6;
pub const PATH_NEAR_Z: f32 = 4.0;
pub const PATH_FAR_Z: f32 = -46.0;
pub const PATH_SMOOTHING_TAU_SEC: f32 = 0.6; // damped pursuit of the pointer target
pub const PATH_POINTER_AMPLITUDE: [f32; 3] = [1.5, 3.0, 4.5]; // deflection for points 2, 3, 4
pub const PATH_FLOOR_BIAS_INDEX: usize = 3;
pub const PATH_FLOOR_BIAS: f32 = -1.5; // keeps the tunnel curving toward the viewport floor

// Camera
pub const CAMERA_Z: f32 = 5.5;
pub const CAMERA_POINTER_AMPLITUDE: f32 = 0.35;
pub const CAMERA_LOOK_AHEAD_T: f32 = 0.2;
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_3;
pub const CAMERA_ZNEAR: f32 = 0.05;
pub const CAMERA_ZFAR: f32 = 200.0;

// Tube geometry
pub const RING_COUNT: usize = 120;
pub const BASE_TUBE_RADIUS: f32 = 1.2;
pub const OUTER_LAYER_SCALE: f32 = 1.0;
pub const INNER_LAYER_SCALE: f32 = 0.6;
pub const TWIST_TURNS: f32 = 3.0; // full turns across the tunnel length
pub const TWIST_SPIN_PER_SEC: f32 = 0.25; // radians per second added to the twist
pub const INNER_TWIST_RATE: f32 = 1.35;
pub const RADIAL_WAVE_AMPLITUDE: f32 = 0.06; // fraction of the radius
pub const ANGULAR_WAVE_AMPLITUDE: f32 = 0.04; // radians
pub const POLYGON_RADIUS_CLAMP: f32 = 1.6; // max ray length as a multiple of the apothem

// Shape sequence
pub const SHAPE_WAVE_SPEED: f32 = 0.12;
pub const SHAPE_SPATIAL_FREQUENCY: f32 = 1.0;
pub const INNER_SHAPE_OFFSET: f32 = 0.5;

// Palette engine
pub const PALETTE_CYCLE_SEC: f32 = 5.0;
pub const PALETTE_TRANSITION_SEC: f32 = 1.0; // final window of each cycle
pub const COLOR_WAVE_SPEED: f32 = 0.35;
pub const COLOR_WAVE_SCALE: f32 = 1.5;
pub const COLOR_JITTER: f32 = 0.02;
pub const COLOR_NOISE_SCALE: f32 = 3.7;
pub const INNER_PALETTE_OFFSET_SEC: f32 = 2.5;
pub const INNER_COLOR_SPEED_MULTIPLIER: f32 = 1.6;

// Ring accents
pub const RING_ACCENT_COUNT: usize = 4;
pub const RING_ACCENT_T: [f32; RING_ACCENT_COUNT] = [0.12, 0.3, 0.5, 0.7];
pub const RING_ACCENT_INNER_RADIUS: f32 = 1.3; // multiples of the base tube radius
pub const RING_ACCENT_OUTER_RADIUS: f32 = 1.45;
pub const RING_ACCENT_SEGMENTS: usize = 48;
pub const RING_ACCENT_SPIN_MIN: f32 = 0.1;
pub const RING_ACCENT_SPIN_MAX: f32 = 0.45;
pub const RING_ACCENT_SEED: u64 = 7;

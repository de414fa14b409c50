use bevy::prelude::Color;

// ============================================================================
// SCENE HOST
// ============================================================================

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_DISTANCE: f32 = 5.0;
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const AMBIENT_COLOR: Color = Color::srgb(0.85, 0.85, 1.0);
pub const KEY_LIGHT_INTENSITY: f32 = 2_000_000.0;  // Lumens, point light in front of the scene
pub const RIM_LIGHT_INTENSITY: f32 = 600_000.0;
pub const BACKGROUND_COLOR: Color = Color::srgb(0.02, 0.02, 0.04);

// ============================================================================
// SPINNING MODEL
// ============================================================================

pub const MODEL_PATH: &str = "models/emblem.gltf";
pub const MODEL_SPIN_PER_FRAME: f32 = 0.01;  // Radians added every rendered frame
pub const MODEL_SCALE: f32 = 1.5;

// ============================================================================
// RISING COLUMNS
// ============================================================================

pub const COLUMN_COUNT: usize = 24;
pub const COLUMN_RADIUS: f32 = 0.05;
pub const COLUMN_HEIGHT: f32 = 1.5;
pub const COLUMN_SPREAD: f32 = 8.0;           // Columns are laid out on an x/z square of this width
pub const COLUMN_RISE_PER_FRAME: f32 = 0.02;
pub const COLUMN_LOWER_BOUND: f32 = -6.0;     // Conveyor resets here...
pub const COLUMN_UPPER_BOUND: f32 = 6.0;      // ...once it climbs past here
pub const COLUMN_COLOR: Color = Color::srgb(0.25, 0.55, 1.0);

// ============================================================================
// LASER BEAMS
// ============================================================================

pub const LASER_LENGTH: f32 = 14.0;
pub const LASER_THICKNESS: f32 = 0.03;
pub const LASER_SPEED: f32 = 1.5;             // Angular speed of the sweep (rad/s)
pub const LASER_RANGE: f32 = 2.0;             // Sweep amplitude in world units
pub const LASER_SCALE_STEP: f32 = 0.02;       // Intro ramp per frame, 50 frames to full length
pub const LASER_COLORS: [Color; 4] = [
    Color::srgb(1.0, 0.1, 0.35),
    Color::srgb(0.1, 0.9, 1.0),
    Color::srgb(0.6, 0.2, 1.0),
    Color::srgb(1.0, 0.75, 0.1),
];

// ============================================================================
// GOLD SWIRL
// ============================================================================

pub const GOLD_PARTICLE_COUNT: usize = 2_000;
pub const GOLD_MIN_RADIUS: f32 = 1.5;
pub const GOLD_MAX_RADIUS: f32 = 4.0;
pub const GOLD_HEIGHT_JITTER: f32 = 0.4;      // Half-extent of the vertical band
pub const GOLD_SPIN_PER_FRAME: f32 = 0.002;
pub const GOLD_COLOR: Color = Color::srgb(1.0, 0.78, 0.3);

// ============================================================================
// NEON TUNNEL
// ============================================================================

pub const TUNNEL_PARTICLE_COUNT: usize = 3_000;
pub const TUNNEL_MIN_RADIUS: f32 = 2.0;
pub const TUNNEL_MAX_RADIUS: f32 = 2.6;
pub const TUNNEL_DEPTH: f32 = 60.0;           // Particles sampled on z in [-depth, 0]
pub const TUNNEL_SPEED_PER_FRAME: f32 = 0.15; // Travel toward the camera
pub const TUNNEL_TWIST_PER_FRAME: f32 = 0.003;
pub const TUNNEL_LOOP_LENGTH: f32 = 20.0;     // Group translation wraps back to 0 past this
pub const TUNNEL_COLOR: Color = Color::srgb(0.2, 1.0, 0.85);

// ============================================================================
// SPLASH LIFECYCLE
// ============================================================================

pub const SPLASH_SETTLE_DELAY_SECS: f32 = 5.0;
pub const SPLASH_FADE_STEP: f32 = 0.05;       // Opacity removed per fade tick
pub const SPLASH_FADE_PERIOD_MS: u64 = 50;
pub const SPLASH_COLOR: Color = Color::srgb(1.0, 0.3, 0.9);

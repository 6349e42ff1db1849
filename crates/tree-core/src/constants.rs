use glam::Vec3;

// Shared scene tuning constants used by the core and the web frontend.

// Tree silhouette
pub const TREE_HEIGHT: f32 = 12.0;
pub const TREE_RADIUS: f32 = 5.0;

// Foliage point cloud
pub const FOLIAGE_COUNT: usize = 35_000;
pub const FOLIAGE_CHAOS_RADIUS: f32 = 25.0;
pub const CONE_NOISE_AMPLITUDE: f32 = 0.75; // +/- radial jitter for a bushy outline
pub const FOLIAGE_POINT_SCALE: f32 = 0.0022; // world units per shader point-size unit

// Ornament populations
pub const BAUBLE_COUNT: usize = 200;
pub const GIFT_COUNT: usize = 50;
pub const PHOTO_COUNT: usize = 45;
pub const ORNAMENT_CHAOS_RADIUS: f32 = 20.0;
pub const BAUBLE_SPIRAL_TURNS: f32 = 6.0;
pub const PHOTO_SPIRAL_TURNS: f32 = 4.5;
pub const SPIRAL_RADIUS_OFFSET: f32 = 0.2; // sits just outside the foliage
pub const PHOTO_RADIAL_PUSH: f32 = 0.3; // cards dangle further out than baubles
pub const PHOTO_SCALE: f32 = 0.7;
pub const GIFT_RING_DROP: f32 = 0.2; // below the tree base

// Progress smoothing (per second)
pub const FOLIAGE_PROGRESS_RATE: f32 = 1.2;
pub const ORNAMENT_PROGRESS_RATE: f32 = 0.8;

// Staggered morph
pub const STAGGER_SPAN: f32 = 0.3;

// Secondary-motion thresholds on global progress
pub const FORMED_THRESHOLD: f32 = 0.8;
pub const CHAOS_THRESHOLD: f32 = 0.2;

// Pose mapping
pub const POSE_ROTATION_GAIN: f32 = 1.5;
pub const IDLE_SPIN_RATE: f32 = 0.1; // radians per second
pub const ROTATION_SMOOTHING: f32 = 2.0;

// External control bridge
pub const PREDICTION_INTERVAL_MS: f64 = 66.0; // ~15 Hz
pub const CAMERA_IDEAL_WIDTH: u32 = 320;
pub const CAMERA_IDEAL_HEIGHT: u32 = 240;

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 4.0, 20.0];
pub const CAMERA_FOV_DEGREES: f32 = 50.0;

// Orbit controls (polar angle measured from +Y)
pub const ORBIT_MIN_POLAR: f32 = std::f32::consts::PI / 3.0;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::PI / 1.5;
pub const ORBIT_MIN_DISTANCE: f32 = 8.0;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // radius factor per wheel notch
pub const ORBIT_DAMPING: f32 = 0.05; // share of the pending drag applied per 60 Hz frame

// Star field (static, outside the tree group)
pub const STAR_COUNT: usize = 5_000;
pub const STAR_RADIUS: f32 = 100.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_SIZE_FACTOR: f32 = 4.0;
pub const STAR_POINT_SCALE: f32 = 0.08;
pub const STAR_TWINKLE: f32 = 0.3; // +/- relative size swing
pub const STAR_BRIGHTNESS: f32 = 0.9; // sRGB grey

// Lighting and ornament meshes
pub const KEY_LIGHT_POSITION: [f32; 3] = [10.0, 20.0, 10.0];
pub const BAUBLE_SEGMENTS: u16 = 32;
pub const GIFT_BOX_SIZE: f32 = 1.0;
pub const PHOTO_CARD_SIZE: [f32; 3] = [0.8, 1.0, 0.05];

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.8;
pub const BLOOM_INTENSITY: f32 = 1.2;
pub const VIGNETTE_OFFSET: f32 = 0.1;
pub const VIGNETTE_DARKNESS: f32 = 1.1;
pub const TONE_EXPOSURE: f32 = 1.5;
pub const CLEAR_COLOR: [f32; 3] = [0.008, 0.016, 0.012]; // #020403

// Foliage gradient (already linear, used as-is by the point shader)
pub const FOLIAGE_DEEP: [f32; 3] = [0.0, 0.2, 0.1];
pub const FOLIAGE_LIGHT: [f32; 3] = [0.05, 0.4, 0.2];
pub const FOLIAGE_GOLD: [f32; 3] = [1.0, 0.85, 0.3];

// Ornament palette (sRGB, converted to linear at generation)
pub const GOLD: [f32; 3] = [1.0, 0.843, 0.0]; // #FFD700
pub const DEEP_RED: [f32; 3] = [0.6, 0.0, 0.0]; // #990000
pub const DARK_GOLD: [f32; 3] = [0.773, 0.627, 0.0]; // #C5A000
pub const BAUBLE_GOLD_PROBABILITY: f32 = 0.6;

pub const PHOTO_PALETTE: [[f32; 3]; 5] = [
    [1.0, 0.843, 0.0],     // gold
    [0.855, 0.647, 0.125], // goldenrod
    [0.773, 0.627, 0.0],   // dark gold
    [0.941, 0.902, 0.549], // khaki
    [0.722, 0.525, 0.043], // dark goldenrod
];

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::new(CAMERA_EYE[0], CAMERA_EYE[1], CAMERA_EYE[2])
}

/// Convert an sRGB-encoded channel to linear light.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn srgb_to_linear_vec3(rgb: [f32; 3]) -> Vec3 {
    Vec3::new(
        srgb_to_linear(rgb[0]),
        srgb_to_linear(rgb[1]),
        srgb_to_linear(rgb[2]),
    )
}

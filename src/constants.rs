// --- Global Animation Constants ---
use glam::Vec4;

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;
pub const WINDOW_TITLE: &str = "Mitos";

// The background strobe and the division beat run at independent tempos.
pub const STROBE_TEMPO_BPM: f64 = 165.0;
pub const DIVISION_TEMPO_BPM: f64 = 41.25;

pub const MAX_BODIES: usize = 256;
pub const SPLIT_SHRINK: f32 = 0.90; // child dimension relative to parent
pub const MIN_BODY_DIM: f32 = 4.0;
pub const SPLIT_PADDING: f32 = 4.0; // extra gap between freshly split bodies

// First body spans this fraction of the smaller window axis; resizing the
// window rescales every body against the same reference.
pub const BASE_DIM_FRACTION: f32 = 0.10;

pub const SEPARATION_MAX_PASSES: usize = 30;
// 5% tolerance on the pairwise minimum distance lets sprites brush slightly.
pub const SEPARATION_TOLERANCE: f32 = 0.95;

pub const FPS_UPDATE_INTERVAL_SECS: f64 = 0.5;

// Strobe palette, sRGB. Converted to linear when handed to the surface.
pub const STROBE_PALETTE: [Vec4; 7] = [
    Vec4::new(1.0, 0.231, 0.188, 1.0),   // red
    Vec4::new(1.0, 0.584, 0.0, 1.0),     // orange
    Vec4::new(1.0, 0.8, 0.0, 1.0),       // yellow
    Vec4::new(0.204, 0.780, 0.349, 1.0), // green
    Vec4::new(0.039, 0.118, 1.0, 1.0),   // blue
    Vec4::new(0.510, 0.122, 0.980, 1.0), // purple
    Vec4::new(1.0, 0.176, 0.890, 1.0),   // pink
];

// Sprite fill, already linear.
pub const BODY_COLOR: [f32; 4] = [0.02, 0.02, 0.035, 1.0];

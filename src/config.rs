use crate::constants::{
    BASE_DIM_FRACTION, DIVISION_TEMPO_BPM, MAX_BODIES, MIN_BODY_DIM, SPLIT_PADDING, SPLIT_SHRINK,
};
use winit::dpi::PhysicalSize;

/// Fixed parameters of the division process. Everything is decided at
/// startup; nothing is runtime-configurable.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub division_tempo_bpm: f64,
    pub split_shrink: f32,
    pub max_bodies: usize,
    pub min_body_dim: f32,
    pub split_padding: f32,
    pub base_dim_fraction: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            division_tempo_bpm: DIVISION_TEMPO_BPM,
            split_shrink: SPLIT_SHRINK,
            max_bodies: MAX_BODIES,
            min_body_dim: MIN_BODY_DIM,
            split_padding: SPLIT_PADDING,
            base_dim_fraction: BASE_DIM_FRACTION,
        }
    }
}

impl SimulationConfig {
    /// Milliseconds between division beats.
    pub fn division_interval_ms(&self) -> f64 {
        60_000.0 / self.division_tempo_bpm
    }

    /// Reference sprite dimension for a canvas: a fraction of its smaller
    /// axis.
    pub fn base_dim(&self, size: PhysicalSize<u32>) -> f32 {
        size.width.min(size.height) as f32 * self.base_dim_fraction
    }
}

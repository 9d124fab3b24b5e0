use crate::constants::{STROBE_PALETTE, STROBE_TEMPO_BPM};
use crate::simulation::SimRng;
use crate::utils::srgb_to_linear;
use rand::{Rng, SeedableRng};

/// Beat-synchronized background color. Holds its own clock and RNG; on every
/// due beat it jumps to a different palette entry, never repeating the
/// current one.
pub struct Strobe {
    interval_ms: f64,
    last_change_ms: f64,
    current: usize,
    rng: SimRng,
}

impl Strobe {
    pub fn new() -> Self {
        Self::with_rng(SimRng::from_entropy())
    }

    pub fn with_rng(mut rng: SimRng) -> Self {
        let current = rng.gen_range(0..STROBE_PALETTE.len());
        Self {
            interval_ms: 60_000.0 / STROBE_TEMPO_BPM,
            last_change_ms: 0.0,
            current,
            rng,
        }
    }

    pub fn update(&mut self, now_ms: f64) {
        if now_ms - self.last_change_ms < self.interval_ms {
            return;
        }
        let mut next = self.current;
        while next == self.current {
            next = self.rng.gen_range(0..STROBE_PALETTE.len());
        }
        self.current = next;
        self.last_change_ms = now_ms;
    }

    /// Current color in linear space, ready for the surface clear.
    pub fn clear_color(&self) -> wgpu::Color {
        let c = srgb_to_linear(STROBE_PALETTE[self.current]);
        wgpu::Color {
            r: c.x as f64,
            g: c.y as f64,
            b: c.z as f64,
            a: c.w as f64,
        }
    }
}

impl Default for Strobe {
    fn default() -> Self {
        Self::new()
    }
}

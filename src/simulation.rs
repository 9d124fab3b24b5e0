use crate::config::SimulationConfig;
use crate::separation::separate_bodies;
use crate::utils::constrain;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use winit::dpi::PhysicalSize;

pub type SimRng = StdRng;

// --- Core Data Structures ---

/// A positioned, sized sprite. `position` is the center; the bounding box is
/// `w` by `h`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub w: f32,
    pub h: f32,
}

impl Body {
    pub fn new(position: Vec2, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0, "body dimensions must be positive");
        debug_assert!(position.x.is_finite() && position.y.is_finite());
        Self { position, w, h }
    }

    /// Larger of the two dimensions, used as the effective diameter when
    /// checking pairwise spacing.
    pub fn max_dim(&self) -> f32 {
        self.w.max(self.h)
    }

    /// Pull the center in so the full bounding box stays on the canvas.
    pub fn constrain_to(&mut self, bounds: PhysicalSize<u32>) {
        let width = bounds.width as f32;
        let height = bounds.height as f32;
        self.position.x = constrain(self.position.x, self.w * 0.5, width - self.w * 0.5);
        self.position.y = constrain(self.position.y, self.h * 0.5, height - self.h * 0.5);
        debug_assert!(self.position.x.is_finite() && self.position.y.is_finite());
    }
}

/// Owns the population and the division beat. Each due beat replaces the
/// current generation wholesale: every parent yields two shrunken children
/// pushed to opposite sides, the whole brood is separated, and the result
/// becomes the next generation.
pub struct SimulationState {
    pub bodies: Vec<Body>,
    pub config: SimulationConfig,
    rng: SimRng,
    window_size: PhysicalSize<u32>,
    base_dim: f32,
    last_division_ms: f64,
    is_paused: bool,
}

impl SimulationState {
    pub fn new(window_size: PhysicalSize<u32>, config: SimulationConfig) -> Self {
        Self::with_rng(window_size, config, SimRng::from_entropy())
    }

    /// Construct with an explicit RNG so runs can be reproduced.
    pub fn with_rng(
        window_size: PhysicalSize<u32>,
        config: SimulationConfig,
        rng: SimRng,
    ) -> Self {
        let base_dim = config.base_dim(window_size);
        let mut state = Self {
            bodies: Vec::with_capacity(config.max_bodies),
            config,
            rng,
            window_size,
            base_dim,
            last_division_ms: 0.0,
            is_paused: false,
        };
        state.initialize_bodies();
        state
    }

    fn initialize_bodies(&mut self) {
        self.bodies.clear();
        let center = Vec2::new(
            self.window_size.width as f32 * 0.5,
            self.window_size.height as f32 * 0.5,
        );
        self.bodies.push(Body::new(center, self.base_dim, self.base_dim));
    }

    /// Advance the simulation. Called once per frame with the monotonic clock
    /// reading; a no-op between beats. The beat timestamp advances even when
    /// the population is capped, so a later uncapped beat never fires a burst
    /// of catch-up divisions.
    pub fn update(&mut self, now_ms: f64) {
        if self.is_paused {
            return;
        }
        if now_ms - self.last_division_ms < self.config.division_interval_ms() {
            return;
        }
        if self.bodies.len() < self.config.max_bodies {
            self.divide();
        }
        self.last_division_ms = now_ms;
    }

    /// One full generation: split every parent, separate the children,
    /// replace the population.
    fn divide(&mut self) {
        let mut children = Vec::with_capacity(self.config.max_bodies + 1);
        for parent in &self.bodies {
            let (first, second) =
                Self::split_body(parent, self.window_size, &self.config, &mut self.rng);
            children.push(first);
            children.push(second);
            if children.len() >= self.config.max_bodies {
                break;
            }
        }
        separate_bodies(&mut children, self.window_size, &mut self.rng);
        children.truncate(self.config.max_bodies);
        self.bodies = children;
    }

    /// Two children on opposite sides of the parent along a random axis, far
    /// enough apart that they start roughly clear of each other, each pulled
    /// back onto the canvas.
    fn split_body(
        parent: &Body,
        bounds: PhysicalSize<u32>,
        config: &SimulationConfig,
        rng: &mut SimRng,
    ) -> (Body, Body) {
        let w = (parent.w * config.split_shrink).max(config.min_body_dim);
        let h = (parent.h * config.split_shrink).max(config.min_body_dim);

        let angle = rng.gen_range(0.0..TAU);
        let dist = (parent.w + w) * 0.6 + config.split_padding;
        let offset = Vec2::new(angle.cos(), angle.sin()) * dist;

        let mut first = Body::new(parent.position + offset, w, h);
        let mut second = Body::new(parent.position - offset, w, h);
        first.constrain_to(bounds);
        second.constrain_to(bounds);
        (first, second)
    }

    /// Rescale every body against the new canvas. This rewrites dimensions
    /// between beats; `update` itself always reads the size held here.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let old_base = self.base_dim;
        self.window_size = new_size;
        self.base_dim = self.config.base_dim(new_size);
        let ratio = if old_base > 0.0 {
            self.base_dim / old_base
        } else {
            1.0
        };
        for body in &mut self.bodies {
            body.w *= ratio;
            body.h *= ratio;
            body.constrain_to(new_size);
        }
        log::info!(
            "resized simulation area to {}x{} (base dim {:.1})",
            new_size.width,
            new_size.height,
            self.base_dim
        );
    }

    /// Back to a single centered body with a fresh seed. The beat clock is
    /// re-anchored at `now_ms` so the first division lands a full interval
    /// later.
    pub fn restart(&mut self, now_ms: f64) {
        log::info!("restarting with a fresh seed");
        self.rng = SimRng::from_entropy();
        self.initialize_bodies();
        self.last_division_ms = now_ms;
        self.is_paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        println!(
            "Simulation {}",
            if self.is_paused { "Paused" } else { "Resumed" }
        );
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }
}

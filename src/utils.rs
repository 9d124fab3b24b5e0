use glam::Vec4;

// --- Helper Functions ---

/// Clamp where the lower bound wins when the range is inverted, so a body
/// larger than the canvas settles on the near edge instead of panicking.
pub fn constrain(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

/// Component-wise sRGB to linear, alpha untouched. The surface format is
/// sRGB, so clear colors must be supplied in linear space.
pub fn srgb_to_linear(c: Vec4) -> Vec4 {
    fn channel(u: f32) -> f32 {
        if u <= 0.04045 {
            u / 12.92
        } else {
            ((u + 0.055) / 1.055).powf(2.4)
        }
    }
    Vec4::new(channel(c.x), channel(c.y), channel(c.z), c.w)
}

//! Wind and interaction feed for the external shading collaborator.
//!
//! Blade bending happens entirely in the consumer's shader, driven by the
//! vertex alpha channel (normalized blade height) and this global state.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Global wind and interaction state, advanced every tick while enabled.
#[derive(Clone, Debug)]
pub struct WindState {
    pub enabled: bool,
    /// Horizontal wind direction (normalized on set).
    direction: Vec2,
    pub turbulence: f32,
    pub strength: f32,
    time: f32,
    /// Interactive bending source (player, objects).
    pub interaction_position: Vec3,
    pub interaction_strength: f32,
    pub interaction_radius: f32,
}

impl Default for WindState {
    fn default() -> Self {
        Self {
            enabled: true,
            direction: Vec2::X,
            turbulence: 0.3,
            strength: 0.5,
            time: 0.0,
            interaction_position: Vec3::ZERO,
            interaction_strength: 0.0,
            interaction_radius: 1.5,
        }
    }
}

impl WindState {
    /// Advance wind time. No-op while disabled.
    pub fn tick(&mut self, dt: f32) {
        if self.enabled {
            self.time += dt;
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.normalize_or_zero();
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn set_interaction(&mut self, position: Vec3, strength: f32) {
        self.interaction_position = position;
        self.interaction_strength = strength;
    }

    /// The packed wind vector consumed by shading: (dir_x, turbulence,
    /// dir_z, time).
    pub fn wind_vector(&self) -> [f32; 4] {
        [self.direction.x, self.turbulence, self.direction.y, self.time]
    }

    /// Snapshot as a GPU uniform.
    pub fn gpu_params(&self) -> GpuWindParams {
        GpuWindParams {
            wind: self.wind_vector(),
            interaction: [
                self.interaction_position.x,
                self.interaction_position.y,
                self.interaction_position.z,
                self.interaction_strength,
            ],
            strength: self.strength,
            interaction_radius: self.interaction_radius,
            enabled: self.enabled as u32,
            _pad: 0.0,
        }
    }
}

/// GPU uniform for wind/interaction (48 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GpuWindParams {
    /// dir_x, turbulence, dir_z, time
    pub wind: [f32; 4],
    // -- 16 bytes --
    /// x, y, z, strength
    pub interaction: [f32; 4],
    // -- 16 bytes --
    pub strength: f32,
    pub interaction_radius: f32,
    pub enabled: u32,
    pub _pad: f32,
    // -- 16 bytes --
    // Total: 48 bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_wind_params_size() {
        assert_eq!(std::mem::size_of::<GpuWindParams>(), 48);
    }

    #[test]
    fn test_gpu_wind_params_alignment() {
        assert_eq!(std::mem::size_of::<GpuWindParams>() % 16, 0);
    }

    #[test]
    fn test_tick_advances_time() {
        let mut wind = WindState::default();
        wind.tick(0.25);
        wind.tick(0.25);
        assert_eq!(wind.time(), 0.5);
        assert_eq!(wind.wind_vector()[3], 0.5);
    }

    #[test]
    fn test_disabled_wind_freezes_time() {
        let mut wind = WindState { enabled: false, ..Default::default() };
        wind.tick(1.0);
        assert_eq!(wind.time(), 0.0);
        assert_eq!(wind.gpu_params().enabled, 0);
    }

    #[test]
    fn test_direction_normalized() {
        let mut wind = WindState::default();
        wind.set_direction(Vec2::new(3.0, 4.0));
        assert!((wind.direction().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_interaction_in_uniform() {
        let mut wind = WindState::default();
        wind.set_interaction(Vec3::new(1.0, 2.0, 3.0), 0.8);
        let params = wind.gpu_params();
        assert_eq!(params.interaction, [1.0, 2.0, 3.0, 0.8]);
    }

    #[test]
    fn test_bytemuck_cast() {
        let p = GpuWindParams::zeroed();
        let bytes = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), 48);
    }
}

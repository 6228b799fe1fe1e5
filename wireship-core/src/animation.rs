/// Time-driven transform parameters
use crate::config::AnimationConfig;
use crate::input::InputState;

/// Rotation, oscillating translation and oscillating scale of the ship.
///
/// A parameter whose toggle is off keeps its last value. The oscillation
/// phase comes from `time_elapsed`, which always advances, so a toggle
/// switched back on resumes at the current global phase.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Degrees around Y, never wrapped
    pub rotation_angle: f32,
    pub translation_offset: f32,
    pub scaling_factor: f32,
    /// Seconds accumulated from frame deltas
    pub time_elapsed: f64,
    config: AnimationConfig,
}

impl AnimationState {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            rotation_angle: 0.0,
            translation_offset: 0.0,
            scaling_factor: config.scaling_base,
            time_elapsed: 0.0,
            config,
        }
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32, input: &InputState) {
        if input.rotation_on {
            self.rotation_angle += self.config.rotation_speed * dt;
        }

        self.time_elapsed += f64::from(dt);
        let phase = self.time_elapsed.sin() as f32;

        if input.translation_on {
            self.translation_offset = phase * self.config.translation_amplitude;
        }
        if input.scaling_on {
            self.scaling_factor = self.config.scaling_base + phase * self.config.scaling_variation;
        }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

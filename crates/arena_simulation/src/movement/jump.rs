//! Jump profile: gravity и стартовые скорости из времени до apex и высот
//!
//! ```text
//! g     = -2 · h_max / t_apex²
//! v_max = |g| · t_apex
//! v_min = sqrt(2 · |g| · h_min)
//! ```

use crate::config::MotionTuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpProfile {
    pub gravity: f32,
    pub max_velocity: f32,
    pub min_velocity: f32,
    /// Jump force, дающая ровно `max_velocity`
    pub reference_force: f32,
}

impl JumpProfile {
    pub fn from_tuning(tuning: &MotionTuning) -> Self {
        let t_apex = tuning.time_to_jump_apex;
        let gravity = -2.0 * tuning.max_jump_height / (t_apex * t_apex);
        Self {
            gravity,
            max_velocity: gravity.abs() * t_apex,
            min_velocity: (2.0 * gravity.abs() * tuning.min_jump_height).sqrt(),
            reference_force: tuning.reference_jump_force,
        }
    }

    /// Стартовая вертикальная скорость для прыжка силой `jump_force`
    pub fn launch_velocity(&self, jump_force: f32) -> f32 {
        self.max_velocity * (jump_force / self.reference_force)
    }
}

impl Default for JumpProfile {
    fn default() -> Self {
        Self::from_tuning(&MotionTuning::default())
    }
}

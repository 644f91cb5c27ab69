//! Kinematic Motion Solver
//!
//! Один вызов `MotionSolver::tick` на fixed tick:
//! 1. ground contact из physics backend'а
//! 2. camera-relative направление → сглаженная горизонтальная скорость
//! 3. jump trigger / срез variable-height / gravity
//! 4. collision-aware move; принимаем фактическое смещение
//!
//! Нет physics handle → тик = no-op, state не трогаем.

use bevy::prelude::*;

use super::components::{CharacterSpeeds, MotionState};
use super::jump::JumpProfile;
use crate::config::MotionTuning;
use crate::input::InputFrame;
use crate::physics::CharacterPhysics;

/// Heading yaw для camera forward (радианы вокруг +Y)
pub fn heading_yaw(forward: Vec3) -> f32 {
    forward.x.atan2(forward.z)
}

/// Camera-relative целевая скорость тика (y всегда 0)
///
/// Клавиши не суммируются больше единичной длины: противоположные гасят
/// друг друга, диагонали нормализуются.
pub fn desired_direction(frame: &InputFrame, yaw: f32, speed: f32) -> Vec3 {
    let front = Vec3::new(
        0.0,
        0.0,
        frame.move_backward as u8 as f32 - frame.move_forward as u8 as f32,
    );
    let side = Vec3::new(
        frame.move_left as u8 as f32 - frame.move_right as u8 as f32,
        0.0,
        0.0,
    );

    let direction = (front - side).normalize_or_zero() * speed;
    -(Quat::from_rotation_y(yaw) * direction)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSolver {
    pub jump: JumpProfile,
    pub step_scale: f32,
    pub velocity_xz_smoothing: f32,
    pub acceleration_time_grounded: f32,
    pub acceleration_time_airborne: f32,
    pub velocity_xz_min: f32,
}

impl MotionSolver {
    pub fn new(tuning: &MotionTuning) -> Self {
        Self {
            jump: JumpProfile::from_tuning(tuning),
            step_scale: tuning.step_scale,
            velocity_xz_smoothing: tuning.velocity_xz_smoothing,
            acceleration_time_grounded: tuning.acceleration_time_grounded,
            acceleration_time_airborne: tuning.acceleration_time_airborne,
            velocity_xz_min: tuning.velocity_xz_min,
        }
    }

    /// Какую долю разрыва до целевой скорости закрываем за тик
    pub fn lerp_factor(&self, grounded: bool) -> f32 {
        let acceleration_time = if grounded {
            self.acceleration_time_grounded
        } else {
            self.acceleration_time_airborne
        };
        let smoothing = self.velocity_xz_smoothing * acceleration_time;
        1.0 - smoothing.powf(self.step_scale)
    }

    fn smooth_horizontal(&self, current: Vec2, target: Vec2, grounded: bool) -> Vec2 {
        let mut velocity = current.lerp(target, self.lerp_factor(grounded));
        if velocity.x.abs() < self.velocity_xz_min {
            velocity.x = 0.0;
        }
        if velocity.y.abs() < self.velocity_xz_min {
            velocity.y = 0.0;
        }
        velocity
    }

    /// Вертикальная скорость (jump trigger, release cut, gravity)
    fn update_vertical(
        &self,
        state: &mut MotionState,
        jump: bool,
        grounded: bool,
        jump_force: f32,
        now: f64,
    ) {
        if jump && grounded {
            state.jumping = true;
            state.holding_jump = true;
            state.jump_start_time = now;
            state.vertical_velocity = self.jump.launch_velocity(jump_force);
        }

        if !jump && grounded {
            state.jumping = false;
        }

        // отпустили рано → режем подъём
        if state.jumping
            && state.holding_jump
            && !jump
            && state.vertical_velocity > self.jump.min_velocity
        {
            state.vertical_velocity = self.jump.min_velocity;
        }

        if !jump && grounded {
            state.vertical_velocity = 0.0;
        } else {
            state.vertical_velocity += self.jump.gravity * self.step_scale;
        }

        state.holding_jump = jump;
    }

    /// Один fixed tick
    ///
    /// Возвращает фактическое смещение, `None` если physics handle ещё нет.
    pub fn tick<P: CharacterPhysics>(
        &self,
        state: &mut MotionState,
        frame: &InputFrame,
        yaw: f32,
        speeds: &CharacterSpeeds,
        now: f64,
        physics: Option<&mut P>,
    ) -> Option<Vec3> {
        let physics = physics?;

        let grounded = physics.grounded();
        state.grounded = grounded;

        let target = desired_direction(frame, yaw, speeds.speed(frame.sprint));
        state.horizontal_velocity = self.smooth_horizontal(
            state.horizontal_velocity,
            Vec2::new(target.x, target.z),
            grounded,
        );

        self.update_vertical(state, frame.jump, grounded, speeds.jump_force, now);

        let desired = Vec3::new(
            state.horizontal_velocity.x,
            state.vertical_velocity,
            state.horizontal_velocity.y,
        );
        let actual = physics.move_by(desired);
        state.last_displacement = actual;
        Some(actual)
    }
}

impl Default for MotionSolver {
    fn default() -> Self {
        Self::new(&MotionTuning::default())
    }
}

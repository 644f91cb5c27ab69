//! First-person camera rig
//!
//! Rig = resource, а не render camera: хост копирует `position`,
//! `rotation()` и `fov` в свою камеру. Каждый render frame (Update):
//! 1. mouse look (pointer locked) + look правым стиком gamepad'а
//! 2. следование за точкой глаз локального игрока
//! 3. плавный FOV к sprint FOV при достаточно быстром спринте

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::config::{CameraSettings, GameSettings};
use crate::input::{InputAggregator, InputFrame, RawInput};
use crate::movement::{LocalPlayer, MotionState};
use crate::shooting::AimContext;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    /// Радианы вокруг +Y (0 = смотрим в -Z)
    pub yaw: f32,
    /// Радианы вокруг локальной X, clamp ±π/2
    pub pitch: f32,
    /// Вертикальный FOV в градусах
    pub fov: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

impl CameraRig {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: settings.fov,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn aim_context(&self, aim_locked: bool) -> AimContext {
        AimContext {
            position: self.position,
            rotation: self.rotation(),
            aim_locked,
        }
    }

    /// Поворот на look delta (радианы): +x вправо, +y вниз
    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x;
        self.pitch = (self.pitch - delta.y).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn follow(&mut self, eye: Vec3, rate: f32, dt: f32) {
        self.position = self.position.lerp(eye, (rate * dt).min(1.0));
    }

    pub fn ease_fov(&mut self, target: f32, rate: f32, dt: f32) {
        self.fov += (target - self.fov) * (rate * dt).min(1.0);
    }
}

/// System: look, follow, sprint FOV для локального игрока
pub fn update_camera_rig(
    time: Res<Time>,
    settings: Res<GameSettings>,
    mut raw: ResMut<RawInput>,
    mut rig: ResMut<CameraRig>,
    players: Query<(&Transform, &InputFrame, &MotionState), With<LocalPlayer>>,
) {
    let dt = time.delta_secs();
    let camera = &settings.camera;

    // mouse delta съедается здесь, даже если не применяется
    let mouse = std::mem::take(&mut raw.mouse_delta);
    if raw.pointer_locked && !raw.menu_open && mouse != Vec2::ZERO {
        rig.look(mouse * camera.mouse_base_speed * settings.player.mouse_sensitivity);
    }

    if !raw.menu_open {
        let aggregator =
            InputAggregator::new(&settings.controls, &raw.keyboard, raw.gamepad.as_ref());
        let stick = aggregator.look_axes(&settings.player);
        if stick != Vec2::ZERO {
            rig.look(stick);
        }
    }

    let Ok((transform, frame, motion)) = players.single() else {
        return;
    };

    let eye = transform.translation + Vec3::Y * camera.eye_height;
    rig.follow(eye, camera.follow_rate, dt);

    let speed = motion.speed_per_tick() * settings.motion.tick_hz as f32;
    let target_fov = if frame.sprint && speed > camera.sprint_speed_threshold {
        camera.fov + camera.sprint_fov_boost
    } else {
        camera.fov
    };
    rig.ease_fov(target_fov, camera.fov_rate, dt);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let rig = CameraRig::default();
        assert!(rig.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert_eq!(rig.fov, 90.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut rig = CameraRig::default();
        rig.look(Vec2::new(0.0, -10.0));
        assert_eq!(rig.pitch, FRAC_PI_2);
        rig.look(Vec2::new(0.0, 20.0));
        assert_eq!(rig.pitch, -FRAC_PI_2);
    }

    #[test]
    fn test_positive_look_x_turns_right() {
        let mut rig = CameraRig::default();
        rig.look(Vec2::new(FRAC_PI_2, 0.0));
        assert!(rig.forward().abs_diff_eq(Vec3::X, 1e-5), "{:?}", rig.forward());
    }

    #[test]
    fn test_follow_and_fov_ease() {
        let mut rig = CameraRig::default();
        rig.follow(Vec3::new(0.0, 2.0, 0.0), 30.0, 1.0 / 60.0);
        assert!((rig.position.y - 1.0).abs() < 1e-5);

        // large dt never overshoots
        rig.follow(Vec3::new(0.0, 2.0, 0.0), 30.0, 1.0);
        assert_eq!(rig.position.y, 2.0);

        rig.ease_fov(100.0, 10.0, 0.05);
        assert!((rig.fov - 95.0).abs() < 1e-4);
    }
}

//! bevy_rapier3d backend
//!
//! Rapier резолвит движение в своём step, поэтому `move_by` только кладёт
//! desired translation в контроллер. Фактическое смещение и ground contact
//! приходят в `KinematicCharacterControllerOutput` после step'а.
//!
//! Lag в один тик: `move_by` возвращает effective translation *прошлого*
//! step'а (до первого step'а `Vec3::ZERO`: персонаж ещё не двигался).
//! Так `MotionState.last_displacement` всегда post-collision, как у arena.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::CharacterPhysics;
use crate::config::MotionTuning;

/// Rigid body + капсула + character controller для локального игрока
pub fn rapier_character_bundle(tuning: &MotionTuning) -> impl Bundle {
    (
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(tuning.capsule_half_height, tuning.capsule_radius),
        KinematicCharacterController {
            offset: CharacterLength::Absolute(tuning.character_offset),
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(tuning.autostep_max_height),
                min_width: CharacterLength::Absolute(tuning.autostep_min_width),
                include_dynamic_bodies: true,
            }),
            slide: true,
            snap_to_ground: Some(CharacterLength::Absolute(tuning.snap_to_ground)),
            apply_impulse_to_dynamic_bodies: true,
            ..default()
        },
    )
}

/// Borrowed view на один тик solver'а
pub struct RapierCharacter<'a> {
    pub controller: &'a mut KinematicCharacterController,
    pub output: Option<&'a KinematicCharacterControllerOutput>,
}

impl CharacterPhysics for RapierCharacter<'_> {
    fn grounded(&self) -> bool {
        self.output.map(|output| output.grounded).unwrap_or(false)
    }

    fn move_by(&mut self, desired: Vec3) -> Vec3 {
        self.controller.translation = Some(desired);
        self.output
            .map(|output| output.effective_translation)
            .unwrap_or(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_requests_desired_and_reports_effective() {
        let mut controller = KinematicCharacterController::default();
        let output = KinematicCharacterControllerOutput {
            grounded: true,
            effective_translation: Vec3::new(0.0, 0.0, -0.04),
            ..default()
        };
        let mut character = RapierCharacter {
            controller: &mut controller,
            output: Some(&output),
        };

        assert!(character.grounded());
        // стена съела большую часть шага: solver видит то, что применил rapier
        let moved = character.move_by(Vec3::new(0.0, 0.0, -0.11));
        assert_eq!(moved, Vec3::new(0.0, 0.0, -0.04));
        assert_eq!(controller.translation, Some(Vec3::new(0.0, 0.0, -0.11)));
    }

    #[test]
    fn test_no_output_yet_means_no_displacement() {
        let mut controller = KinematicCharacterController::default();
        let mut character = RapierCharacter {
            controller: &mut controller,
            output: None,
        };

        assert!(!character.grounded());
        let moved = character.move_by(Vec3::new(0.1, -0.2, 0.0));
        assert_eq!(moved, Vec3::ZERO);
        assert_eq!(controller.translation, Some(Vec3::new(0.1, -0.2, 0.0)));
    }
}

//! FixedUpdate системы: motion локального игрока каждый тик

use bevy::prelude::*;
use bevy_rapier3d::prelude::{KinematicCharacterController, KinematicCharacterControllerOutput};

use super::components::{CharacterSpeeds, LocalPlayer, MotionState};
use super::solver::{heading_yaw, MotionSolver};
use crate::animation::AnimationMachine;
use crate::camera::CameraRig;
use crate::config::GameSettings;
use crate::input::{InputFrame, InputTriggers};
use crate::physics::{
    rapier_character_bundle, ArenaBody, ArenaBounds, ArenaCharacter, PhysicsBackend,
    RapierCharacter,
};
use crate::shooting::ProjectileLauncher;

fn current_yaw(rig: Option<&CameraRig>) -> f32 {
    heading_yaw(rig.map(CameraRig::forward).unwrap_or(Vec3::NEG_Z))
}

/// Motion solve против встроенных коллайдеров арены
pub fn solve_arena_motion(
    time: Res<Time>,
    settings: Res<GameSettings>,
    bounds: Option<Res<ArenaBounds>>,
    rig: Option<Res<CameraRig>>,
    mut players: Query<
        (
            &InputFrame,
            &CharacterSpeeds,
            &mut MotionState,
            Option<(&mut Transform, &mut ArenaBody)>,
        ),
        With<LocalPlayer>,
    >,
) {
    let solver = MotionSolver::new(&settings.motion);
    let yaw = current_yaw(rig.as_deref());
    let now = time.elapsed_secs_f64();

    for (frame, speeds, mut state, body) in players.iter_mut() {
        let mut character = match (bounds.as_deref(), body) {
            (Some(bounds), Some((transform, body))) => Some(ArenaCharacter {
                bounds,
                transform: transform.into_inner(),
                body: body.into_inner(),
            }),
            _ => None,
        };

        solver.tick(&mut state, frame, yaw, speeds, now, character.as_mut());
    }
}

/// Motion solve через rapier character controller
///
/// Идёт до backend sync rapier'а, чтобы translation забрали в том же step.
/// Ground contact и принятое смещение берутся из
/// `KinematicCharacterControllerOutput` прошлого step'а.
pub fn solve_rapier_motion(
    time: Res<Time>,
    settings: Res<GameSettings>,
    rig: Option<Res<CameraRig>>,
    mut players: Query<
        (
            &InputFrame,
            &CharacterSpeeds,
            &mut MotionState,
            Option<&mut KinematicCharacterController>,
            Option<&KinematicCharacterControllerOutput>,
        ),
        With<LocalPlayer>,
    >,
) {
    let solver = MotionSolver::new(&settings.motion);
    let yaw = current_yaw(rig.as_deref());
    let now = time.elapsed_secs_f64();

    for (frame, speeds, mut state, controller, output) in players.iter_mut() {
        let mut character = controller.map(|controller| RapierCharacter {
            controller: controller.into_inner(),
            output,
        });

        solver.tick(&mut state, frame, yaw, speeds, now, character.as_mut());
    }
}

/// Спавн локального игрока в spawn point арены
///
/// Несёт всё, что читает fixed-tick цепочка: input, edge triggers, motion
/// state, animation machine, projectile launcher + physics body выбранного
/// backend'а.
pub fn spawn_local_player(
    commands: &mut Commands,
    settings: &GameSettings,
    backend: PhysicsBackend,
) -> Entity {
    let spawn = Vec3::from_array(settings.arena.spawn);

    let mut entity = commands.spawn((
        LocalPlayer,
        Transform::from_translation(spawn),
        InputFrame::default(),
        InputTriggers::default(),
        CharacterSpeeds::from(&settings.character),
        MotionState::default(),
        AnimationMachine::new(&settings.combat),
        ProjectileLauncher::new(&settings.combat),
    ));

    match backend {
        PhysicsBackend::Arena => {
            entity.insert(ArenaBody::default());
        }
        PhysicsBackend::Rapier => {
            entity.insert(rapier_character_bundle(&settings.motion));
        }
    }

    entity.id()
}

//! Rapier backend integration test
//!
//! RapierPhysicsPlugin здесь не добавляется: `KinematicCharacterControllerOutput`
//! вставляется руками, как будто rapier уже отработал step. Так проверяем, что
//! solver берёт post-collision смещение, а не запрошенное.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{KinematicCharacterController, KinematicCharacterControllerOutput};
use arena_simulation::*;

fn create_rapier_app() -> (App, Entity) {
    let mut app = create_headless_app(42);
    app.add_plugins(ArenaSimulationPlugin {
        backend: PhysicsBackend::Rapier,
        ..Default::default()
    });
    app.update();

    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<LocalPlayer>>();
    let player = query.single(world).unwrap();
    (app, player)
}

fn set_output(app: &mut App, player: Entity, effective: Vec3) {
    app.world_mut()
        .entity_mut(player)
        .insert(KinematicCharacterControllerOutput {
            grounded: true,
            effective_translation: effective,
            ..default()
        });
}

fn hold_sprint_forward(app: &mut App, updates: usize) {
    {
        let mut raw = app.world_mut().resource_mut::<RawInput>();
        raw.keyboard.press("w");
        raw.keyboard.press("Shift");
    }
    for _ in 0..updates {
        app.update();
    }
}

#[test]
fn test_blocked_character_reports_no_displacement() {
    let (mut app, player) = create_rapier_app();
    set_output(&mut app, player, Vec3::ZERO);

    hold_sprint_forward(&mut app, 30);

    let state = *app.world().get::<MotionState>(player).unwrap();
    assert_eq!(state.last_displacement, Vec3::ZERO);
    assert!(state.grounded);

    // запрос в контроллер всё равно уходит на полной скорости спринта
    let controller = app.world().get::<KinematicCharacterController>(player).unwrap();
    let requested = controller.translation.unwrap();
    assert!((requested.z + 0.15).abs() < 1e-3, "{requested:?}");

    // упёрлись в стену → sprint FOV нет
    let rig = app.world().resource::<CameraRig>();
    assert!((rig.fov - 90.0).abs() < 1e-3, "fov {}", rig.fov);
}

#[test]
fn test_effective_translation_is_adopted() {
    let (mut app, player) = create_rapier_app();
    let effective = Vec3::new(0.0, 0.0, -0.06);
    set_output(&mut app, player, effective);

    hold_sprint_forward(&mut app, 10);

    let state = *app.world().get::<MotionState>(player).unwrap();
    assert_eq!(state.last_displacement, effective);
    assert_eq!(state.vertical_velocity, 0.0);
}

#[test]
fn test_before_first_step_nothing_moved() {
    let (mut app, player) = create_rapier_app();

    hold_sprint_forward(&mut app, 5);

    let state = *app.world().get::<MotionState>(player).unwrap();
    assert_eq!(state.last_displacement, Vec3::ZERO);
    assert!(!state.grounded);
    assert!(app
        .world()
        .get::<KinematicCharacterController>(player)
        .unwrap()
        .translation
        .is_some());
}

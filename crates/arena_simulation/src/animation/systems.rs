//! Animation система (FixedUpdate, после motion)

use bevy::prelude::*;

use super::{AnimationMachine, AnimationState};
use crate::input::{InputFrame, InputTriggers};
use crate::logger;
use crate::movement::LocalPlayer;

/// System: анимация локального игрока на этот тик
///
/// Fire/reload клипы стартуют на press edge и только с aim lock
/// (pointer захвачен или есть геймпад, settings menu закрыт).
pub fn update_player_animation(
    time: Res<Time>,
    mut players: Query<(&InputFrame, &InputTriggers, &mut AnimationMachine), With<LocalPlayer>>,
) {
    let dt = time.delta_secs();

    for (frame, triggers, mut machine) in players.iter_mut() {
        machine.advance(frame, dt);

        if !triggers.aim_locked {
            continue;
        }
        if triggers.reload_pressed && machine.trigger(AnimationState::Reloading) {
            logger::log("Animation: reload clip started");
        }
        if triggers.fire_pressed {
            machine.trigger(AnimationState::Firing);
        }
    }
}

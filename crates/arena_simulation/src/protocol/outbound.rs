//! Outbound `player:move` (Update, каждый render frame)

use bevy::prelude::*;

use super::queues::Outbox;
use super::wire::{OutboundMessage, PlayerMove};
use crate::animation::AnimationMachine;
use crate::camera::CameraRig;
use crate::movement::LocalPlayer;
use crate::sync::LocalClientId;

/// System: поза и клип локального игрока → комната
///
/// Пропускается, пока комната не выдала client id.
pub fn emit_player_move(
    local: Res<LocalClientId>,
    rig: Res<CameraRig>,
    mut outbox: ResMut<Outbox>,
    players: Query<(&Transform, &AnimationMachine), With<LocalPlayer>>,
) {
    if local.0.is_none() {
        return;
    }
    let Ok((transform, animation)) = players.single() else {
        return;
    };

    outbox.push(OutboundMessage::PlayerMove(PlayerMove {
        position: transform.translation.into(),
        rotation: rig.rotation().into(),
        animation: animation.state.clip_name().to_string(),
    }));
}

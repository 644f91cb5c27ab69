//! Input системы (FixedUpdate, первые в цепочке)

use bevy::prelude::*;

use super::{InputAggregator, InputFrame, InputTriggers, RawInput};
use crate::config::GameSettings;
use crate::movement::LocalPlayer;

/// System: RawInput → InputFrame + InputTriggers for the local player
///
/// Один sample на fixed tick; hardware без апдейта от хоста читается как
/// отпущенный (всё false).
pub fn aggregate_player_input(
    raw: Res<RawInput>,
    settings: Res<GameSettings>,
    mut players: Query<(&mut InputFrame, &mut InputTriggers), With<LocalPlayer>>,
) {
    let aggregator = InputAggregator::new(&settings.controls, &raw.keyboard, raw.gamepad.as_ref());
    let frame = aggregator.frame();
    let aim_locked = raw.aim_locked();

    for (mut input, mut triggers) in players.iter_mut() {
        *input = frame;
        triggers.sample(frame.fire, frame.reload, aim_locked);
    }
}

//! Launcher система (FixedUpdate, последняя в цепочке)

use bevy::prelude::*;

use super::launcher::{AimContext, ProjectileLauncher};
use crate::camera::CameraRig;
use crate::input::{InputFrame, InputTriggers};
use crate::logger;
use crate::movement::LocalPlayer;
use crate::protocol::{OutboundMessage, Outbox};
use crate::DeterministicRng;

/// System: завершение reload, reload trigger, потом fire
///
/// Fire = уровень: зажатый fire пробует выстрел каждый тик, темп режет
/// интервал launcher'а. Reload = edge.
pub fn run_projectile_launcher(
    time: Res<Time>,
    rig: Res<CameraRig>,
    mut rng: ResMut<DeterministicRng>,
    mut outbox: ResMut<Outbox>,
    mut players: Query<(&InputFrame, &InputTriggers, &mut ProjectileLauncher), With<LocalPlayer>>,
) {
    let now = time.elapsed_secs_f64();

    for (frame, triggers, mut launcher) in players.iter_mut() {
        if launcher.tick(now) {
            logger::log_info(&format!("Launcher: reloaded ({} rounds)", launcher.count));
        }

        if triggers.aim_locked && triggers.reload_pressed {
            launcher.reload(now);
        }

        if !frame.fire {
            continue;
        }

        let aim: AimContext = rig.aim_context(triggers.aim_locked);
        if let Some(request) = launcher.fire(now, &aim, &mut rng.rng) {
            outbox.push(OutboundMessage::ProjectileCreate(request));
        }
    }
}

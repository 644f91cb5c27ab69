//! Боевой статус для HUD
//!
//! Плоские данные для overlay хоста; рендер не задача ядра.

use bevy::prelude::*;

use crate::movement::LocalPlayer;
use crate::shooting::ProjectileLauncher;
use crate::sync::RemotePlayers;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct CombatStatus {
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    /// Игроки в комнате, включая локального
    pub connected_players: usize,
}

impl CombatStatus {
    /// Строка ammo, как её показывает overlay
    pub fn ammo_label(&self) -> String {
        if self.reloading {
            "RELOADING...".to_string()
        } else {
            format!("AMMO: {}/{}", self.ammo, self.max_ammo)
        }
    }
}

pub fn update_combat_status(
    mut status: ResMut<CombatStatus>,
    remote_players: Res<RemotePlayers>,
    players: Query<&ProjectileLauncher, With<LocalPlayer>>,
) {
    let mut next = CombatStatus {
        connected_players: remote_players.source_count(),
        ..status.clone()
    };
    if let Ok(launcher) = players.single() {
        let ammo = launcher.ammo();
        next.ammo = ammo.count;
        next.max_ammo = ammo.max_ammo;
        next.reloading = ammo.reloading;
    }

    // без change ticks каждый кадр
    status.set_if_neq(next);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ammo_label() {
        let mut status = CombatStatus {
            ammo: 12,
            max_ammo: 50,
            ..default()
        };
        assert_eq!(status.ammo_label(), "AMMO: 12/50");

        status.reloading = true;
        assert_eq!(status.ammo_label(), "RELOADING...");
    }
}

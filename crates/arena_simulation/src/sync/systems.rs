//! Применение snapshot'ов и sync mirrored entities (Update)

use bevy::prelude::*;
use std::collections::HashSet;

use super::descriptors::{RemotePlayers, RemoteProjectiles, RenderPlayer, RenderProjectile};
use super::mirror::{Mirror, MirrorEntry, ReconcileReport};
use crate::config::GameSettings;
use crate::logger;
use crate::protocol::SnapshotInbox;

/// Session id от комнаты (`None` до join)
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalClientId(pub Option<String>);

/// Entity в мире для одного entry mirror'а
#[derive(Component, Debug, Clone)]
pub struct Mirrored<D: MirrorEntry> {
    pub id: String,
    pub entry: D,
}

fn log_report(kind: &str, report: &ReconcileReport) {
    if !report.added.is_empty() || !report.removed.is_empty() {
        logger::log(&format!(
            "Sync {}: +{:?} -{:?}",
            kind, report.added, report.removed
        ));
    }
}

/// System: самый свежий pending snapshot → оба mirror'а
pub fn apply_snapshots(
    mut inbox: ResMut<SnapshotInbox>,
    local: Res<LocalClientId>,
    settings: Res<GameSettings>,
    mut players: ResMut<RemotePlayers>,
    mut projectiles: ResMut<RemoteProjectiles>,
) {
    let Some(state) = inbox.take() else {
        return;
    };

    let report = players.reconcile(&state.players, local.0.as_deref(), RenderPlayer::from_wire);
    log_report("players", &report);

    let combat = &settings.combat;
    let report = projectiles.reconcile(&state.projectiles, None, |id, wire| {
        RenderProjectile::from_wire(id, wire, combat)
    });
    log_report("projectiles", &report);
}

/// System: одна entity на entry mirror'а (spawn / update / despawn)
pub fn sync_mirror_entities<D: MirrorEntry>(
    mut commands: Commands,
    mirror: Res<Mirror<D>>,
    mut existing: Query<(Entity, &mut Mirrored<D>, &mut Transform)>,
) {
    if !mirror.is_changed() {
        return;
    }

    let mut present = HashSet::new();
    for (entity, mut mirrored, mut transform) in existing.iter_mut() {
        match mirror.get(&mirrored.id) {
            Some(entry) if present.insert(mirrored.id.clone()) => {
                if mirrored.entry != *entry {
                    mirrored.entry = entry.clone();
                    *transform = entry.transform();
                }
            }
            // пропал из mirror'а или дубликат уже оставленного id
            _ => {
                commands.entity(entity).despawn();
            }
        }
    }

    for (id, entry) in mirror.iter() {
        if !present.contains(id) {
            commands.spawn((
                Mirrored {
                    id: id.to_string(),
                    entry: entry.clone(),
                },
                entry.transform(),
            ));
        }
    }
}

//! Render descriptors из wire state

use bevy::prelude::*;

use super::mirror::{Mirror, MirrorEntry};
use crate::animation::AnimationState;
use crate::config::CombatSettings;
use crate::protocol::{PlayerState, ProjectileState};
use crate::shooting::PROJECTILE_PALETTE;

/// Remote player глазами renderer'а
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlayer {
    pub id: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub animation: AnimationState,
}

impl RenderPlayer {
    pub fn from_wire(id: &str, wire: &PlayerState) -> Self {
        Self {
            id: id.to_string(),
            position: wire.position.into(),
            rotation: wire.rotation.into(),
            animation: AnimationState::from_clip_name_or_idle(&wire.animation),
        }
    }
}

impl MirrorEntry for RenderPlayer {
    fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation)
    }
}

/// Серверный снаряд глазами renderer'а
///
/// ❌ Локально НЕ истекает: живёт ровно пока его перечисляет сервер.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProjectile {
    pub id: String,
    pub position: Vec3,
    pub direction: Vec3,
    /// `direction × projectile speed`, отдаётся телу renderer'а
    pub velocity: Vec3,
    pub color: String,
    pub radius: f32,
    pub owner_id: String,
    pub spawn_timestamp: f64,
}

impl RenderProjectile {
    pub fn from_wire(id: &str, wire: &ProjectileState, combat: &CombatSettings) -> Self {
        let direction: Vec3 = wire.direction.into();
        let color = if wire.color.is_empty() {
            PROJECTILE_PALETTE[0].to_string()
        } else {
            wire.color.clone()
        };

        Self {
            id: id.to_string(),
            position: wire.position.into(),
            direction,
            velocity: direction * combat.projectile_speed,
            color,
            radius: combat.projectile_radius,
            owner_id: wire.owner_id.clone(),
            spawn_timestamp: wire.timestamp,
        }
    }
}

impl MirrorEntry for RenderProjectile {
    fn transform(&self) -> Transform {
        Transform::from_translation(self.position)
    }
}

/// Remote players без локального клиента
pub type RemotePlayers = Mirror<RenderPlayer>;

/// Все снаряды, которые сейчас перечисляет сервер
pub type RemoteProjectiles = Mirror<RenderProjectile>;

//! Wire types, общие с room server'ом
//!
//! Поля на wire в camelCase (`ownerId`). Векторы и кватернионы = плоские
//! объекты `{x, y, z[, w]}`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3Wire {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for Vec3Wire {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Vec3Wire> for Vec3 {
    fn from(v: Vec3Wire) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatWire {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for QuatWire {
    fn default() -> Self {
        Quat::IDENTITY.into()
    }
}

impl From<Quat> for QuatWire {
    fn from(q: Quat) -> Self {
        Self { x: q.x, y: q.y, z: q.z, w: q.w }
    }
}

impl From<QuatWire> for Quat {
    fn from(q: QuatWire) -> Self {
        let quat = Quat::from_xyzw(q.x, q.y, q.z, q.w);
        // нулевой/мусорный rotation с wire не должен портить transform
        if quat.length_squared() > f32::EPSILON && quat.is_finite() {
            quat.normalize()
        } else {
            Quat::IDENTITY
        }
    }
}

/// Игрок в authoritative room state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub id: String,
    pub position: Vec3Wire,
    #[serde(default)]
    pub rotation: QuatWire,
    /// Имя клипа (`Rig|Saiga_*`); неизвестные допустимы
    #[serde(default)]
    pub animation: String,
}

/// Снаряд в authoritative room state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectileState {
    pub id: String,
    pub position: Vec3Wire,
    pub direction: Vec3Wire,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub owner_id: String,
    /// Время создания на сервере (ms с epoch)
    #[serde(default)]
    pub timestamp: f64,
}

/// Полный authoritative snapshot, ключ = id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub players: BTreeMap<String, PlayerState>,
    pub projectiles: BTreeMap<String, ProjectileState>,
}

impl GameState {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// `player:move` payload, шлётся каждый render frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMove {
    pub position: Vec3Wire,
    pub rotation: QuatWire,
    pub animation: String,
}

/// `projectile:create` payload (request на создание, НЕ локальный спавн)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectileCreate {
    pub position: Vec3Wire,
    pub direction: Vec3Wire,
    pub color: String,
}

/// Сообщения ядра, их дренит transport glue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OutboundMessage {
    #[serde(rename = "player:move")]
    PlayerMove(PlayerMove),
    #[serde(rename = "projectile:create")]
    ProjectileCreate(ProjectileCreate),
}

impl OutboundMessage {
    pub fn message_type(&self) -> &'static str {
        match self {
            OutboundMessage::PlayerMove(_) => "player:move",
            OutboundMessage::ProjectileCreate(_) => "projectile:create",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_wire_shape() {
        let message = OutboundMessage::ProjectileCreate(ProjectileCreate {
            position: Vec3::new(1.0, 2.0, 3.0).into(),
            direction: Vec3::NEG_Z.into(),
            color: "#FF0000".to_string(),
        });

        let value: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "projectile:create",
                "data": {
                    "position": { "x": 1.0, "y": 2.0, "z": 3.0 },
                    "direction": { "x": 0.0, "y": 0.0, "z": -1.0 },
                    "color": "#FF0000"
                }
            })
        );
        assert_eq!(message.message_type(), "projectile:create");
    }

    #[test]
    fn test_player_move_carries_quaternion_and_clip() {
        let message = OutboundMessage::PlayerMove(PlayerMove {
            position: Vec3::ZERO.into(),
            rotation: Quat::IDENTITY.into(),
            animation: "Rig|Saiga_Idle".to_string(),
        });

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "player:move");
        assert_eq!(value["data"]["rotation"]["w"], 1.0);
        assert_eq!(value["data"]["animation"], "Rig|Saiga_Idle");
    }

    #[test]
    fn test_game_state_parses_camel_case_and_missing_sections() {
        let json = r##"{
            "projectiles": {
                "p1": {
                    "id": "p1",
                    "position": { "x": 0, "y": 1, "z": 2 },
                    "direction": { "x": 0, "y": 0, "z": -1 },
                    "color": "#00FF00",
                    "ownerId": "abc",
                    "timestamp": 1700000000000
                }
            }
        }"##;

        let state = GameState::from_json(json).unwrap();
        assert!(state.players.is_empty());
        assert_eq!(state.projectiles["p1"].owner_id, "abc");
        assert_eq!(state.projectiles["p1"].timestamp, 1_700_000_000_000.0);
    }

    #[test]
    fn test_degenerate_quaternion_becomes_identity() {
        let zero = QuatWire { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
        assert_eq!(Quat::from(zero), Quat::IDENTITY);
    }
}

//! Physics substrate для kinematic персонажа
//!
//! Motion solver общается только с `CharacterPhysics`:
//! - `grounded()` = контакт *до* движения этого тика
//! - `move_by(desired)` просит collision-aware смещение и возвращает
//!   реально применённое (slide, autostep, snap).
//!
//! Два backend'а:
//! - `arena`: встроенный пол + 4 стены, rapier plugin не нужен (headless)
//! - `rapier`: bevy_rapier3d `KinematicCharacterController`

use bevy::prelude::*;

pub mod arena;
pub mod rapier;

pub use arena::{ArenaBody, ArenaBounds, ArenaCharacter};
pub use rapier::{rapier_character_bundle, RapierCharacter};

/// Collision-aware character movement
pub trait CharacterPhysics {
    fn grounded(&self) -> bool;

    /// Применить `desired` (смещение за тик), вернуть фактическое
    fn move_by(&mut self, desired: Vec3) -> Vec3;
}

/// Кто двигает локального персонажа
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhysicsBackend {
    /// Встроенные коллайдеры арены (headless default)
    #[default]
    Arena,
    /// bevy_rapier3d character controller; `RapierPhysicsPlugin` добавляет хост
    Rapier,
}

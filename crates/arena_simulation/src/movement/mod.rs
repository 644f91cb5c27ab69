//! Movement domain: kinematic персонаж локального игрока
//!
//! Содержит:
//! - LocalPlayer / CharacterSpeeds / MotionState (components)
//! - JumpProfile (gravity + launch velocities)
//! - MotionSolver (чистый per-tick solve поверх `CharacterPhysics` backend'а)
//! - FixedUpdate системы для arena и rapier backend'ов

pub mod components;
pub mod jump;
pub mod solver;
pub mod systems;


pub use components::*;
pub use jump::JumpProfile;
pub use solver::{desired_direction, heading_yaw, MotionSolver};
pub use systems::{solve_arena_motion, solve_rapier_motion, spawn_local_player};

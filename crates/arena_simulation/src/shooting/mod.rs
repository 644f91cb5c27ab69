//! Shooting domain: projectile launcher локального игрока
//!
//! Содержит:
//! - ProjectileLauncher (ammo, reload machine, интервал выстрелов)
//! - AimContext (поза камеры на момент выстрела)
//! - PROJECTILE_PALETTE
//! - run_projectile_launcher (FixedUpdate система → Outbox)

pub mod launcher;
pub mod systems;


pub use launcher::{AimContext, AmmoState, LauncherPhase, ProjectileLauncher, PROJECTILE_PALETTE};
pub use systems::run_projectile_launcher;

//! Projectile Lifecycle Manager (client side)
//!
//! States:
//! - **Ready:** выстрел принимается при `count > 0` и прошедшем интервале
//! - **Reloading:** любой fire/reload дропается до `completes_at`
//!
//! ❌ Выстрел НЕ спавнит ничего локально: только `projectile:create` request.
//! Снаряд появляется, когда его перечислит сервер и отзеркалит reconciler.

use bevy::prelude::*;
use rand::Rng;

use crate::config::CombatSettings;
use crate::logger;
use crate::protocol::ProjectileCreate;

/// Радужная палитра, один цвет равномерно на выстрел
pub const PROJECTILE_PALETTE: [&str; 7] = [
    "#FF0000", "#FF7F00", "#FFFF00", "#00FF00", "#0000FF", "#4B0082", "#9400D3",
];

/// Поза камеры + aim lock в момент выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimContext {
    pub position: Vec3,
    pub rotation: Quat,
    pub aim_locked: bool,
}

impl AimContext {
    pub fn forward(&self) -> Vec3 {
        (self.rotation * Vec3::NEG_Z).normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum LauncherPhase {
    #[default]
    Ready,
    Reloading {
        /// Elapsed секунды, когда магазин снова полный
        completes_at: f64,
    },
}

/// Ammo snapshot для HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmmoState {
    pub count: u32,
    pub max_ammo: u32,
    pub reloading: bool,
}

/// Ammo, reload и rate limiting оружия локального игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProjectileLauncher {
    pub count: u32,
    pub max_ammo: u32,
    pub phase: LauncherPhase,
    /// Elapsed секунды последнего принятого выстрела
    pub last_shot_at: Option<f64>,
    pub min_shot_interval: f64,
    pub reload_duration: f64,
    /// Spawn offset in camera space
    pub muzzle_offset: Vec3,
}

impl Default for ProjectileLauncher {
    fn default() -> Self {
        Self::new(&CombatSettings::default())
    }
}

impl ProjectileLauncher {
    pub fn new(combat: &CombatSettings) -> Self {
        Self {
            count: combat.max_ammo,
            max_ammo: combat.max_ammo,
            phase: LauncherPhase::Ready,
            last_shot_at: None,
            min_shot_interval: combat.min_shot_interval,
            reload_duration: combat.reload_duration,
            muzzle_offset: Vec3::from_array(combat.muzzle_offset),
        }
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.phase, LauncherPhase::Reloading { .. })
    }

    pub fn ammo(&self) -> AmmoState {
        AmmoState {
            count: self.count,
            max_ammo: self.max_ammo,
            reloading: self.is_reloading(),
        }
    }

    fn interval_elapsed(&self, now: f64) -> bool {
        self.last_shot_at
            .map(|last| now - last >= self.min_shot_interval)
            .unwrap_or(true)
    }

    /// Попытка выстрела; `None` = request дропнут
    ///
    /// Пустой магазин вместо выстрела ставит reload.
    pub fn fire<R: Rng>(
        &mut self,
        now: f64,
        aim: &AimContext,
        rng: &mut R,
    ) -> Option<ProjectileCreate> {
        if !aim.aim_locked || self.is_reloading() {
            return None;
        }
        if self.count == 0 {
            self.reload(now);
            return None;
        }
        if !self.interval_elapsed(now) {
            return None;
        }

        self.count -= 1;
        self.last_shot_at = Some(now);

        let position = aim.position + aim.rotation * self.muzzle_offset;
        let color = PROJECTILE_PALETTE[rng.gen_range(0..PROJECTILE_PALETTE.len())];
        let request = ProjectileCreate {
            position: position.into(),
            direction: aim.forward().into(),
            color: color.to_string(),
        };

        if self.count == 0 {
            self.reload(now);
        }
        Some(request)
    }

    /// Старт reload; только из Ready и с неполным магазином
    pub fn reload(&mut self, now: f64) -> bool {
        if self.is_reloading() || self.count >= self.max_ammo {
            return false;
        }

        self.phase = LauncherPhase::Reloading {
            completes_at: now + self.reload_duration,
        };
        logger::log(&format!(
            "Launcher: reloading {}/{} (done at {:.3}s)",
            self.count,
            self.max_ammo,
            now + self.reload_duration
        ));
        true
    }

    /// Завершить reload по дедлайну; `true` в тике, когда магазин заполнился
    pub fn tick(&mut self, now: f64) -> bool {
        match self.phase {
            LauncherPhase::Reloading { completes_at } if now >= completes_at => {
                self.count = self.max_ammo;
                self.phase = LauncherPhase::Ready;
                true
            }
            _ => false,
        }
    }
}

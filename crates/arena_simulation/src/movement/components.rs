//! Movement компоненты (локальный игрок)

use bevy::prelude::*;

use crate::config::CharacterSettings;

/// Marker: персонаж, которым управляет input этого клиента
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct LocalPlayer;

/// Скорости игрока (units за тик)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterSpeeds {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_force: f32,
}

impl Default for CharacterSpeeds {
    fn default() -> Self {
        Self::from(&CharacterSettings::default())
    }
}

impl From<&CharacterSettings> for CharacterSpeeds {
    fn from(settings: &CharacterSettings) -> Self {
        Self {
            walk_speed: settings.walk_speed,
            run_speed: settings.run_speed,
            jump_force: settings.jump_force,
        }
    }
}

impl CharacterSpeeds {
    pub fn speed(&self, sprint: bool) -> f32 {
        if sprint {
            self.run_speed
        } else {
            self.walk_speed
        }
    }
}

/// Вертикальная фаза, выводится из `MotionState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    Rising,
    Falling,
}

/// Kinematic motion state (живёт между тиками)
///
/// Скорости = смещения за тик, НЕ m/s.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MotionState {
    /// Сглаженная горизонтальная скорость (x = world X, y = world Z)
    pub horizontal_velocity: Vec2,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub jumping: bool,
    /// Jump был зажат в прошлом тике
    pub holding_jump: bool,
    /// Elapsed секунды на старте текущего прыжка
    pub jump_start_time: f64,
    /// Post-collision смещение последнего тика
    pub last_displacement: Vec3,
}

impl MotionState {
    pub fn phase(&self) -> JumpPhase {
        if self.jumping && self.vertical_velocity > 0.0 {
            JumpPhase::Rising
        } else if self.grounded {
            JumpPhase::Grounded
        } else {
            JumpPhase::Falling
        }
    }

    /// Длина смещения за тик
    pub fn speed_per_tick(&self) -> f32 {
        self.last_displacement.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase() {
        let mut state = MotionState {
            grounded: true,
            ..default()
        };
        assert_eq!(state.phase(), JumpPhase::Grounded);

        state.jumping = true;
        state.vertical_velocity = 0.4;
        assert_eq!(state.phase(), JumpPhase::Rising);

        state.grounded = false;
        state.vertical_velocity = -0.1;
        assert_eq!(state.phase(), JumpPhase::Falling);
    }

    #[test]
    fn test_speed_selection() {
        let speeds = CharacterSpeeds::default();
        assert_eq!(speeds.speed(false), 0.11);
        assert_eq!(speeds.speed(true), 0.15);
    }
}

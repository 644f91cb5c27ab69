//! Game settings resource
//!
//! Один `GameSettings` вставляет `ArenaSimulationPlugin` на старте, системы
//! читают его через `Res<GameSettings>`. Глобального settings-объекта нет:
//! хост, меняющий bindings/tuning, заменяет resource между кадрами.
//!
//! Persistence на хосте. JSON helpers здесь только (де)сериализуют; каждая
//! секция `#[serde(default)]`, поэтому частичный документ мержится поверх
//! defaults поле за полем.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::input::ControlBindings;
use crate::logger;

/// Ошибки парсинга/валидации settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to parse settings JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Все tunables, которые читает ядро
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameSettings {
    pub controls: ControlBindings,
    pub player: PlayerSettings,
    pub character: CharacterSettings,
    pub combat: CombatSettings,
    pub motion: MotionTuning,
    pub camera: CameraSettings,
    pub arena: ArenaSettings,
}

impl GameSettings {
    /// Парсинг сохранённого документа (нет поля → default)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Как `from_json`, но битый документ → defaults
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(err) => {
                logger::log_warning(&format!("Settings rejected, using defaults: {}", err));
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });

        if self.combat.max_ammo == 0 {
            return invalid("combat.maxAmmo", "must be at least 1");
        }
        if !(self.combat.reload_duration > 0.0) {
            return invalid("combat.reloadDuration", "must be positive");
        }
        if !(self.combat.min_shot_interval >= 0.0) {
            return invalid("combat.minShotInterval", "must not be negative");
        }
        if !(self.character.walk_speed >= 0.0 && self.character.run_speed >= 0.0) {
            return invalid("character", "speeds must not be negative");
        }
        if !(self.character.jump_force >= 0.0) {
            return invalid("character.jumpForce", "must not be negative");
        }
        if !(self.motion.time_to_jump_apex > 0.0) {
            return invalid("motion.timeToJumpApex", "must be positive");
        }
        // отрицательная высота → NaN в v_min, срез прыжка молча пропадает
        if !(self.motion.min_jump_height >= 0.0) {
            return invalid("motion.minJumpHeight", "must not be negative");
        }
        if !(self.motion.max_jump_height >= self.motion.min_jump_height) {
            return invalid("motion.maxJumpHeight", "must be >= minJumpHeight");
        }
        if !(self.motion.reference_jump_force > 0.0) {
            return invalid("motion.referenceJumpForce", "must be positive");
        }
        if !(self.motion.tick_hz > 0.0 && self.motion.tick_hz.is_finite()) {
            return invalid("motion.tickHz", "must be positive");
        }
        Ok(())
    }
}

/// Look settings (мышь + правый stick геймпада)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerSettings {
    pub mouse_sensitivity: f32,
    pub gamepad_sensitivity_x: f32,
    pub gamepad_sensitivity_y: f32,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.0,
            gamepad_sensitivity_x: 0.04,
            gamepad_sensitivity_y: 0.03,
            invert_x: false,
            invert_y: false,
        }
    }
}

/// Скорости игрока (units за тик)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterSettings {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_force: f32,
}

impl Default for CharacterSettings {
    fn default() -> Self {
        Self {
            walk_speed: 0.11,
            run_speed: 0.15,
            jump_force: 0.5,
        }
    }
}

/// Weapon + projectile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombatSettings {
    pub max_ammo: u32,
    /// Секунды от начала reload до полного магазина
    pub reload_duration: f64,
    /// Выстрелы ближе этого интервала дропаются (секунды)
    pub min_shot_interval: f64,
    /// Длина one-shot клипов (секунды)
    pub fire_clip_duration: f32,
    pub reload_clip_duration: f32,
    /// Spawn offset в camera space (right, down, forward)
    pub muzzle_offset: [f32; 3],
    pub projectile_speed: f32,
    pub projectile_radius: f32,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            max_ammo: 50,
            reload_duration: 1.0,
            min_shot_interval: 0.08,
            fire_clip_duration: 0.3,
            reload_clip_duration: 1.5,
            muzzle_offset: [0.12, -0.27, -1.7],
            projectile_speed: 45.0,
            projectile_radius: 0.11,
        }
    }
}

/// Константы kinematic контроллера
///
/// Скорости = смещения за тик; `step_scale` = per-tick коэффициент
/// интегрирования для gravity и экспоненты сглаживания.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionTuning {
    pub tick_hz: f64,
    pub character_offset: f32,
    pub autostep_max_height: f32,
    pub autostep_min_width: f32,
    pub snap_to_ground: f32,
    pub capsule_half_height: f32,
    pub capsule_radius: f32,
    pub acceleration_time_grounded: f32,
    pub acceleration_time_airborne: f32,
    pub velocity_xz_smoothing: f32,
    pub velocity_xz_min: f32,
    pub step_scale: f32,
    pub time_to_jump_apex: f32,
    pub max_jump_height: f32,
    pub min_jump_height: f32,
    pub reference_jump_force: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            character_offset: 0.1,
            autostep_max_height: 2.0,
            autostep_min_width: 0.05,
            snap_to_ground: 0.1,
            capsule_half_height: 1.0,
            capsule_radius: 0.5,
            acceleration_time_grounded: 0.025,
            acceleration_time_airborne: 0.2,
            velocity_xz_smoothing: 0.1,
            velocity_xz_min: 0.0001,
            step_scale: 0.116,
            time_to_jump_apex: 2.0,
            max_jump_height: 0.5,
            min_jump_height: 0.2,
            reference_jump_force: 0.5,
        }
    }
}

/// First-person camera rig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraSettings {
    /// Вертикальный FOV (градусы)
    pub fov: f32,
    pub sprint_fov_boost: f32,
    pub eye_height: f32,
    /// Lerp rate позиции (в секунду)
    pub follow_rate: f32,
    /// Lerp rate FOV (в секунду)
    pub fov_rate: f32,
    /// Минимальная скорость (m/s) для sprint FOV
    pub sprint_speed_threshold: f32,
    /// Радианы на пиксель при sensitivity 1.0
    pub mouse_base_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 90.0,
            sprint_fov_boost: 10.0,
            eye_height: 1.0,
            follow_rate: 30.0,
            fov_rate: 10.0,
            sprint_speed_threshold: 0.1,
            mouse_base_speed: 0.002,
        }
    }
}

/// Геометрия арены (пол 50×50, 4 стены)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArenaSettings {
    /// Расстояние от центра до осевой линии каждой стены
    pub half_extent: f32,
    pub wall_half_thickness: f32,
    pub floor_y: f32,
    pub spawn: [f32; 3],
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            half_extent: 25.0,
            wall_half_thickness: 1.0,
            floor_y: 0.0,
            spawn: [0.0, 7.0, 10.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_roundtrip_through_json() {
        let settings = GameSettings::default();
        let json = settings.to_json().unwrap();
        let parsed = GameSettings::from_json(&json).unwrap();
        assert_eq!(settings, parsed);
    }

    #[test]
    fn test_partial_document_merges_over_defaults() {
        let json = r#"{ "player": { "invertY": true }, "combat": { "maxAmmo": 30 } }"#;
        let settings = GameSettings::from_json(json).unwrap();

        assert!(settings.player.invert_y);
        assert_eq!(settings.player.gamepad_sensitivity_x, 0.04);
        assert_eq!(settings.combat.max_ammo, 30);
        assert_eq!(settings.combat.min_shot_interval, 0.08);
        assert_eq!(settings.controls, ControlBindings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameSettings::from_json(r#"{ "combat": { "maxAmmo": 0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "combat.maxAmmo", .. }));

        let err = GameSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_values_that_break_the_solver_rejected() {
        let cases = [
            (r#"{ "motion": { "minJumpHeight": -0.2 } }"#, "motion.minJumpHeight"),
            (r#"{ "character": { "jumpForce": -1.0 } }"#, "character.jumpForce"),
            (r#"{ "motion": { "tickHz": 0.0 } }"#, "motion.tickHz"),
            (r#"{ "motion": { "tickHz": -60.0 } }"#, "motion.tickHz"),
        ];

        for (json, expected) in cases {
            match GameSettings::from_json(json) {
                Err(SettingsError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
                other => panic!("{json}: expected Invalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_broken_document_falls_back_to_defaults() {
        let settings = GameSettings::from_json_or_default("]]");
        assert_eq!(settings, GameSettings::default());
    }
}

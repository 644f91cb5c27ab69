//! Animation states и имена клипов

use bevy::prelude::*;

/// Animation state персонажа
///
/// Приоритет (high → low): Reloading > Firing > Running > Walking > Idle.
/// Firing и Reloading = one-shot клипы, остальные зациклены.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum AnimationState {
    #[default]
    Idle,
    Walking,
    Running,
    Firing,
    Reloading,
}

impl AnimationState {
    pub const ALL: [AnimationState; 5] = [
        AnimationState::Idle,
        AnimationState::Walking,
        AnimationState::Running,
        AnimationState::Firing,
        AnimationState::Reloading,
    ];

    /// Имя клипа на wire и в animation mixer хоста
    pub fn clip_name(&self) -> &'static str {
        match self {
            AnimationState::Idle => "Rig|Saiga_Idle",
            AnimationState::Walking => "Rig|Saiga_Walk",
            AnimationState::Running => "Rig|Saiga_Run",
            AnimationState::Firing => "Rig|Saiga_Fire",
            AnimationState::Reloading => "Rig|Saiga_Reload_Full",
        }
    }

    pub fn from_clip_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.clip_name() == name)
    }

    /// Remote данные могут нести неизвестные клипы → Idle
    pub fn from_clip_name_or_idle(name: &str) -> Self {
        Self::from_clip_name(name).unwrap_or_default()
    }

    pub fn priority(&self) -> u8 {
        match self {
            AnimationState::Idle => 0,
            AnimationState::Walking => 1,
            AnimationState::Running => 2,
            AnimationState::Firing => 3,
            AnimationState::Reloading => 4,
        }
    }

    pub fn is_one_shot(&self) -> bool {
        matches!(self, AnimationState::Firing | AnimationState::Reloading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_names_roundtrip() {
        for state in AnimationState::ALL {
            assert_eq!(AnimationState::from_clip_name(state.clip_name()), Some(state));
        }
        assert_eq!(AnimationState::from_clip_name("Rig|Saiga_Dance"), None);
        assert_eq!(
            AnimationState::from_clip_name_or_idle("Rig|Saiga_Dance"),
            AnimationState::Idle
        );
    }

    #[test]
    fn test_priority_order() {
        let priorities: Vec<u8> = AnimationState::ALL.iter().map(|s| s.priority()).collect();
        assert!(priorities.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(AnimationState::Firing.priority() > AnimationState::Running.priority());
    }
}

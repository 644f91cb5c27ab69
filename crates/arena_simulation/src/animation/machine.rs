//! Combat & Animation State Machine
//!
//! Looping states выводятся из input frame каждый тик. One-shot states
//! (Firing, Reloading) держатся до конца таймера; пока one-shot активен,
//! trigger с приоритетом ниже или равным дропается (без очереди и рестарта),
//! более высокий его вытесняет.

use bevy::prelude::*;

use super::state::AnimationState;
use crate::config::CombatSettings;
use crate::input::InputFrame;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationMachine {
    pub state: AnimationState,
    /// Сколько секунд осталось у активного one-shot (0 для looping)
    pub remaining: f32,
    pub fire_duration: f32,
    pub reload_duration: f32,
}

impl Default for AnimationMachine {
    fn default() -> Self {
        Self::new(&CombatSettings::default())
    }
}

impl AnimationMachine {
    pub fn new(combat: &CombatSettings) -> Self {
        Self {
            state: AnimationState::Idle,
            remaining: 0.0,
            fire_duration: combat.fire_clip_duration,
            reload_duration: combat.reload_clip_duration,
        }
    }

    /// Looping state для movement frame
    pub fn locomotion(frame: &InputFrame) -> AnimationState {
        match (frame.is_moving(), frame.sprint) {
            (true, true) => AnimationState::Running,
            (true, false) => AnimationState::Walking,
            (false, _) => AnimationState::Idle,
        }
    }

    pub fn one_shot_active(&self) -> bool {
        self.state.is_one_shot() && self.remaining > 0.0
    }

    fn duration_of(&self, state: AnimationState) -> f32 {
        match state {
            AnimationState::Firing => self.fire_duration,
            AnimationState::Reloading => self.reload_duration,
            _ => 0.0,
        }
    }

    /// Запустить one-shot клип; возвращает, принят ли он
    pub fn trigger(&mut self, one_shot: AnimationState) -> bool {
        if !one_shot.is_one_shot() {
            return false;
        }
        if self.one_shot_active() && one_shot.priority() <= self.state.priority() {
            return false;
        }

        self.state = one_shot;
        self.remaining = self.duration_of(one_shot);
        true
    }

    /// Таймеры на `dt` вперёд, потом looping state
    pub fn advance(&mut self, frame: &InputFrame, dt: f32) -> AnimationState {
        if self.state.is_one_shot() {
            self.remaining -= dt;
            if self.remaining > 0.0 {
                return self.state;
            }
            self.remaining = 0.0;
        }

        self.state = Self::locomotion(frame);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn running() -> InputFrame {
        InputFrame {
            move_forward: true,
            sprint: true,
            ..default()
        }
    }

    #[test]
    fn test_locomotion_priority() {
        let mut machine = AnimationMachine::default();
        assert_eq!(machine.advance(&InputFrame::default(), DT), AnimationState::Idle);

        let walking = InputFrame {
            move_left: true,
            ..default()
        };
        assert_eq!(machine.advance(&walking, DT), AnimationState::Walking);
        assert_eq!(machine.advance(&running(), DT), AnimationState::Running);

        // один sprint это не движение
        let sprint_only = InputFrame {
            sprint: true,
            ..default()
        };
        assert_eq!(machine.advance(&sprint_only, DT), AnimationState::Idle);
    }

    #[test]
    fn test_firing_beats_running_until_clip_ends() {
        let mut machine = AnimationMachine::default();
        machine.advance(&running(), DT);

        assert!(machine.trigger(AnimationState::Firing));
        assert_eq!(machine.state, AnimationState::Firing);

        // клип 0.3 s → 17 тиков ещё firing, потом обратно running
        for _ in 0..17 {
            assert_eq!(machine.advance(&running(), DT), AnimationState::Firing);
        }
        let mut ticks = 0;
        while machine.advance(&running(), DT) == AnimationState::Firing {
            ticks += 1;
            assert!(ticks < 5);
        }
        assert_eq!(machine.state, AnimationState::Running);
        assert_eq!(machine.remaining, 0.0);
    }

    #[test]
    fn test_equal_priority_trigger_does_not_restart() {
        let mut machine = AnimationMachine::default();
        assert!(machine.trigger(AnimationState::Firing));
        machine.advance(&InputFrame::default(), 0.2);

        assert!(!machine.trigger(AnimationState::Firing));
        assert!((machine.remaining - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_reload_preempts_fire_but_not_vice_versa() {
        let mut machine = AnimationMachine::default();
        assert!(machine.trigger(AnimationState::Firing));
        assert!(machine.trigger(AnimationState::Reloading));
        assert_eq!(machine.state, AnimationState::Reloading);
        assert_eq!(machine.remaining, 1.5);

        assert!(!machine.trigger(AnimationState::Firing));
        assert_eq!(machine.state, AnimationState::Reloading);
    }

    #[test]
    fn test_looping_states_cannot_be_triggered() {
        let mut machine = AnimationMachine::default();
        assert!(!machine.trigger(AnimationState::Running));
        assert_eq!(machine.state, AnimationState::Idle);
    }

    #[test]
    fn test_expired_one_shot_accepts_new_trigger() {
        let mut machine = AnimationMachine::default();
        machine.trigger(AnimationState::Reloading);
        machine.advance(&InputFrame::default(), 2.0);
        assert_eq!(machine.state, AnimationState::Idle);
        assert!(machine.trigger(AnimationState::Firing));
    }
}

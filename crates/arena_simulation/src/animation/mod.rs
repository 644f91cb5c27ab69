//! Animation domain
//!
//! - AnimationState: имена клипов + приоритеты
//! - AnimationMachine: one-shot таймеры, fallback на locomotion
//! - update_player_animation: FixedUpdate system

pub mod machine;
pub mod state;
pub mod systems;

pub use machine::AnimationMachine;
pub use state::AnimationState;
pub use systems::update_player_animation;

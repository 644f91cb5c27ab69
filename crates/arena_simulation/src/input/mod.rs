//! Input domain
//!
//! ```text
//! Host (keyboard/pointer/gamepad)
//!     ↓ writes
//! RawInput (resource) - hardware.rs
//!     ↓ aggregate_player_input (FixedUpdate)
//! InputAggregator (bindings, deadzones) - aggregator.rs
//!     ↓
//! InputFrame + InputTriggers (components) - aggregator.rs / edge.rs
//! ```

pub mod aggregator;
pub mod bindings;
pub mod edge;
pub mod hardware;
pub mod systems;


pub use aggregator::{
    apply_curve, apply_deadzone, InputAggregator, InputFrame, Primitive, STICK_DEADZONE,
    TRIGGER_DEADZONE,
};
pub use bindings::{ControlBinding, ControlBindings};
pub use edge::{EdgeDetector, InputTriggers};
pub use hardware::{GamepadButton, GamepadState, KeyboardState, RawInput};
pub use systems::aggregate_player_input;

//! Control bindings: action name → keyboard keys + gamepad index
//!
//! Movement actions биндят *ось* геймпада, остальные actions биндят *кнопку*.
//! Сохранённые bindings мержатся поверх defaults по action: новый default
//! action не ломает старые settings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FORWARD: &str = "forward";
pub const BACKWARD: &str = "backward";
pub const LEFT: &str = "left";
pub const RIGHT: &str = "right";
pub const JUMP: &str = "jump";
pub const SPRINT: &str = "sprint";
pub const PRIMARY_ACTION: &str = "primaryAction";
pub const RELOAD: &str = "reload";

/// Virtual keys, резолвятся до сравнения с raw клавишами
pub const VIRTUAL_SPACE: &str = "Space";
pub const VIRTUAL_SHIFT: &str = "Shift";
pub const VIRTUAL_CLICK: &str = "click";

/// Binding одного action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ControlBinding {
    #[serde(default)]
    pub keyboard: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamepad: Option<u32>,
}

impl ControlBinding {
    pub fn new(keys: &[&str], gamepad: Option<u32>) -> Self {
        Self {
            keyboard: keys.iter().map(|key| key.to_string()).collect(),
            gamepad,
        }
    }
}

/// Full bindings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ControlBinding>",
    into = "BTreeMap<String, ControlBinding>"
)]
pub struct ControlBindings {
    actions: BTreeMap<String, ControlBinding>,
}

impl Default for ControlBindings {
    fn default() -> Self {
        let actions = [
            (FORWARD, ControlBinding::new(&["ArrowUp", "w", "W"], Some(1))),
            (BACKWARD, ControlBinding::new(&["ArrowDown", "s", "S"], Some(1))),
            (LEFT, ControlBinding::new(&["ArrowLeft", "a", "A"], Some(0))),
            (RIGHT, ControlBinding::new(&["ArrowRight", "d", "D"], Some(0))),
            (JUMP, ControlBinding::new(&[VIRTUAL_SPACE], Some(0))),
            (SPRINT, ControlBinding::new(&[VIRTUAL_SHIFT], Some(10))),
            (PRIMARY_ACTION, ControlBinding::new(&[VIRTUAL_CLICK], Some(7))),
            (RELOAD, ControlBinding::new(&["r", "R"], Some(2))),
        ]
        .into_iter()
        .map(|(action, binding)| (action.to_string(), binding))
        .collect();

        Self { actions }
    }
}

impl From<BTreeMap<String, ControlBinding>> for ControlBindings {
    fn from(stored: BTreeMap<String, ControlBinding>) -> Self {
        let mut bindings = Self::default();
        bindings.actions.extend(stored);
        bindings
    }
}

impl From<ControlBindings> for BTreeMap<String, ControlBinding> {
    fn from(bindings: ControlBindings) -> Self {
        bindings.actions
    }
}

impl ControlBindings {
    pub fn get(&self, action: &str) -> Option<&ControlBinding> {
        self.actions.get(action)
    }

    /// Rebind (или добавить) action
    pub fn set(&mut self, action: &str, binding: ControlBinding) {
        self.actions.insert(action.to_string(), binding);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ControlBinding)> {
        self.actions.iter().map(|(action, binding)| (action.as_str(), binding))
    }
}

/// Gamepad index, если у action нет gamepad entry
pub fn default_gamepad_index(action: &str) -> Option<u32> {
    match action {
        FORWARD | BACKWARD => Some(1),
        LEFT | RIGHT => Some(0),
        JUMP => Some(0),
        SPRINT => Some(10),
        PRIMARY_ACTION => Some(7),
        RELOAD => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = ControlBindings::default();
        assert_eq!(bindings.get(JUMP).unwrap().keyboard, vec!["Space".to_string()]);
        assert_eq!(bindings.get(SPRINT).unwrap().gamepad, Some(10));
        assert_eq!(bindings.get(PRIMARY_ACTION).unwrap().gamepad, Some(7));
        assert_eq!(bindings.iter().count(), 8);
    }

    #[test]
    fn test_stored_bindings_merge_per_action() {
        let json = r#"{ "reload": { "keyboard": ["t"] }, "melee": { "keyboard": ["v"], "gamepad": 3 } }"#;
        let bindings: ControlBindings = serde_json::from_str(json).unwrap();

        assert_eq!(bindings.get(RELOAD).unwrap().keyboard, vec!["t".to_string()]);
        assert_eq!(bindings.get(RELOAD).unwrap().gamepad, None);
        assert_eq!(bindings.get("melee").unwrap().gamepad, Some(3));
        // остальные actions остаются default
        assert_eq!(bindings.get(FORWARD), ControlBindings::default().get(FORWARD));
    }
}

//! Built-in arena collider backend
//!
//! Капсула в коробке 50×50: плоский пол, 4 axis-aligned стены.
//! Стены клампят по оси (по другой оси скольжение продолжается), пол
//! останавливает падение, grounded капсула прилипает к полу в пределах snap
//! distance (ступенек тут нет, но правило то же, что `snap_to_ground` у rapier).

use bevy::prelude::*;

use super::CharacterPhysics;
use crate::config::{ArenaSettings, MotionTuning};

/// Статичная геометрия арены в координатах центра капсулы
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    /// Лимит |x| и |z| для центра капсулы
    pub horizontal_limit: f32,
    /// Высота центра капсулы стоя на полу
    pub rest_height: f32,
    pub snap_distance: f32,
}

impl ArenaBounds {
    pub fn new(arena: &ArenaSettings, motion: &MotionTuning) -> Self {
        let inner_face = arena.half_extent - arena.wall_half_thickness;
        Self {
            horizontal_limit: (inner_face - motion.capsule_radius).max(0.0),
            rest_height: arena.floor_y + motion.capsule_half_height + motion.capsule_radius,
            snap_distance: motion.snap_to_ground,
        }
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.x.abs() <= self.horizontal_limit
            && position.z.abs() <= self.horizontal_limit
            && position.y >= self.rest_height
    }
}

/// Контакт персонажа, которого двигает arena backend
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ArenaBody {
    pub grounded: bool,
}

/// Borrowed view на один тик solver'а
pub struct ArenaCharacter<'a> {
    pub bounds: &'a ArenaBounds,
    pub transform: &'a mut Transform,
    pub body: &'a mut ArenaBody,
}

impl CharacterPhysics for ArenaCharacter<'_> {
    fn grounded(&self) -> bool {
        self.body.grounded
    }

    fn move_by(&mut self, desired: Vec3) -> Vec3 {
        let start = self.transform.translation;
        let limit = self.bounds.horizontal_limit;
        let rest = self.bounds.rest_height;

        let mut target = start + desired;
        target.x = target.x.clamp(-limit, limit);
        target.z = target.z.clamp(-limit, limit);

        let snap = self.body.grounded
            && desired.y <= 0.0
            && target.y - rest <= self.bounds.snap_distance;

        if target.y <= rest || snap {
            target.y = rest;
            self.body.grounded = true;
        } else {
            self.body.grounded = false;
        }

        self.transform.translation = target;
        target - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> ArenaBounds {
        ArenaBounds::new(&ArenaSettings::default(), &MotionTuning::default())
    }

    #[test]
    fn test_bounds_from_defaults() {
        let bounds = bounds();
        // грань стены на 24, радиус капсулы 0.5
        assert_eq!(bounds.horizontal_limit, 23.5);
        assert_eq!(bounds.rest_height, 1.5);
        assert!(bounds.contains(Vec3::new(0.0, 7.0, 10.0)));
        assert!(!bounds.contains(Vec3::new(30.0, 7.0, 0.0)));
    }

    #[test]
    fn test_wall_clamps_one_axis_and_keeps_sliding() {
        let bounds = bounds();
        let mut transform = Transform::from_xyz(23.4, 1.5, 0.0);
        let mut body = ArenaBody { grounded: true };
        let mut character = ArenaCharacter {
            bounds: &bounds,
            transform: &mut transform,
            body: &mut body,
        };

        let moved = character.move_by(Vec3::new(0.5, 0.0, 0.3));
        assert!((moved.x - 0.1).abs() < 1e-5);
        assert!((moved.z - 0.3).abs() < 1e-5);
        assert!(character.grounded());
    }

    #[test]
    fn test_floor_stops_fall() {
        let bounds = bounds();
        let mut transform = Transform::from_xyz(0.0, 1.6, 0.0);
        let mut body = ArenaBody::default();
        let mut character = ArenaCharacter {
            bounds: &bounds,
            transform: &mut transform,
            body: &mut body,
        };

        let moved = character.move_by(Vec3::new(0.0, -1.0, 0.0));
        assert!((moved.y + 0.1).abs() < 1e-5);
        assert!(character.grounded());
        assert_eq!(transform.translation.y, 1.5);
    }

    #[test]
    fn test_snap_only_when_already_grounded() {
        let bounds = bounds();

        // в воздухе на 1.55, вниз на 0.01 → всё ещё в воздухе
        let mut transform = Transform::from_xyz(0.0, 1.56, 0.0);
        let mut body = ArenaBody::default();
        ArenaCharacter { bounds: &bounds, transform: &mut transform, body: &mut body }
            .move_by(Vec3::new(0.0, -0.01, 0.0));
        assert!(!body.grounded);

        // grounded, маленький дрейф вверх не снапается (прыжок должен оторваться)
        let mut transform = Transform::from_xyz(0.0, 1.5, 0.0);
        let mut body = ArenaBody { grounded: true };
        ArenaCharacter { bounds: &bounds, transform: &mut transform, body: &mut body }
            .move_by(Vec3::new(0.0, 0.05, 0.0));
        assert!(!body.grounded);
        assert!((transform.translation.y - 1.55).abs() < 1e-5);
    }
}

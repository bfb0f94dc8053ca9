//! Straight-line projectiles: player bullets and enemy fireballs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::{BULLET_SIZE, FIREBALL_SIZE};
use crate::direction_to;

/// Who fired it. Obstacles react differently to each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Player shot: breaks tables and baskets
    Bullet,
    /// Enemy shot: absorbed by obstacles without breaking them
    Fireball,
}

/// A projectile travelling at constant velocity until it leaves the field or hits something
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    active: bool,
}

impl Projectile {
    /// Fire from `start` toward `target`. Aiming at the start point yields a
    /// stationary projectile that still expires when something absorbs it.
    pub fn new(kind: ProjectileKind, start: Vec2, target: Vec2, speed: f32, damage: f32) -> Self {
        Self {
            kind,
            pos: start,
            vel: direction_to(start, target) * speed,
            damage,
            active: true,
        }
    }

    pub fn bullet(start: Vec2, target: Vec2, speed: f32, damage: f32) -> Self {
        Self::new(ProjectileKind::Bullet, start, target, speed, damage)
    }

    pub fn fireball(start: Vec2, target: Vec2, speed: f32, damage: f32) -> Self {
        Self::new(ProjectileKind::Fireball, start, target, speed, damage)
    }

    /// Move one frame; leaving the play-field deactivates the projectile
    pub fn advance(&mut self, field: &Aabb) {
        if !self.active {
            return;
        }
        self.pos += self.vel;
        if !field.contains_point(self.pos) {
            self.active = false;
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        let size = match self.kind {
            ProjectileKind::Bullet => BULLET_SIZE,
            ProjectileKind::Fireball => FIREBALL_SIZE,
        };
        Aabb::centered(self.pos, size)
    }

    /// True only while active and overlapping `other`. The caller decides
    /// whether the hit consumes the projectile.
    pub fn collides_with(&self, other: &Aabb) -> bool {
        self.active && self.bounding_box().intersects(other)
    }

    /// One-way: a spent projectile never comes back
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Aabb {
        Aabb::new(Vec2::ZERO, Vec2::new(1024.0, 768.0))
    }

    #[test]
    fn test_advance_moves_by_velocity() {
        let mut p = Projectile::bullet(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0), 5.0, 3.0);
        p.advance(&field());
        assert!((p.pos - Vec2::new(105.0, 100.0)).length() < 1e-4);
        assert!(p.is_active());
    }

    #[test]
    fn test_deactivates_past_field_width() {
        let mut p = Projectile::bullet(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0), 5.0, 3.0);
        let mut frames = 0;
        while p.is_active() {
            p.advance(&field());
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(p.pos.x > 1024.0);
        // Frozen once spent
        let pos = p.pos;
        p.advance(&field());
        assert_eq!(p.pos, pos);
    }

    #[test]
    fn test_inactive_projectile_never_collides() {
        let mut p = Projectile::fireball(Vec2::new(50.0, 50.0), Vec2::new(60.0, 50.0), 3.0, 5.0);
        let target = Aabb::centered(Vec2::new(50.0, 50.0), Vec2::new(30.0, 30.0));
        assert!(p.collides_with(&target));
        p.deactivate();
        assert!(!p.collides_with(&target));
    }

    #[test]
    fn test_zero_length_aim() {
        let p = Projectile::bullet(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0), 5.0, 3.0);
        assert_eq!(p.vel, Vec2::ZERO);
    }
}

//! Static level geometry: walls, breakable furniture and rivers
//!
//! | Obstacle      | Player contact        | Bullet             | Fireball           |
//! |---------------|-----------------------|--------------------|--------------------|
//! | Wall          | revert move           | absorbed           | absorbed           |
//! | Table/Basket  | revert move           | absorbed, breaks   | absorbed           |
//! | River         | damage every frame    | passes             | passes             |

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::player::{DamageSource, Player};
use super::projectile::{Projectile, ProjectileKind};
use crate::consts::{BASKET_SIZE, RIVER_SIZE, TABLE_SIZE, WALL_SIZE};

/// Indestructible wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Vec2,
}

impl Wall {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, WALL_SIZE)
    }

    /// Push the player back out if they walked into the wall
    pub fn update(&self, player: &mut Player) {
        if self.bounding_box().intersects(&player.bounding_box()) {
            player.revert_move();
        }
    }

    /// Any projectile that touches a wall is spent
    pub fn absorb(&self, projectile: &mut Projectile) -> bool {
        if projectile.collides_with(&self.bounding_box()) {
            projectile.deactivate();
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakableKind {
    Table,
    Basket,
}

/// Furniture that blocks the player until a bullet breaks it.
///
/// A broken piece stays in storage as a tombstone and is skipped by every
/// update, draw and collision pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakable {
    pub kind: BreakableKind,
    pub pos: Vec2,
    active: bool,
}

impl Breakable {
    pub fn new(kind: BreakableKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            active: true,
        }
    }

    pub fn table(pos: Vec2) -> Self {
        Self::new(BreakableKind::Table, pos)
    }

    pub fn basket(pos: Vec2) -> Self {
        Self::new(BreakableKind::Basket, pos)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bounding_box(&self) -> Aabb {
        let size = match self.kind {
            BreakableKind::Table => TABLE_SIZE,
            BreakableKind::Basket => BASKET_SIZE,
        };
        Aabb::centered(self.pos, size)
    }

    pub fn update(&self, player: &mut Player) {
        if self.active && self.bounding_box().intersects(&player.bounding_box()) {
            player.revert_move();
        }
    }

    /// Resolve a projectile hit. Bullets break the piece; fireballs are
    /// swallowed and leave it standing. Either way the projectile is spent.
    pub fn absorb(&mut self, projectile: &mut Projectile) -> bool {
        if !self.active || !projectile.collides_with(&self.bounding_box()) {
            return false;
        }
        projectile.deactivate();
        if projectile.kind == ProjectileKind::Bullet {
            self.active = false;
        }
        true
    }
}

/// Hazard tile that hurts the player every frame they stand in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct River {
    pub pos: Vec2,
}

impl River {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, RIVER_SIZE)
    }

    /// Returns true if this frame's damage killed the player
    pub fn update(&self, player: &mut Player, damage: f32) -> bool {
        if self.bounding_box().intersects(&player.bounding_box()) {
            return player.receive_damage(DamageSource::River, damage);
        }
        false
    }
}

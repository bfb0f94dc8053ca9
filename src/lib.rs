//! Shadow Dungeon - a top-down dungeon shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped combat and room-state engine (collisions, doors, rooms)
//! - `config`: Key-value layout/properties store read once at startup
//! - `tuning`: Data-driven game balance
//! - `render`: Draw list and stats queries for an external renderer

pub mod config;
pub mod render;
pub mod sim;
pub mod tuning;

pub use config::{ConfigError, GameProps};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default play-field dimensions (overridden by `window.width`/`window.height`)
    pub const DEFAULT_FIELD_WIDTH: f32 = 1024.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 768.0;

    /// Sprite footprints. Bounding boxes are centered on the entity position.
    pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 52.0);
    pub const BULLET_SIZE: Vec2 = Vec2::new(12.0, 12.0);
    pub const FIREBALL_SIZE: Vec2 = Vec2::new(20.0, 20.0);
    pub const WALL_SIZE: Vec2 = Vec2::new(48.0, 48.0);
    pub const TABLE_SIZE: Vec2 = Vec2::new(64.0, 40.0);
    pub const BASKET_SIZE: Vec2 = Vec2::new(36.0, 36.0);
    pub const RIVER_SIZE: Vec2 = Vec2::new(48.0, 48.0);
    pub const DOOR_SIZE: Vec2 = Vec2::new(48.0, 64.0);
    pub const ENEMY_SIZE: Vec2 = Vec2::new(40.0, 48.0);
    pub const ELITE_SIZE: Vec2 = Vec2::new(48.0, 56.0);
    pub const PATROL_SIZE: Vec2 = Vec2::new(40.0, 48.0);
    pub const KEY_SIZE: Vec2 = Vec2::new(24.0, 24.0);
    pub const CHEST_SIZE: Vec2 = Vec2::new(48.0, 40.0);
    pub const RESTART_AREA_SIZE: Vec2 = Vec2::new(96.0, 96.0);

    /// Frames between roaming enemy heading changes
    pub const ROAM_TURN_FRAMES: u32 = 90;
    /// Roaming enemies never drift further than this from their spawn point
    pub const ROAM_LEASH_RADIUS: f32 = 80.0;
}

/// Unit direction from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

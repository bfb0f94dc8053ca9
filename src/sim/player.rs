//! The player character
//!
//! Solid-body collision works by rollback: every successful move records the
//! previous position, and any blocking obstacle or locked door that finds
//! the player overlapping it calls [`Player::revert_move`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::projectile::Projectile;
use super::tick::TickInput;
use crate::consts::PLAYER_SIZE;
use crate::tuning::Tuning;

/// Character picked in the prep room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterKind {
    /// Nothing picked yet; cannot shoot
    #[default]
    None,
    /// Earns extra coins on every coin credit
    Robot,
    /// Immune to river damage
    Marine,
}

/// Weapon upgrade tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum WeaponTier {
    #[default]
    Standard,
    Advanced,
    Elite,
}

impl WeaponTier {
    pub fn index(self) -> usize {
        match self {
            WeaponTier::Standard => 0,
            WeaponTier::Advanced => 1,
            WeaponTier::Elite => 2,
        }
    }

    /// The next tier up, `None` at the top
    pub fn next(self) -> Option<Self> {
        match self {
            WeaponTier::Standard => Some(WeaponTier::Advanced),
            WeaponTier::Advanced => Some(WeaponTier::Elite),
            WeaponTier::Elite => None,
        }
    }
}

/// What hurt the player; immunities are decided per source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Contact,
    Fireball,
    River,
}

/// Snapshot for HUD rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: f32,
    pub coins: u32,
    pub keys: u32,
    pub weapon_tier: WeaponTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub health: f32,
    pub coins: u32,
    pub keys: u32,
    pub weapon: WeaponTier,
    pub character: CharacterKind,
    pub facing_left: bool,
    /// Frames until the next shot is allowed
    pub shoot_cooldown: u32,
    /// Bullets in flight (owned until they go inactive)
    pub bullets: Vec<Projectile>,
}

impl Player {
    pub fn new(start: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: start,
            prev_pos: start,
            health: tuning.initial_health,
            coins: 0,
            keys: 0,
            weapon: WeaponTier::Standard,
            character: CharacterKind::None,
            facing_left: false,
            shoot_cooldown: 0,
            bullets: Vec::new(),
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, PLAYER_SIZE)
    }

    /// Move, remembering where we came from
    pub fn move_to(&mut self, pos: Vec2) {
        self.prev_pos = self.pos;
        self.pos = pos;
    }

    /// Teleport (room changes, death). Leaves nothing to roll back to.
    pub fn place_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Undo the last move. Idempotent, so several blockers in one frame agree.
    pub fn revert_move(&mut self) {
        self.pos = self.prev_pos;
    }

    /// Movement, aiming, shooting and bullet flight for one frame
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) {
        let field = tuning.field_bounds();

        let target = self.pos + input.movement() * tuning.moving_speed;
        self.facing_left = input.cursor.x < target.x;
        if Aabb::centered(target, PLAYER_SIZE).is_inside(&field) {
            self.move_to(target);
        }

        if self.character != CharacterKind::None {
            self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
            if input.shoot && self.shoot_cooldown == 0 {
                self.bullets.push(Projectile::bullet(
                    self.pos,
                    input.cursor,
                    tuning.bullet_speed,
                    tuning.weapon_damage(self.weapon),
                ));
                self.shoot_cooldown = tuning.bullet_frequency;
            }
        }

        for bullet in &mut self.bullets {
            bullet.advance(&field);
        }
        self.bullets.retain(Projectile::is_active);
    }

    pub fn select_character(&mut self, character: CharacterKind) {
        self.character = character;
    }

    /// Credit coins; the Robot gets a bonus on every credit
    pub fn earn_coins(&mut self, amount: u32, tuning: &Tuning) {
        let bonus = if self.character == CharacterKind::Robot {
            tuning.robot_extra_coin
        } else {
            0
        };
        self.coins = self.coins.saturating_add(amount).saturating_add(bonus);
    }

    /// Pay `cost` coins if affordable
    pub fn spend_coins(&mut self, cost: u32) -> bool {
        match self.coins.checked_sub(cost) {
            Some(rest) => {
                self.coins = rest;
                true
            }
            None => false,
        }
    }

    pub fn add_key(&mut self) {
        self.keys = self.keys.saturating_add(1);
    }

    /// Consume one key if the player holds any
    pub fn use_key(&mut self) -> bool {
        match self.keys.checked_sub(1) {
            Some(rest) => {
                self.keys = rest;
                true
            }
            None => false,
        }
    }

    pub fn upgrade_weapon(&mut self, tuning: &Tuning) -> bool {
        let Some(next) = self.weapon.next() else {
            return false;
        };
        if !self.spend_coins(tuning.weapon_cost) {
            return false;
        }
        self.weapon = next;
        true
    }

    pub fn purchase_health(&mut self, tuning: &Tuning) -> bool {
        if !self.spend_coins(tuning.health_purchase) {
            return false;
        }
        self.health += tuning.health_purchase as f32;
        true
    }

    /// Apply damage. Returns true exactly once: on the hit that takes health to zero.
    pub fn receive_damage(&mut self, source: DamageSource, amount: f32) -> bool {
        if source == DamageSource::River && self.character == CharacterKind::Marine {
            return false;
        }
        if self.is_dead() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats {
            health: self.health,
            coins: self.coins,
            keys: self.keys,
            weapon_tier: self.weapon,
        }
    }
}

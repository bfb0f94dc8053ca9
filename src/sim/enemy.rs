//! Enemies: roaming shooters, their elite variant and key-carrying patrols
//!
//! All three share one combat record and differ only in stats, movement
//! policy and what they leave behind when they die.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::player::{DamageSource, Player};
use super::projectile::Projectile;
use crate::consts::{ELITE_SIZE, ENEMY_SIZE, PATROL_SIZE, ROAM_LEASH_RADIUS, ROAM_TURN_FRAMES};
use crate::direction_to;
use crate::tuning::{EnemyTuning, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Roaming,
    Elite,
    Patrol,
}

/// How an enemy gets around
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Movement {
    /// Random heading, re-rolled every few seconds, tethered to `home`
    Wander {
        home: Vec2,
        heading: Vec2,
        turn_timer: u32,
    },
    /// Closed loop of waypoints
    Waypoints { path: Vec<Vec2>, target: usize },
}

/// Health and life-cycle flags. `dead` implies `health <= 0` and `!active`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub health: f32,
    active: bool,
    dead: bool,
}

impl CombatState {
    fn new(health: f32) -> Self {
        Self {
            health,
            active: false,
            dead: false,
        }
    }
}

/// Result of testing a projectile against an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Miss,
    Damaged,
    /// This hit was the killing blow. Reported once per enemy.
    Killed,
}

/// What a dead enemy leaves for the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathReward {
    Coins(u32),
    /// Spawn a key at this position
    Key(Vec2),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub combat: CombatState,
    pub movement: Movement,
    pub stats: EnemyTuning,
    pub fire_cooldown: u32,
    /// Fireballs in flight, owned until they go inactive
    pub fireballs: Vec<Projectile>,
}

impl Enemy {
    fn with_movement(kind: EnemyKind, pos: Vec2, movement: Movement, stats: EnemyTuning) -> Self {
        Self {
            kind,
            pos,
            combat: CombatState::new(stats.health),
            movement,
            stats,
            fire_cooldown: stats.shoot_frequency,
            fireballs: Vec::new(),
        }
    }

    fn wanderer(kind: EnemyKind, pos: Vec2, stats: EnemyTuning) -> Self {
        let movement = Movement::Wander {
            home: pos,
            heading: Vec2::ZERO,
            turn_timer: 0,
        };
        Self::with_movement(kind, pos, movement, stats)
    }

    pub fn roaming(pos: Vec2, tuning: &Tuning) -> Self {
        Self::wanderer(EnemyKind::Roaming, pos, tuning.roaming)
    }

    pub fn elite(pos: Vec2, tuning: &Tuning) -> Self {
        Self::wanderer(EnemyKind::Elite, pos, tuning.elite)
    }

    /// Patrol starting on the first waypoint and heading for the second.
    /// An empty path yields no enemy.
    pub fn patrol(path: Vec<Vec2>, tuning: &Tuning) -> Option<Self> {
        let start = *path.first()?;
        let target = 1 % path.len();
        Some(Self::with_movement(
            EnemyKind::Patrol,
            start,
            Movement::Waypoints { path, target },
            tuning.patrol,
        ))
    }

    pub fn bounding_box(&self) -> Aabb {
        let size = match self.kind {
            EnemyKind::Roaming => ENEMY_SIZE,
            EnemyKind::Elite => ELITE_SIZE,
            EnemyKind::Patrol => PATROL_SIZE,
        };
        Aabb::centered(self.pos, size)
    }

    pub fn is_active(&self) -> bool {
        self.combat.active
    }

    pub fn is_dead(&self) -> bool {
        self.combat.dead
    }

    pub fn health(&self) -> f32 {
        self.combat.health
    }

    /// Alive and armed: takes part in update, draw and collisions
    pub fn is_combatant(&self) -> bool {
        self.combat.active && !self.combat.dead
    }

    /// Arm the enemy. The dead stay dead.
    pub fn activate(&mut self) {
        if !self.combat.dead {
            self.combat.active = true;
        }
    }

    /// One frame of contact damage, movement, shooting and fireball flight.
    /// Returns true if this frame killed the player.
    pub fn update(&mut self, player: &mut Player, tuning: &Tuning, rng: &mut Pcg32) -> bool {
        if !self.is_combatant() {
            return false;
        }
        let mut killed_player = false;

        if self.stats.contact_damage > 0.0 && self.bounding_box().intersects(&player.bounding_box()) {
            killed_player |= player.receive_damage(DamageSource::Contact, self.stats.contact_damage);
        }

        self.step_movement(tuning, rng);

        if self.stats.shoot_frequency > 0 {
            self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
            if self.fire_cooldown == 0 {
                self.fireballs.push(Projectile::fireball(
                    self.pos,
                    player.pos,
                    tuning.fireball_speed,
                    tuning.fireball_damage,
                ));
                self.fire_cooldown = self.stats.shoot_frequency;
            }
        }

        let field = tuning.field_bounds();
        let player_box = player.bounding_box();
        for fireball in &mut self.fireballs {
            fireball.advance(&field);
            if fireball.collides_with(&player_box) {
                fireball.deactivate();
                killed_player |= player.receive_damage(DamageSource::Fireball, fireball.damage);
            }
        }
        self.fireballs.retain(Projectile::is_active);

        killed_player
    }

    fn step_movement(&mut self, tuning: &Tuning, rng: &mut Pcg32) {
        let speed = self.stats.speed;
        match &mut self.movement {
            Movement::Waypoints { path, target } => {
                let goal = path[*target];
                let to_goal = goal - self.pos;
                if to_goal.length() < speed {
                    self.pos = goal;
                    *target = (*target + 1) % path.len();
                } else {
                    self.pos += to_goal.normalize_or_zero() * speed;
                }
            }
            Movement::Wander {
                home,
                heading,
                turn_timer,
            } => {
                if *turn_timer == 0 {
                    let angle = rng.random_range(0.0..std::f32::consts::TAU);
                    *heading = Vec2::new(angle.cos(), angle.sin());
                    *turn_timer = ROAM_TURN_FRAMES;
                }
                *turn_timer -= 1;

                let mut next = self.pos + *heading * speed;
                if next.distance(*home) > ROAM_LEASH_RADIUS {
                    *heading = direction_to(self.pos, *home);
                    next = self.pos + *heading * speed;
                }
                let size = match self.kind {
                    EnemyKind::Elite => ELITE_SIZE,
                    _ => ENEMY_SIZE,
                };
                if Aabb::centered(next, size).is_inside(&tuning.field_bounds()) {
                    self.pos = next;
                } else {
                    *heading = -*heading;
                }
            }
        }
    }

    /// Test a projectile against this enemy. A hit always spends the
    /// projectile; the transition to dead is reported exactly once.
    pub fn take_hit(&mut self, projectile: &mut Projectile) -> HitOutcome {
        if !self.is_combatant() || !projectile.collides_with(&self.bounding_box()) {
            return HitOutcome::Miss;
        }
        projectile.deactivate();
        self.combat.health -= projectile.damage;
        if self.combat.health > 0.0 {
            return HitOutcome::Damaged;
        }
        self.combat.dead = true;
        self.combat.active = false;
        self.fireballs.clear();
        HitOutcome::Killed
    }

    pub fn death_reward(&self) -> DeathReward {
        match self.kind {
            EnemyKind::Patrol => DeathReward::Key(self.pos),
            EnemyKind::Roaming | EnemyKind::Elite => DeathReward::Coins(self.stats.coin_reward),
        }
    }
}

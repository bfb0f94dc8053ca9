//! Data-driven game balance
//!
//! Every numeric knob the simulation reads lives here, loaded once from the
//! property store before the first frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{GameProps, Result};
use crate::consts::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
use crate::sim::Aabb;

/// Per-enemy-type stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub health: f32,
    /// Movement per frame (waypoint step for patrols, wander speed otherwise)
    pub speed: f32,
    /// Coins credited on death (patrols drop a key instead)
    pub coin_reward: u32,
    /// Frames between fireballs (0 = never fires)
    pub shoot_frequency: u32,
    /// Damage per frame while overlapping the player
    pub contact_damage: f32,
}

/// All balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub player_start: Vec2,
    pub moving_speed: f32,
    pub initial_health: f32,
    pub bullet_speed: f32,
    /// Frames between player shots
    pub bullet_frequency: u32,
    /// Bullet damage for the Standard / Advanced / Elite weapon tiers
    pub weapon_damage: [f32; 3],
    pub robot_extra_coin: u32,
    pub weapon_cost: u32,
    /// Both the coin cost and the health gained
    pub health_purchase: u32,
    pub river_damage: f32,
    pub fireball_speed: f32,
    pub fireball_damage: f32,
    pub roaming: EnemyTuning,
    pub elite: EnemyTuning,
    pub patrol: EnemyTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            player_start: Vec2::new(DEFAULT_FIELD_WIDTH / 2.0, DEFAULT_FIELD_HEIGHT / 2.0),
            moving_speed: 3.0,
            initial_health: 100.0,
            bullet_speed: 5.0,
            bullet_frequency: 15,
            weapon_damage: [3.0, 5.0, 8.0],
            robot_extra_coin: 5,
            weapon_cost: 50,
            health_purchase: 20,
            river_damage: 0.3,
            fireball_speed: 3.0,
            fireball_damage: 5.0,
            roaming: EnemyTuning {
                health: 6.0,
                speed: 0.8,
                coin_reward: 10,
                shoot_frequency: 120,
                contact_damage: 0.5,
            },
            elite: EnemyTuning {
                health: 15.0,
                speed: 1.0,
                coin_reward: 25,
                shoot_frequency: 80,
                contact_damage: 0.8,
            },
            patrol: EnemyTuning {
                health: 10.0,
                speed: 2.0,
                coin_reward: 0,
                shoot_frequency: 0,
                contact_damage: 0.2,
            },
        }
    }
}

impl Tuning {
    /// Read every balance value. Missing or malformed values are fatal.
    pub fn from_props(props: &GameProps) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            field_width: props.f32("window.width")?,
            field_height: props.f32("window.height")?,
            player_start: props.point("player.start")?,
            moving_speed: props.f32("movingSpeed")?,
            initial_health: props.f32("initialHealth")?,
            bullet_speed: props.f32("bulletSpeed")?,
            bullet_frequency: props.u32("bulletfreq")?,
            weapon_damage: [
                props.f32("weaponStandardDamage")?,
                props.f32("weaponAdvanceDamage")?,
                props.f32("weaponEliteDamage")?,
            ],
            robot_extra_coin: props.u32("robotExtraCoin")?,
            weapon_cost: props.u32("weaponPurchase")?,
            health_purchase: props.u32("healthPurchase")?,
            river_damage: props.f32("riverDamagePerFrame")?,
            fireball_speed: props.f32("fireballSpeed")?,
            fireball_damage: props.f32("fireballDamage")?,
            roaming: EnemyTuning {
                health: props.f32("bulletKinHealth")?,
                speed: props.f32_or("bulletKinSpeed", defaults.roaming.speed)?,
                coin_reward: props.u32("bulletKinCoin")?,
                shoot_frequency: props.u32("bulletKinShootFreq")?,
                contact_damage: props
                    .f32_or("bulletKinContactDamage", defaults.roaming.contact_damage)?,
            },
            elite: EnemyTuning {
                health: props.f32("ashenBulletKinHealth")?,
                speed: props.f32_or("ashenBulletKinSpeed", defaults.elite.speed)?,
                coin_reward: props.u32("ashenBulletKinCoin")?,
                shoot_frequency: props.u32("ashenBulletKinShootFreq")?,
                contact_damage: props
                    .f32_or("ashenBulletKinContactDamage", defaults.elite.contact_damage)?,
            },
            patrol: EnemyTuning {
                health: props.f32("keyBulletKinHealth")?,
                speed: props.f32("keyBulletKinSpeed")?,
                coin_reward: 0,
                shoot_frequency: 0,
                contact_damage: props
                    .f32_or("keyBulletKinContactDamage", defaults.patrol.contact_damage)?,
            },
        })
    }

    /// The play-field rectangle, origin at the top-left corner
    pub fn field_bounds(&self) -> Aabb {
        Aabb::new(Vec2::ZERO, Vec2::new(self.field_width, self.field_height))
    }

    /// Damage dealt by a bullet from the given weapon tier
    pub fn weapon_damage(&self, tier: crate::sim::WeaponTier) -> f32 {
        self.weapon_damage[tier.index()]
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_PROPERTIES: &str = include_str!("../res/app.properties");

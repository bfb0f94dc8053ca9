//! Things the player touches to use: dropped keys, chests, restart pads

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::player::Player;
use crate::consts::{CHEST_SIZE, KEY_SIZE, RESTART_AREA_SIZE};
use crate::tuning::Tuning;

/// Key dropped where a patrol enemy died
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pub pos: Vec2,
    active: bool,
}

impl Key {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, active: true }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, KEY_SIZE)
    }

    /// Returns true on the frame the key is picked up
    pub fn update(&mut self, player: &mut Player) -> bool {
        if self.active && self.bounding_box().intersects(&player.bounding_box()) {
            player.add_key();
            self.active = false;
            return true;
        }
        false
    }
}

/// Chest opened with a key for a fixed coin payout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasureBox {
    pub pos: Vec2,
    pub coins: u32,
    active: bool,
}

impl TreasureBox {
    pub fn new(pos: Vec2, coins: u32) -> Self {
        Self {
            pos,
            coins,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, CHEST_SIZE)
    }

    /// Try to open. Without a key, or out of reach, nothing changes.
    pub fn update(&mut self, player: &mut Player, interact: bool, tuning: &Tuning) -> bool {
        if !self.active || !interact || !self.bounding_box().intersects(&player.bounding_box()) {
            return false;
        }
        if !player.use_key() {
            return false;
        }
        player.earn_coins(self.coins, tuning);
        self.active = false;
        true
    }
}

/// Pad that restarts the game when the restart key is pressed on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestartArea {
    pub pos: Vec2,
}

impl RestartArea {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, RESTART_AREA_SIZE)
    }

    pub fn triggered(&self, player: &Player, restart: bool) -> bool {
        restart && self.bounding_box().intersects(&player.bounding_box())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_collected_once() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(100.0, 100.0), &tuning);
        let mut key = Key::new(Vec2::new(110.0, 100.0));
        assert!(key.update(&mut player));
        assert!(!key.update(&mut player));
        assert_eq!(player.keys, 1);
        assert!(!key.is_active());
    }

    #[test]
    fn test_chest_requires_key() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(100.0, 100.0), &tuning);
        let mut chest = TreasureBox::new(Vec2::new(100.0, 120.0), 40);

        assert!(!chest.update(&mut player, true, &tuning));
        assert!(chest.is_active());
        assert_eq!(player.keys, 0);
        assert_eq!(player.coins, 0);

        player.add_key();
        assert!(!chest.update(&mut player, false, &tuning));
        assert!(chest.update(&mut player, true, &tuning));
        assert!(!chest.is_active());
        assert_eq!(player.keys, 0);
        assert_eq!(player.coins, 40);
    }

    #[test]
    fn test_restart_area_needs_overlap_and_key() {
        let tuning = Tuning::default();
        let player = Player::new(Vec2::new(100.0, 100.0), &tuning);
        let near = RestartArea::new(Vec2::new(120.0, 100.0));
        let far = RestartArea::new(Vec2::new(600.0, 600.0));
        assert!(near.triggered(&player, true));
        assert!(!near.triggered(&player, false));
        assert!(!far.triggered(&player, true));
    }
}

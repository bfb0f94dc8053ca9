//! Doors between rooms
//!
//! ```text
//!  Locked ──(transition arrives)──▶ UnlockedJustEntered ──(player steps off)──▶ UnlockedIdle
//!    ▲                                   │                                          │
//!    └──(steps off, relock pending, ─────┘                         (player steps on: change room)
//!        owning arena not cleared)
//! ```
//!
//! A door never holds a reference to its room. It knows its owner only by
//! [`RoomId`] and the room passes its cleared flag in on every update.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::player::Player;
use super::projectile::Projectile;
use super::room::RoomId;
use crate::consts::DOOR_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorState {
    /// Behaves like a wall
    Locked,
    /// The player just arrived through this door and is still standing on it
    UnlockedJustEntered,
    /// Stepping on it changes room
    UnlockedIdle,
}

/// What happened at a door this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    None,
    /// Locked door pushed the player back
    Blocked,
    /// Player walked through; switch to this room
    Enter(RoomId),
    /// Player left the entry door of an uncleared arena; arm its defenses
    Relocked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub pos: Vec2,
    /// Destination room
    pub to: RoomId,
    /// Arena that re-arms through this door; `None` for doors that never relock
    pub owner: Option<RoomId>,
    state: DoorState,
    should_relock: bool,
}

impl Door {
    pub fn new(pos: Vec2, to: RoomId, owner: Option<RoomId>) -> Self {
        Self {
            pos,
            to,
            owner,
            state: DoorState::Locked,
            should_relock: false,
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state != DoorState::Locked
    }

    pub fn should_relock(&self) -> bool {
        self.should_relock
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::centered(self.pos, DOOR_SIZE)
    }

    /// Unlock. With `just_entered` the player is standing on the door after
    /// arriving through it, so the overlap must not send them straight back.
    /// Unlocking without it keeps a pending just-entered state intact, so an
    /// arena that clears under a player still on its entry door does not
    /// bounce them out.
    pub fn unlock(&mut self, just_entered: bool) {
        self.state = match (just_entered, self.state) {
            (true, _) => DoorState::UnlockedJustEntered,
            (false, DoorState::UnlockedJustEntered) => DoorState::UnlockedJustEntered,
            (false, _) => DoorState::UnlockedIdle,
        };
    }

    pub fn lock(&mut self) {
        self.state = DoorState::Locked;
    }

    pub fn set_should_relock(&mut self) {
        self.should_relock = true;
    }

    pub fn clear_should_relock(&mut self) {
        self.should_relock = false;
    }

    /// Run the door against the player. `owner_cleared` is the owning
    /// room's cleared flag (ignored for doors without an owner).
    pub fn update(&mut self, player: &mut Player, owner_cleared: bool) -> DoorEvent {
        if self.bounding_box().intersects(&player.bounding_box()) {
            return match self.state {
                DoorState::Locked => {
                    player.revert_move();
                    DoorEvent::Blocked
                }
                DoorState::UnlockedJustEntered => DoorEvent::None,
                DoorState::UnlockedIdle => DoorEvent::Enter(self.to),
            };
        }

        if self.state != DoorState::UnlockedJustEntered {
            return DoorEvent::None;
        }
        if self.should_relock && self.owner.is_some() && !owner_cleared {
            self.should_relock = false;
            self.state = DoorState::Locked;
            return DoorEvent::Relocked;
        }
        self.state = DoorState::UnlockedIdle;
        DoorEvent::None
    }

    /// Locked doors stop projectiles like walls; open doorways let them pass
    pub fn absorb(&self, projectile: &mut Projectile) -> bool {
        if self.state == DoorState::Locked && projectile.collides_with(&self.bounding_box()) {
            projectile.deactivate();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn setup() -> (Door, Player) {
        let door = Door::new(Vec2::new(100.0, 300.0), RoomId::Prep, Some(RoomId::ArenaA));
        let player = Player::new(Vec2::new(100.0, 300.0), &Tuning::default());
        (door, player)
    }

    #[test]
    fn test_locked_door_blocks() {
        let (mut door, mut player) = setup();
        player.place_at(Vec2::new(200.0, 300.0));
        player.move_to(Vec2::new(120.0, 300.0));
        assert_eq!(door.update(&mut player, false), DoorEvent::Blocked);
        assert_eq!(player.pos, Vec2::new(200.0, 300.0));
        assert_eq!(door.state(), DoorState::Locked);
    }

    #[test]
    fn test_just_entered_does_not_retrigger() {
        let (mut door, mut player) = setup();
        door.unlock(true);
        assert_eq!(door.update(&mut player, true), DoorEvent::None);
        assert_eq!(door.state(), DoorState::UnlockedJustEntered);

        player.place_at(Vec2::new(300.0, 300.0));
        assert_eq!(door.update(&mut player, true), DoorEvent::None);
        assert_eq!(door.state(), DoorState::UnlockedIdle);

        player.place_at(Vec2::new(100.0, 300.0));
        assert_eq!(door.update(&mut player, true), DoorEvent::Enter(RoomId::Prep));
    }

    #[test]
    fn test_relock_on_leaving_uncleared_arena_door() {
        let (mut door, mut player) = setup();
        door.set_should_relock();
        door.unlock(true);
        player.place_at(Vec2::new(300.0, 300.0));
        assert_eq!(door.update(&mut player, false), DoorEvent::Relocked);
        assert_eq!(door.state(), DoorState::Locked);
        assert!(!door.should_relock());
    }

    #[test]
    fn test_no_relock_once_cleared() {
        let (mut door, mut player) = setup();
        door.set_should_relock();
        door.unlock(true);
        player.place_at(Vec2::new(300.0, 300.0));
        assert_eq!(door.update(&mut player, true), DoorEvent::None);
        assert_eq!(door.state(), DoorState::UnlockedIdle);
    }

    #[test]
    fn test_unlock_keeps_just_entered() {
        let (mut door, _) = setup();
        door.unlock(true);
        door.unlock(false);
        assert_eq!(door.state(), DoorState::UnlockedJustEntered);

        let mut other = Door::new(Vec2::ZERO, RoomId::ArenaB, None);
        other.unlock(false);
        assert_eq!(other.state(), DoorState::UnlockedIdle);
    }

    #[test]
    fn test_only_locked_doors_absorb() {
        let (mut door, _) = setup();
        let mut bullet = Projectile::bullet(door.pos, door.pos + Vec2::X, 5.0, 3.0);
        assert!(door.absorb(&mut bullet));
        assert!(!bullet.is_active());

        door.unlock(false);
        let mut bullet = Projectile::bullet(door.pos, door.pos + Vec2::X, 5.0, 3.0);
        assert!(!door.absorb(&mut bullet));
        assert!(bullet.is_active());
    }
}

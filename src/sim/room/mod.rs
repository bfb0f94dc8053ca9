//! Room controllers
//!
//! A room owns every entity local to one area and runs that area's frame:
//! doors, static obstacles, enemies, projectile resolution, player, and the
//! clear check. A door that sends the player elsewhere suspends the rest of
//! the frame through the room's [`FrameGate`].

mod battle;
mod end;
mod prep;

pub use battle::BattleRoom;
pub use end::{EndOutcome, EndRoom};
pub use prep::PrepRoom;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::door::Door;
use super::player::Player;
use super::state::GameEvent;
use super::tick::TickInput;
use crate::config::{GameProps, Result};
use crate::tuning::Tuning;

/// The four areas of the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomId {
    Prep,
    ArenaA,
    ArenaB,
    End,
}

impl RoomId {
    pub const ALL: [RoomId; 4] = [RoomId::Prep, RoomId::ArenaA, RoomId::ArenaB, RoomId::End];

    /// Suffix used for this room's layout keys
    pub fn config_name(self) -> &'static str {
        match self {
            RoomId::Prep => "prep",
            RoomId::ArenaA => "A",
            RoomId::ArenaB => "B",
            RoomId::End => "end",
        }
    }

    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.config_name() == name)
    }

    pub fn index(self) -> usize {
        match self {
            RoomId::Prep => 0,
            RoomId::ArenaA => 1,
            RoomId::ArenaB => 2,
            RoomId::End => 3,
        }
    }

    pub fn is_arena(self) -> bool {
        matches!(self, RoomId::ArenaA | RoomId::ArenaB)
    }
}

/// What a room asks of the coordinator after its frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSignal {
    Continue,
    ChangeRoom(RoomId),
    PlayerDied,
    Restart,
}

/// One-shot suspension of a room's frame, plus whether the player is here.
///
/// A suspend request stops the current frame at the next checkpoint and
/// detaches the player. Any request still pending when the room's next frame
/// starts is discarded, so it never leaks into a second frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameGate {
    suspend_requested: bool,
    player_attached: bool,
}

impl FrameGate {
    pub fn begin_frame(&mut self) {
        self.suspend_requested = false;
    }

    pub fn request_suspend(&mut self) {
        self.suspend_requested = true;
    }

    pub fn is_suspend_requested(&self) -> bool {
        self.suspend_requested
    }

    /// Checkpoint: true if the frame must stop here
    pub fn should_stop(&mut self) -> bool {
        if self.suspend_requested {
            self.suspend_requested = false;
            self.player_attached = false;
            return true;
        }
        false
    }

    pub fn attach_player(&mut self) {
        self.player_attached = true;
    }

    pub fn detach_player(&mut self) {
        self.player_attached = false;
    }

    pub fn has_player(&self) -> bool {
        self.player_attached
    }
}

/// Everything a room borrows from the game for one frame
pub struct Frame<'a> {
    pub player: &'a mut Player,
    pub input: &'a TickInput,
    pub tuning: &'a Tuning,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Room {
    Prep(PrepRoom),
    Battle(BattleRoom),
    End(EndRoom),
}

impl Room {
    /// Build a room from its layout properties
    pub fn from_props(id: RoomId, props: &GameProps, tuning: &Tuning) -> Result<Self> {
        Ok(match id {
            RoomId::Prep => Room::Prep(PrepRoom::from_props(props)?),
            RoomId::ArenaA | RoomId::ArenaB => Room::Battle(BattleRoom::from_props(id, props, tuning)?),
            RoomId::End => Room::End(EndRoom::from_props(props)?),
        })
    }

    pub fn id(&self) -> RoomId {
        match self {
            Room::Prep(_) => RoomId::Prep,
            Room::Battle(room) => room.id,
            Room::End(_) => RoomId::End,
        }
    }

    pub fn update(&mut self, frame: &mut Frame) -> RoomSignal {
        match self {
            Room::Prep(room) => room.update(frame),
            Room::Battle(room) => room.update(frame),
            Room::End(room) => room.update(frame),
        }
    }

    fn gate_mut(&mut self) -> &mut FrameGate {
        match self {
            Room::Prep(room) => &mut room.gate,
            Room::Battle(room) => &mut room.gate,
            Room::End(room) => &mut room.gate,
        }
    }

    pub fn gate(&self) -> &FrameGate {
        match self {
            Room::Prep(room) => &room.gate,
            Room::Battle(room) => &room.gate,
            Room::End(room) => &room.gate,
        }
    }

    /// Stop whatever is left of this room's current frame and let go of the player
    pub fn request_early_suspend(&mut self) {
        let gate = self.gate_mut();
        gate.request_suspend();
        gate.detach_player();
    }

    pub fn attach_player(&mut self) {
        self.gate_mut().attach_player();
    }

    pub fn doors(&self) -> Vec<&Door> {
        match self {
            Room::Prep(room) => vec![&room.door],
            Room::Battle(room) => room.doors.iter().collect(),
            Room::End(room) => vec![&room.door],
        }
    }

    /// The door a player arriving from `from` appears on. Falls back to the
    /// room's first door when none leads back to `from`.
    pub fn door_leading_to_mut(&mut self, from: RoomId) -> &mut Door {
        match self {
            Room::Prep(room) => &mut room.door,
            Room::End(room) => &mut room.door,
            Room::Battle(room) => {
                let index = room.doors.iter().position(|d| d.to == from).unwrap_or(0);
                &mut room.doors[index]
            }
        }
    }

    /// Arenas report their set-once flag; other rooms have nothing to clear
    pub fn is_cleared(&self) -> bool {
        match self {
            Room::Battle(room) => room.is_cleared(),
            Room::Prep(_) | Room::End(_) => true,
        }
    }

    pub fn arm(&mut self) {
        if let Room::Battle(room) = self {
            room.arm();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_names_round_trip() {
        for id in RoomId::ALL {
            assert_eq!(RoomId::from_config_name(id.config_name()), Some(id));
        }
        assert_eq!(RoomId::from_config_name("C"), None);
    }

    #[test]
    fn test_gate_stops_once_and_detaches() {
        let mut gate = FrameGate::default();
        gate.attach_player();
        assert!(!gate.should_stop());
        gate.request_suspend();
        assert!(gate.should_stop());
        assert!(!gate.has_player());
        assert!(!gate.should_stop());
    }

    #[test]
    fn test_stale_suspend_discarded_at_frame_start() {
        let mut gate = FrameGate::default();
        gate.request_suspend();
        gate.begin_frame();
        assert!(!gate.is_suspend_requested());
        assert!(!gate.should_stop());
    }
}

//! Game context and room-transition coordinator
//!
//! Everything the frame loop mutates lives in one [`GameState`] owned by the
//! caller. Rooms are looked up by [`RoomId`]; nothing holds a reference to a
//! room across frames.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::geometry::Aabb;
use super::player::{Player, PlayerStats, WeaponTier};
use super::room::{EndOutcome, Room, RoomId};
use crate::config::{ConfigError, GameProps, Result};
use crate::consts::PLAYER_SIZE;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active room updates every frame
    #[default]
    Playing,
    /// Store menu is up; the room is frozen
    StoreOpen,
}

/// Outward notifications, drained by the caller after each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoomChanged { from: RoomId, to: RoomId },
    PlayerDied,
    /// Entry door relocked behind the player; enemies are awake
    ArenaArmed(RoomId),
    ArenaCleared(RoomId),
    EnemyKilled { room: RoomId, kind: EnemyKind },
    KeyCollected,
    ChestOpened { coins: u32 },
    WeaponUpgraded(WeaponTier),
    HealthPurchased,
    GameReset,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed; reset reuses it so a restarted run replays identically
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    /// Indexed by [`RoomId::index`]
    pub rooms: Vec<Room>,
    /// Rooms as built from the layout, for reset
    pristine_rooms: Vec<Room>,
    pub current: RoomId,
    pub phase: GamePhase,
    /// Frames simulated since the last reset
    pub frame: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Build every room from the layout and put the player in the prep room
    pub fn new(props: &GameProps, seed: u64) -> Result<Self> {
        let tuning = Tuning::from_props(props)?;
        let rooms = RoomId::ALL
            .into_iter()
            .map(|id| Room::from_props(id, props, &tuning))
            .collect::<Result<Vec<_>>>()?;
        check_start_clear(tuning.player_start, &rooms)?;

        let mut state = Self {
            player: Player::new(tuning.player_start, &tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            pristine_rooms: rooms.clone(),
            rooms,
            current: RoomId::Prep,
            phase: GamePhase::Playing,
            frame: 0,
            events: Vec::new(),
        };
        state.room_mut(RoomId::Prep).attach_player();
        log::info!("New game (seed {})", seed);
        Ok(state)
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.index()]
    }

    pub fn current_room(&self) -> &Room {
        self.room(self.current)
    }

    /// Hand the player to room `to`, placing them on the door that leads
    /// back where they came from.
    pub fn change_room(&mut self, to: RoomId) {
        let from = self.current;
        self.room_mut(from).request_early_suspend();

        let arriving_in_uncleared_arena = to.is_arena() && !self.room(to).is_cleared();
        let door = self.room_mut(to).door_leading_to_mut(from);
        if arriving_in_uncleared_arena {
            door.set_should_relock();
        }
        door.unlock(true);
        let door_pos = door.pos;

        self.player.place_at(door_pos);
        self.current = to;
        let room = self.room_mut(to);
        room.attach_player();
        if let Room::End(end) = room {
            end.mark_won();
        }

        log::info!("Room changed: {} -> {}", from.config_name(), to.config_name());
        self.events.push(GameEvent::RoomChanged { from, to });
    }

    /// Terminal transition on player death. Skips door logic entirely.
    pub fn change_to_game_over(&mut self) {
        let from = self.current;
        self.room_mut(from).request_early_suspend();

        self.current = RoomId::End;
        let start = self.tuning.player_start;
        self.player.place_at(start);
        let room = self.room_mut(RoomId::End);
        room.attach_player();
        if let Room::End(end) = room {
            end.mark_lost();
        }

        log::info!("Player died in {}; game over", from.config_name());
        self.events.push(GameEvent::PlayerDied);
    }

    /// Start over: pristine rooms, fresh player, same seed
    pub fn reset(&mut self) {
        self.rooms = self.pristine_rooms.clone();
        self.player = Player::new(self.tuning.player_start, &self.tuning);
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.current = RoomId::Prep;
        self.phase = GamePhase::Playing;
        self.frame = 0;
        self.room_mut(RoomId::Prep).attach_player();

        log::info!("Game reset");
        self.events.push(GameEvent::GameReset);
    }

    pub fn stats(&self) -> PlayerStats {
        self.player.stats()
    }

    /// `None` until the player reaches the ending room
    pub fn end_outcome(&self) -> Option<EndOutcome> {
        match self.room(RoomId::End) {
            Room::End(end) => end.outcome,
            _ => None,
        }
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// The player appears at the start in the prep room and again in the end
/// room after dying, where the door is locked. A start on a door would leave
/// them unable to walk off it.
fn check_start_clear(start: Vec2, rooms: &[Room]) -> Result<()> {
    let footprint = Aabb::centered(start, PLAYER_SIZE);
    for id in [RoomId::Prep, RoomId::End] {
        let room = &rooms[id.index()];
        if room.doors().iter().any(|d| d.bounding_box().intersects(&footprint)) {
            return Err(ConfigError::StartBlocked {
                room: id.config_name(),
                pos: format!("{},{}", start.x, start.y),
            });
        }
    }
    Ok(())
}

//! Per-frame simulation step
//!
//! One call to [`tick`] is one rendered frame: store handling, the active
//! room's update, then whatever transition the room asked for.

use glam::Vec2;

use super::room::{Frame, RoomSignal};
use super::state::{GameEvent, GamePhase, GameState};

/// Input state sampled for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Aim point in field coordinates
    pub cursor: Vec2,
    /// Primary button held
    pub shoot: bool,
    /// Open a chest the player stands on
    pub interact: bool,
    /// Restart from a restart area, or from the store
    pub restart: bool,
    pub select_robot: bool,
    pub select_marine: bool,
    /// Pause/menu key
    pub toggle_store: bool,
    pub buy_weapon: bool,
    pub buy_health: bool,
}

impl TickInput {
    /// Direction of travel from the held keys. Screen space: y grows downward.
    /// Diagonals are not normalized.
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    if input.toggle_store {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::StoreOpen,
            GamePhase::StoreOpen => GamePhase::Playing,
        };
        log::info!("Store {:?}", state.phase);
    }

    // Store open: the room is frozen
    if state.phase == GamePhase::StoreOpen {
        run_store(state, input);
        return;
    }

    let index = state.current.index();
    let mut frame = Frame {
        player: &mut state.player,
        input,
        tuning: &state.tuning,
        rng: &mut state.rng,
        events: &mut state.events,
    };
    let signal = state.rooms[index].update(&mut frame);

    match signal {
        RoomSignal::Continue => {}
        RoomSignal::ChangeRoom(to) => state.change_room(to),
        RoomSignal::PlayerDied => state.change_to_game_over(),
        RoomSignal::Restart => state.reset(),
    }
}

fn run_store(state: &mut GameState, input: &TickInput) {
    if input.buy_weapon {
        if state.player.upgrade_weapon(&state.tuning) {
            log::info!("Weapon upgraded to {:?}", state.player.weapon);
            state.events.push(GameEvent::WeaponUpgraded(state.player.weapon));
        } else {
            log::debug!("Weapon upgrade refused ({} coins)", state.player.coins);
        }
    }

    if input.buy_health {
        if state.player.purchase_health(&state.tuning) {
            log::info!("Health purchased, now {}", state.player.health);
            state.events.push(GameEvent::HealthPurchased);
        } else {
            log::debug!("Health purchase refused ({} coins)", state.player.coins);
        }
    }

    if input.restart {
        state.reset();
    }
}

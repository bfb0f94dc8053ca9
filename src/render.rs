//! Draw-list and stats queries for an external renderer
//!
//! The simulation never draws. A renderer asks for the active room's
//! [`DrawCommand`]s once per frame and blits each sprite at its position.
//! Tombstoned entities (broken furniture, dead or dormant enemies, spent
//! pickups) are left out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{BreakableKind, Door, EnemyKind, GameState, Player, PlayerStats, Room};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    Bullet,
    Fireball,
    Wall,
    Table,
    Basket,
    River,
    DoorLocked,
    DoorOpen,
    RoamingEnemy,
    EliteEnemy,
    PatrolEnemy,
    Key,
    Chest,
    RestartArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    /// Sprite center
    pub pos: Vec2,
    /// Draw horizontally flipped
    pub mirrored: bool,
}

impl DrawCommand {
    fn at(sprite: SpriteId, pos: Vec2) -> Self {
        Self {
            sprite,
            pos,
            mirrored: false,
        }
    }
}

/// Everything visible in the active room, back to front
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let room = state.current_room();
    let mut list = Vec::new();

    match room {
        Room::Prep(room) => {
            if let Some(area) = &room.restart_area {
                list.push(DrawCommand::at(SpriteId::RestartArea, area.pos));
            }
        }
        Room::End(room) => {
            if let Some(area) = &room.restart_area {
                list.push(DrawCommand::at(SpriteId::RestartArea, area.pos));
            }
        }
        Room::Battle(room) => {
            for river in &room.rivers {
                list.push(DrawCommand::at(SpriteId::River, river.pos));
            }
            for wall in &room.walls {
                list.push(DrawCommand::at(SpriteId::Wall, wall.pos));
            }
            for breakable in room.breakables.iter().filter(|b| b.is_active()) {
                let sprite = match breakable.kind {
                    BreakableKind::Table => SpriteId::Table,
                    BreakableKind::Basket => SpriteId::Basket,
                };
                list.push(DrawCommand::at(sprite, breakable.pos));
            }
            for chest in room.chests.iter().filter(|c| c.is_active()) {
                list.push(DrawCommand::at(SpriteId::Chest, chest.pos));
            }
            for key in room.keys.iter().filter(|k| k.is_active()) {
                list.push(DrawCommand::at(SpriteId::Key, key.pos));
            }
            for enemy in room.enemies.iter().filter(|e| e.is_combatant()) {
                let sprite = match enemy.kind {
                    EnemyKind::Roaming => SpriteId::RoamingEnemy,
                    EnemyKind::Elite => SpriteId::EliteEnemy,
                    EnemyKind::Patrol => SpriteId::PatrolEnemy,
                };
                list.push(DrawCommand::at(sprite, enemy.pos));
                for fireball in enemy.fireballs.iter().filter(|f| f.is_active()) {
                    list.push(DrawCommand::at(SpriteId::Fireball, fireball.pos));
                }
            }
        }
    }

    for door in room.doors() {
        push_door(&mut list, door);
    }
    push_player(&mut list, &state.player);
    list
}

fn push_door(list: &mut Vec<DrawCommand>, door: &Door) {
    let sprite = if door.is_unlocked() {
        SpriteId::DoorOpen
    } else {
        SpriteId::DoorLocked
    };
    list.push(DrawCommand::at(sprite, door.pos));
}

fn push_player(list: &mut Vec<DrawCommand>, player: &Player) {
    for bullet in player.bullets.iter().filter(|b| b.is_active()) {
        list.push(DrawCommand::at(SpriteId::Bullet, bullet.pos));
    }
    list.push(DrawCommand {
        sprite: SpriteId::Player,
        pos: player.pos,
        mirrored: player.facing_left,
    });
}

/// HUD numbers: health, coins, keys, weapon tier
pub fn stats(state: &GameState) -> PlayerStats {
    state.stats()
}

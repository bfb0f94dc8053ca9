//! Arena whose doors stay shut until every enemy inside is dead
//!
//! Projectile resolution order for each player bullet, one sweep per
//! category: patrol, roaming, elite enemies, then tables, baskets, walls and
//! finally locked doors. Inside a sweep the first hit ends the sweep. A hit
//! always spends the projectile, so later sweeps see it as inactive.

use serde::{Deserialize, Serialize};

use super::{Frame, FrameGate, RoomId, RoomSignal};
use crate::config::{ConfigError, GameProps, Result};
use crate::sim::door::{Door, DoorEvent};
use crate::sim::enemy::{DeathReward, Enemy, EnemyKind, HitOutcome};
use crate::sim::interactable::{Key, TreasureBox};
use crate::sim::obstacle::{Breakable, BreakableKind, River, Wall};
use crate::sim::player::Player;
use crate::sim::projectile::Projectile;
use crate::sim::state::GameEvent;
use crate::tuning::Tuning;

const ENEMY_PRIORITY: [EnemyKind; 3] = [EnemyKind::Patrol, EnemyKind::Roaming, EnemyKind::Elite];
const BREAKABLE_PRIORITY: [BreakableKind; 2] = [BreakableKind::Table, BreakableKind::Basket];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRoom {
    pub id: RoomId,
    /// Primary (entry) and secondary (exit) doors
    pub doors: [Door; 2],
    pub walls: Vec<Wall>,
    pub breakables: Vec<Breakable>,
    pub rivers: Vec<River>,
    pub enemies: Vec<Enemy>,
    pub chests: Vec<TreasureBox>,
    pub keys: Vec<Key>,
    pub gate: FrameGate,
    cleared: bool,
}

impl BattleRoom {
    pub fn from_props(id: RoomId, props: &GameProps, tuning: &Tuning) -> Result<Self> {
        let room = id.config_name();
        let primary = props
            .door("primarydoor", id)?
            .ok_or(ConfigError::MissingLayout {
                room,
                what: "primary door",
            })?;
        let secondary = props
            .door("secondarydoor", id)?
            .ok_or(ConfigError::MissingLayout {
                room,
                what: "secondary door",
            })?;

        let mut breakables: Vec<Breakable> = props
            .points("table", id)?
            .into_iter()
            .map(Breakable::table)
            .collect();
        breakables.extend(props.points("basket", id)?.into_iter().map(Breakable::basket));

        let mut enemies = Vec::new();
        enemies.extend(Enemy::patrol(props.points("keyBulletKin", id)?, tuning));
        enemies.extend(
            props
                .points("bulletKin", id)?
                .into_iter()
                .map(|pos| Enemy::roaming(pos, tuning)),
        );
        enemies.extend(
            props
                .points("ashenBulletKin", id)?
                .into_iter()
                .map(|pos| Enemy::elite(pos, tuning)),
        );

        let chests = props
            .chests("treasurebox", id)?
            .into_iter()
            .map(|spec| TreasureBox::new(spec.pos, spec.coins))
            .collect();

        log::debug!(
            "Arena {} built with {} enemies and {} obstacles",
            room,
            enemies.len(),
            breakables.len()
        );

        Ok(Self {
            id,
            doors: [
                Door::new(primary.pos, primary.to, Some(id)),
                Door::new(secondary.pos, secondary.to, Some(id)),
            ],
            walls: props.points("wall", id)?.into_iter().map(Wall::new).collect(),
            breakables,
            rivers: props.points("river", id)?.into_iter().map(River::new).collect(),
            enemies,
            chests,
            keys: Vec::new(),
            gate: FrameGate::default(),
            cleared: false,
        })
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Force every living enemy active
    pub fn arm(&mut self) {
        for enemy in &mut self.enemies {
            enemy.activate();
        }
        log::debug!("Arena {} armed", self.id.config_name());
    }

    pub fn no_more_enemies(&self) -> bool {
        self.enemies.iter().all(Enemy::is_dead)
    }

    pub fn update(&mut self, frame: &mut Frame) -> RoomSignal {
        self.gate.begin_frame();
        if !self.gate.has_player() {
            return RoomSignal::Continue;
        }
        let player = &mut *frame.player;
        let events = &mut *frame.events;
        let rng = &mut *frame.rng;
        let tuning = frame.tuning;
        let input = frame.input;

        let mut signal = RoomSignal::Continue;
        for index in 0..self.doors.len() {
            match self.doors[index].update(player, self.cleared) {
                DoorEvent::Enter(to) => {
                    self.gate.request_suspend();
                    signal = RoomSignal::ChangeRoom(to);
                }
                DoorEvent::Relocked => {
                    self.arm();
                    events.push(GameEvent::ArenaArmed(self.id));
                }
                DoorEvent::Blocked | DoorEvent::None => {}
            }
            if self.gate.should_stop() {
                return signal;
            }
        }

        let mut player_died = false;
        for wall in &self.walls {
            wall.update(player);
        }
        for breakable in self.breakables.iter().filter(|b| b.is_active()) {
            breakable.update(player);
        }
        for river in &self.rivers {
            player_died |= river.update(player, tuning.river_damage);
        }
        if player_died {
            self.gate.request_suspend();
        }
        if self.gate.should_stop() {
            return RoomSignal::PlayerDied;
        }

        for enemy in self.enemies.iter_mut().filter(|e| e.is_combatant()) {
            player_died |= enemy.update(player, tuning, rng);
        }
        if player_died {
            self.gate.request_suspend();
        }
        if self.gate.should_stop() {
            return RoomSignal::PlayerDied;
        }

        for chest in self.chests.iter_mut().filter(|c| c.is_active()) {
            if chest.update(player, input.interact, tuning) {
                log::debug!("Chest opened for {} coins", chest.coins);
                events.push(GameEvent::ChestOpened { coins: chest.coins });
            }
        }

        for key in &mut self.keys {
            if key.update(player) {
                log::debug!("Key collected, now holding {}", player.keys);
                events.push(GameEvent::KeyCollected);
            }
        }
        self.keys.retain(Key::is_active);

        self.resolve_projectiles(player, tuning, events);

        player.update(input, tuning);

        if !self.cleared && self.no_more_enemies() {
            self.cleared = true;
            for door in &mut self.doors {
                door.unlock(false);
                door.clear_should_relock();
            }
            log::info!("Arena {} cleared", self.id.config_name());
            events.push(GameEvent::ArenaCleared(self.id));
        }

        signal
    }

    /// Resolve player bullets against everything in the room, then enemy
    /// fireballs against the scenery. Rewards are credited once, at the kill.
    pub fn resolve_projectiles(
        &mut self,
        player: &mut Player,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        let mut rewards = Vec::new();

        for bullet in player.bullets.iter_mut().filter(|b| b.is_active()) {
            for kind in ENEMY_PRIORITY {
                for enemy in self.enemies.iter_mut().filter(|e| e.kind == kind) {
                    match enemy.take_hit(bullet) {
                        HitOutcome::Miss => continue,
                        HitOutcome::Damaged => {}
                        HitOutcome::Killed => {
                            log::debug!("{:?} killed in arena {}", kind, self.id.config_name());
                            rewards.push(enemy.death_reward());
                            events.push(GameEvent::EnemyKilled { room: self.id, kind });
                        }
                    }
                    break;
                }
            }
            absorb_in_scenery(bullet, &mut self.breakables, &self.walls, &self.doors);
        }

        for enemy in &mut self.enemies {
            for fireball in enemy.fireballs.iter_mut().filter(|f| f.is_active()) {
                absorb_in_scenery(fireball, &mut self.breakables, &self.walls, &self.doors);
            }
            enemy.fireballs.retain(Projectile::is_active);
        }

        for reward in rewards {
            match reward {
                DeathReward::Coins(coins) => player.earn_coins(coins, tuning),
                DeathReward::Key(pos) => self.keys.push(Key::new(pos)),
            }
        }
    }
}

/// Obstacle, wall and locked-door sweeps shared by bullets and fireballs
fn absorb_in_scenery(
    projectile: &mut Projectile,
    breakables: &mut [Breakable],
    walls: &[Wall],
    doors: &[Door],
) {
    for kind in BREAKABLE_PRIORITY {
        for breakable in breakables.iter_mut().filter(|b| b.kind == kind) {
            if breakable.absorb(projectile) {
                break;
            }
        }
    }
    for wall in walls {
        if wall.absorb(projectile) {
            break;
        }
    }
    for door in doors {
        door.absorb(projectile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::door::DoorState;
    use crate::sim::tick::TickInput;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DOORS: &str = "primarydoor.A=60,380,prep\nsecondarydoor.A=964,380,B\n";

    fn arena(layout: &str, tuning: &Tuning) -> BattleRoom {
        let props = GameProps::parse(&format!("{DOORS}{layout}"));
        let mut room = BattleRoom::from_props(RoomId::ArenaA, &props, tuning).unwrap();
        room.gate.attach_player();
        room
    }

    fn bullet_at(pos: Vec2, damage: f32) -> Projectile {
        Projectile::bullet(pos, pos + Vec2::X, 5.0, damage)
    }

    fn run_frame(
        room: &mut BattleRoom,
        player: &mut Player,
        input: &TickInput,
        tuning: &Tuning,
    ) -> (RoomSignal, Vec<GameEvent>) {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut events = Vec::new();
        let mut frame = Frame {
            player,
            input,
            tuning,
            rng: &mut rng,
            events: &mut events,
        };
        let signal = room.update(&mut frame);
        (signal, events)
    }

    #[test]
    fn test_missing_secondary_door() {
        let props = GameProps::parse("primarydoor.A=60,380,prep\n");
        assert!(matches!(
            BattleRoom::from_props(RoomId::ArenaA, &props, &Tuning::default()),
            Err(ConfigError::MissingLayout { .. })
        ));
    }

    #[test]
    fn test_layout_with_sentinels() {
        let tuning = Tuning::default();
        let room = arena(
            "wall.A=0\ntable.A=300,300\nbasket.A=0\nbulletKin.A=500,500;600,500\nashenBulletKin.A=0\nkeyBulletKin.A=100,100;200,100\n",
            &tuning,
        );
        assert!(room.walls.is_empty());
        assert_eq!(room.breakables.len(), 1);
        assert_eq!(room.enemies.len(), 3);
        assert_eq!(room.enemies[0].kind, EnemyKind::Patrol);
        assert!(room.enemies.iter().all(|e| !e.is_active()));
    }

    #[test]
    fn test_patrol_takes_priority_over_roaming() {
        let tuning = Tuning::default();
        let mut room = arena("bulletKin.A=400,400\nkeyBulletKin.A=400,400\n", &tuning);
        room.arm();
        let mut player = Player::new(Vec2::new(800.0, 600.0), &tuning);
        player.bullets.push(bullet_at(Vec2::new(400.0, 400.0), 3.0));
        let mut events = Vec::new();
        room.resolve_projectiles(&mut player, &tuning, &mut events);

        let patrol = &room.enemies[0];
        let roamer = &room.enemies[1];
        assert_eq!(patrol.health(), tuning.patrol.health - 3.0);
        assert_eq!(roamer.health(), tuning.roaming.health);
        assert!(!player.bullets[0].is_active());
    }

    #[test]
    fn test_one_bullet_hits_one_roamer() {
        let tuning = Tuning::default();
        let mut room = arena("bulletKin.A=400,400;405,400\n", &tuning);
        room.arm();
        let mut player = Player::new(Vec2::new(800.0, 600.0), &tuning);
        player.bullets.push(bullet_at(Vec2::new(402.0, 400.0), 3.0));
        room.resolve_projectiles(&mut player, &tuning, &mut Vec::new());
        assert_eq!(room.enemies[0].health(), tuning.roaming.health - 3.0);
        assert_eq!(room.enemies[1].health(), tuning.roaming.health);
    }

    #[test]
    fn test_enemy_hit_spares_table_behind_it() {
        let tuning = Tuning::default();
        let mut room = arena("table.A=400,400\nbulletKin.A=400,400\n", &tuning);
        room.arm();
        let mut player = Player::new(Vec2::new(800.0, 600.0), &tuning);
        player.bullets.push(bullet_at(Vec2::new(400.0, 400.0), 3.0));
        room.resolve_projectiles(&mut player, &tuning, &mut Vec::new());
        assert_eq!(room.enemies[0].health(), tuning.roaming.health - 3.0);
        assert!(room.breakables[0].is_active());
        assert!(!player.bullets[0].is_active());
    }

    #[test]
    fn test_roamer_shields_overlapping_elite() {
        let tuning = Tuning::default();
        let mut room = arena("bulletKin.A=400,400\nashenBulletKin.A=400,400\n", &tuning);
        room.arm();
        let mut player = Player::new(Vec2::new(800.0, 600.0), &tuning);
        player.bullets.push(bullet_at(Vec2::new(400.0, 400.0), 3.0));
        room.resolve_projectiles(&mut player, &tuning, &mut Vec::new());

        let health = |kind| {
            room.enemies
                .iter()
                .find(|e| e.kind == kind)
                .map(|e| e.health())
                .unwrap()
        };
        assert_eq!(health(EnemyKind::Roaming), tuning.roaming.health - 3.0);
        assert_eq!(health(EnemyKind::Elite), tuning.elite.health);
        assert!(!player.bullets[0].is_active());
    }

    #[test]
    fn test_kill_credits_coins_once() {
        let tuning = Tuning::default();
        let mut room = arena("bulletKin.A=400,400\n", &tuning);
        room.arm();
        let mut player = Player::new(Vec2::new(800.0, 600.0), &tuning);
        for _ in 0..3 {
            player.bullets.push(bullet_at(Vec2::new(400.0, 400.0), 1000.0));
        }
        let mut events = Vec::new();
        room.resolve_projectiles(&mut player, &tuning, &mut events);
        assert_eq!(player.coins, tuning.roaming.coin_reward);
        assert_eq!(events.len(), 1);
        // The two spare bullets flew on untouched
        assert_eq!(player.bullets.iter().filter(|b| b.is_active()).count(), 2);
    }

    #[test]
    fn test_patrol_kill_spawns_key() {
        let tuning = Tuning::default();
        let mut room = arena("keyBulletKin.A=400,400\n", &tuning);
        room.arm();
        let mut player = Player::new(Vec2::new(800.0, 600.0), &tuning);
        player.bullets.push(bullet_at(Vec2::new(400.0, 400.0), 1000.0));
        room.resolve_projectiles(&mut player, &tuning, &mut Vec::new());
        assert_eq!(room.keys.len(), 1);
        assert_eq!(room.keys[0].pos, Vec2::new(400.0, 400.0));
        assert_eq!(player.coins, 0);
    }

    #[test]
    fn test_table_takes_bullet_before_wall() {
        let tuning = Tuning::default();
        let mut room = arena("table.A=300,300\nwall.A=300,300\n", &tuning);
        let mut player = Player::new(Vec2::new(800.0, 600.0), &tuning);
        player.bullets.push(bullet_at(Vec2::new(300.0, 300.0), 3.0));
        room.resolve_projectiles(&mut player, &tuning, &mut Vec::new());
        assert!(!room.breakables[0].is_active());
        assert!(!player.bullets[0].is_active());
    }

    #[test]
    fn test_fireball_absorbed_but_table_stands() {
        let tuning = Tuning::default();
        let mut room = arena("table.A=300,300\nbulletKin.A=600,600\n", &tuning);
        room.arm();
        room.enemies[0]
            .fireballs
            .push(Projectile::fireball(Vec2::new(300.0, 300.0), Vec2::new(0.0, 300.0), 3.0, 5.0));
        let mut player = Player::new(Vec2::new(800.0, 100.0), &tuning);
        room.resolve_projectiles(&mut player, &tuning, &mut Vec::new());
        assert!(room.breakables[0].is_active());
        assert!(room.enemies[0].fireballs.is_empty());
    }

    #[test]
    fn test_locked_door_absorbs_bullet() {
        let tuning = Tuning::default();
        let mut room = arena("", &tuning);
        let mut player = Player::new(Vec2::new(800.0, 600.0), &tuning);
        player.bullets.push(bullet_at(Vec2::new(964.0, 380.0), 3.0));
        room.resolve_projectiles(&mut player, &tuning, &mut Vec::new());
        assert!(!player.bullets[0].is_active());
    }

    #[test]
    fn test_empty_arena_clears_on_first_frame_once() {
        let tuning = Tuning::default();
        let mut room = arena("", &tuning);
        let mut player = Player::new(Vec2::new(500.0, 380.0), &tuning);
        let (_, events) = run_frame(&mut room, &mut player, &TickInput::default(), &tuning);
        assert!(room.is_cleared());
        assert!(events.contains(&GameEvent::ArenaCleared(RoomId::ArenaA)));
        assert!(room.doors.iter().all(Door::is_unlocked));

        let (_, events) = run_frame(&mut room, &mut player, &TickInput::default(), &tuning);
        assert!(!events.contains(&GameEvent::ArenaCleared(RoomId::ArenaA)));
    }

    #[test]
    fn test_not_cleared_while_enemy_alive() {
        let tuning = Tuning::default();
        let mut room = arena("bulletKin.A=400,200\n", &tuning);
        let mut player = Player::new(Vec2::new(500.0, 600.0), &tuning);
        run_frame(&mut room, &mut player, &TickInput::default(), &tuning);
        assert!(!room.is_cleared());
        assert_eq!(room.doors[0].state(), DoorState::Locked);
    }

    #[test]
    fn test_wall_reverts_move_into_it() {
        let tuning = Tuning::default();
        let mut room = arena("wall.A=500,300\n", &tuning);
        let mut player = Player::new(Vec2::new(500.0, 380.0), &tuning);
        player.move_to(Vec2::new(500.0, 340.0));
        run_frame(&mut room, &mut player, &TickInput::default(), &tuning);
        assert_eq!(player.pos, Vec2::new(500.0, 380.0));
        assert!(!player.bounding_box().intersects(&room.walls[0].bounding_box()));
    }

    #[test]
    fn test_river_death_suspends_frame() {
        let mut tuning = Tuning::default();
        tuning.river_damage = 1000.0;
        let mut room = arena("river.A=500,380\nbulletKin.A=100,100\n", &tuning);
        let mut player = Player::new(Vec2::new(500.0, 380.0), &tuning);
        let (signal, _) = run_frame(&mut room, &mut player, &TickInput::default(), &tuning);
        assert_eq!(signal, RoomSignal::PlayerDied);
        assert!(!room.gate.has_player());
    }

    #[test]
    fn test_leaving_entry_door_relocks_and_arms() {
        let tuning = Tuning::default();
        let mut room = arena("bulletKin.A=500,200\n", &tuning);
        room.doors[0].set_should_relock();
        room.doors[0].unlock(true);
        let mut player = Player::new(Vec2::new(60.0, 380.0), &tuning);

        // Standing on the door after arriving does nothing
        let (signal, _) = run_frame(&mut room, &mut player, &TickInput::default(), &tuning);
        assert_eq!(signal, RoomSignal::Continue);
        assert_eq!(room.doors[0].state(), DoorState::UnlockedJustEntered);

        player.place_at(Vec2::new(300.0, 380.0));
        let (_, events) = run_frame(&mut room, &mut player, &TickInput::default(), &tuning);
        assert_eq!(room.doors[0].state(), DoorState::Locked);
        assert!(room.enemies.iter().all(Enemy::is_active));
        assert!(events.contains(&GameEvent::ArenaArmed(RoomId::ArenaA)));
    }
}

//! Deterministic frame-stepped simulation
//!
//! All gameplay logic lives here:
//! - One [`tick`] per rendered frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (layout order within each entity collection)
//! - No rendering or platform dependencies

pub mod door;
pub mod enemy;
pub mod geometry;
pub mod interactable;
pub mod obstacle;
pub mod player;
pub mod projectile;
pub mod room;
pub mod state;
pub mod tick;

pub use door::{Door, DoorEvent, DoorState};
pub use enemy::{DeathReward, Enemy, EnemyKind, HitOutcome};
pub use geometry::{Aabb, intersects};
pub use interactable::{Key, RestartArea, TreasureBox};
pub use obstacle::{Breakable, BreakableKind, River, Wall};
pub use player::{CharacterKind, DamageSource, Player, PlayerStats, WeaponTier};
pub use projectile::{Projectile, ProjectileKind};
pub use room::{BattleRoom, EndOutcome, EndRoom, FrameGate, PrepRoom, Room, RoomId, RoomSignal};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Mark-and-compact entity removal (no splicing mid-scan)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, clamp_to_world, outside_world};
pub use effects::{Countdown, Notices};
pub use state::{
    Achievement, AchievementId, Bullet, Difficulty, DifficultyProfile, Enemy, EnemyKind,
    GameEvent, GamePhase, GameState, MAX_PARTICLES, Nebula, Particle, Player, PowerUp,
    PowerUpKind, Star,
};
pub use tick::{HeldKeys, TickInput, tick};

//! Sprite lookup contract between the simulation and the presentation layer
//!
//! The simulation only says *which* sprite an entity wants, as a stable key.
//! Whatever serves the sprites may come back empty-handed; the render step
//! then draws its vector fallback. None of that feeds back into the sim.

use serde::{Deserialize, Serialize};

use crate::sim::{EnemyKind, PowerUpKind};

/// Stable lookup keys for drawable entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKey {
    Player,
    EnemyBasic,
    EnemyFast,
    EnemyHeavy,
    PowerUpTripleShot,
    PowerUpShield,
}

impl SpriteKey {
    /// Asset-map key, e.g. a file stem
    pub fn as_key(&self) -> &'static str {
        match self {
            SpriteKey::Player => "player",
            SpriteKey::EnemyBasic => "enemy_basic",
            SpriteKey::EnemyFast => "enemy_fast",
            SpriteKey::EnemyHeavy => "enemy_heavy",
            SpriteKey::PowerUpTripleShot => "powerup_triple",
            SpriteKey::PowerUpShield => "powerup_shield",
        }
    }
}

impl From<EnemyKind> for SpriteKey {
    fn from(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Basic => SpriteKey::EnemyBasic,
            EnemyKind::Fast => SpriteKey::EnemyFast,
            EnemyKind::Heavy => SpriteKey::EnemyHeavy,
        }
    }
}

impl From<PowerUpKind> for SpriteKey {
    fn from(kind: PowerUpKind) -> Self {
        match kind {
            PowerUpKind::TripleShot => SpriteKey::PowerUpTripleShot,
            PowerUpKind::Shield => SpriteKey::PowerUpShield,
        }
    }
}

/// Source of drawable assets, implemented by the presentation layer.
pub trait SpriteProvider {
    type Sprite;

    /// `None` means unavailable; the caller falls back to vector shapes.
    fn lookup(&self, key: SpriteKey) -> Option<&Self::Sprite>;
}

//! Nova Strike - a vertical-scrolling space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, progression)
//! - `assets`: Sprite lookup contract for the presentation layer
//! - `audio`: Sound cue keys and volume mixing
//! - `settings`: Player preferences

pub mod assets;
pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical world width. All positions live in this space; the
    /// presentation layer scales physical input into it before it
    /// reaches the simulation.
    pub const WORLD_WIDTH: f32 = 800.0;
    /// Logical world height
    pub const WORLD_HEIGHT: f32 = 1000.0;

    /// Fixed simulation timestep in milliseconds (60 steps per second)
    pub const STEP_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum catch-up steps per frame callback to prevent spiral of death
    pub const MAX_STEPS_PER_FRAME: u32 = 4;

    /// Player ship defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Keyboard movement, units per step (diagonals stack, not normalized)
    pub const PLAYER_SPEED: f32 = 7.0;
    /// Pointer-follow smoothing factor applied each step
    pub const POINTER_SMOOTHING: f32 = 0.2;
    /// Grace window after contact damage (ms)
    pub const INVINCIBLE_MS: f32 = 2000.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_DAMAGE: i32 = 1;
    /// Bullets this far outside the world are culled
    pub const BULLET_CULL_MARGIN: f32 = 50.0;
    /// Angular offset of the triple-shot side bullets (radians)
    pub const TRIPLE_SHOT_SPREAD: f32 = 0.2;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    /// Drop chance per destroyed enemy
    pub const POWERUP_DROP_CHANCE: f64 = 0.1;
    pub const TRIPLE_SHOT_MS: f32 = 10_000.0;

    /// Scoring and progression
    pub const ESCAPE_PENALTY: u32 = 50;
    /// Next level at `level * LEVEL_SCORE_STEP` points
    pub const LEVEL_SCORE_STEP: u32 = 2000;
    pub const ACE_PILOT_SCORE: u32 = 10_000;
    pub const UNSTOPPABLE_KILLS: u32 = 50;

    /// Screen shake magnitude set by an explosion (reset, never stacked)
    pub const SHAKE_ON_EXPLOSION: f32 = 10.0;
    /// Linear shake decay per step
    pub const SHAKE_DECAY_PER_STEP: f32 = 0.5;

    /// HUD banner lifetimes (ms)
    pub const ACHIEVEMENT_BANNER_MS: f32 = 3000.0;
    pub const LEVEL_BANNER_MS: f32 = 2000.0;

    /// Backdrop decoration counts
    pub const STAR_COUNT: usize = 150;
    pub const NEBULA_COUNT: usize = 5;
}

//! Game state and core simulation types
//!
//! Everything the render step reads each frame lives here, owned by one
//! `GameState` that the step functions receive by reference. No globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::{Countdown, Notices};
use super::spawn;
use crate::audio::SoundCue;
use crate::consts::*;

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    Start,
    /// Difficulty menu
    DifficultySelect,
    /// Simulation advancing
    Playing,
    /// Frozen mid-run; no timer advances
    Paused,
    /// Run ended. Re-enterable: a new run resets everything but achievements.
    GameOver,
}

/// Difficulty chosen at session start; immutable for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Tuning fixed by the chosen difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Chance of an enemy spawn attempt per step, before the level bonus
    pub spawn_rate: f64,
    /// Multiplier on catalog enemy speed
    pub enemy_speed_mult: f32,
    /// Starting and maximum player health
    pub player_health: i32,
}

impl Difficulty {
    pub const fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                spawn_rate: 0.015,
                enemy_speed_mult: 0.8,
                player_health: 5,
            },
            Difficulty::Normal => DifficultyProfile {
                spawn_rate: 0.02,
                enemy_speed_mult: 1.0,
                player_health: 3,
            },
            Difficulty::Hard => DifficultyProfile {
                spawn_rate: 0.03,
                enemy_speed_mult: 1.3,
                player_health: 2,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a difficulty key. Callers fall back to `Normal` on `None`.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Enemy catalog kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Heavy,
}

/// Catalog stats for one enemy kind
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub points: u32,
    /// 0xRRGGBB tint used by the vector fallback and explosion debris
    pub color: u32,
}

impl EnemyKind {
    pub const fn stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                size: Vec2::new(40.0, 40.0),
                speed: 3.0,
                health: 1,
                points: 100,
                color: 0x3b82f6,
            },
            EnemyKind::Fast => EnemyStats {
                size: Vec2::new(30.0, 30.0),
                speed: 6.0,
                health: 1,
                points: 150,
                color: 0xf59e0b,
            },
            EnemyKind::Heavy => EnemyStats {
                size: Vec2::new(60.0, 60.0),
                speed: 1.5,
                health: 3,
                points: 300,
                color: 0xef4444,
            },
        }
    }

    /// Kinds the spawner may pick from at a given level. Fast joins at
    /// level 2, Heavy at level 3.
    pub fn unlocked_at(level: u32) -> &'static [EnemyKind] {
        match level {
            0 | 1 => &[EnemyKind::Basic],
            2 => &[EnemyKind::Basic, EnemyKind::Fast],
            _ => &[EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Heavy],
        }
    }
}

/// The player ship (recreated from the difficulty profile on every reset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    /// Contact-damage grace window; the ship is invincible while running
    pub invincible: Countdown,
    /// One-shot shield, consumed by the next contact
    pub shield_active: bool,
    pub triple_shot: Countdown,
}

impl Player {
    pub fn spawn(profile: &DifficultyProfile) -> Self {
        Self {
            pos: Vec2::new(
                WORLD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                WORLD_HEIGHT - 100.0,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            health: profile.player_health,
            max_health: profile.player_health,
            invincible: Countdown::idle(),
            shield_active: false,
            triple_shot: Countdown::idle(),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible.active()
    }
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub damage: i32,
    pub player_owned: bool,
    /// `None` flies straight up; `Some` flies along the angle at `speed`
    pub angle: Option<f32>,
    /// Mark-and-compact flag; cleared entries are dropped at end of step
    pub alive: bool,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// An enemy ship falling through the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub points: u32,
    pub alive: bool,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn color(&self) -> u32 {
        self.kind.stats().color
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    TripleShot,
    Shield,
}

impl PowerUpKind {
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::TripleShot => 0x10b981,
            PowerUpKind::Shield => 0x8b5cf6,
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub alive: bool,
}

impl PowerUp {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A decorative particle; never interacts with gameplay entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per step, damped by `friction` each step
    pub vel: Vec2,
    /// Seconds of life left; removed at <= 0
    pub life: f32,
    /// Nominal lifetime; renderers fade with `life / max_life`
    pub max_life: f32,
    pub friction: f32,
    pub size: f32,
    pub color: u32,
    /// Optional base alpha override for the fade
    pub alpha: Option<f32>,
}

/// Hard cap on live particles; bursts past this are trimmed
pub const MAX_PARTICLES: usize = 512;

/// Parallax backdrop star (decoration only, survives resets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// 0 distant, 1 mid, 2 close
    pub layer: u8,
}

/// Drifting nebula blob behind the starfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nebula {
    pub pos: Vec2,
    pub size: f32,
    pub vel: Vec2,
    pub color: u32,
}

/// Session-wide achievement ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstBlood,
    Survivor,
    AcePilot,
    PowerHungry,
    Unstoppable,
}

impl AchievementId {
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstBlood,
        AchievementId::Survivor,
        AchievementId::AcePilot,
        AchievementId::PowerHungry,
        AchievementId::Unstoppable,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "first_blood",
            AchievementId::Survivor => "survivor",
            AchievementId::AcePilot => "ace_pilot",
            AchievementId::PowerHungry => "power_hungry",
            AchievementId::Unstoppable => "unstoppable",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "First Blood",
            AchievementId::Survivor => "Survivor",
            AchievementId::AcePilot => "Ace Pilot",
            AchievementId::PowerHungry => "Power Hungry",
            AchievementId::Unstoppable => "Unstoppable",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "Destroy your first enemy ship",
            AchievementId::Survivor => "Reach level 5",
            AchievementId::AcePilot => "Score over 10,000 points",
            AchievementId::PowerHungry => "Hold a shield and triple shot at once",
            AchievementId::Unstoppable => "Destroy 50 enemies without taking damage",
        }
    }
}

/// One achievement slot. `unlocked` is monotonic: once set it stays set for
/// the rest of the process, across any number of resets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub unlocked: bool,
}

/// One-shot outputs for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Fire-and-forget sound cue
    Sound(SoundCue),
    AchievementUnlocked(AchievementId),
    LevelUp(u32),
    GameOver { score: u32 },
}

/// Complete simulation state (deterministic given seed + input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub level: u32,
    /// Enemies destroyed since the player last lost health
    pub kill_streak: u32,
    /// Frame clock in ms; advances only while Playing
    pub time_ms: f64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub nebulae: Vec<Nebula>,
    pub achievements: [Achievement; 5],
    pub notices: Notices,
    /// Render offset magnitude; decays linearly toward zero
    pub screen_shake: f32,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session on the title screen.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            difficulty: Difficulty::default(),
            score: 0,
            level: 1,
            kill_streak: 0,
            time_ms: 0.0,
            player: Player::spawn(&Difficulty::default().profile()),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            nebulae: Vec::new(),
            achievements: AchievementId::ALL.map(|id| Achievement {
                id,
                unlocked: false,
            }),
            notices: Notices::default(),
            screen_shake: 0.0,
            events: Vec::new(),
        };
        spawn::seed_backdrop(&mut state);
        state
    }

    /// Title screen -> difficulty menu (also honored from game over).
    pub fn open_difficulty_select(&mut self) {
        match self.phase {
            GamePhase::Start | GamePhase::GameOver => {
                self.phase = GamePhase::DifficultySelect;
            }
            _ => {}
        }
    }

    /// Start (or restart) a run with the chosen difficulty. Only honored
    /// from the difficulty menu or the game-over screen; anywhere else the
    /// command is dropped.
    pub fn start_game(&mut self, difficulty: Difficulty) {
        match self.phase {
            GamePhase::DifficultySelect | GamePhase::GameOver => self.reset(difficulty),
            _ => {}
        }
    }

    /// Difficulty selection by key; unknown keys fall back to Normal.
    pub fn start_game_with_key(&mut self, key: &str) {
        let difficulty = Difficulty::from_key(key).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {key:?}, falling back to normal");
            Difficulty::default()
        });
        self.start_game(difficulty);
    }

    /// Playing <-> Paused toggle; ignored anywhere else.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Abort to the title screen from any state. Entity state stays frozen
    /// until the next run resets it.
    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Start;
    }

    /// Rebuild the run from the difficulty profile. Achievements and the
    /// backdrop survive; everything else starts over.
    fn reset(&mut self, difficulty: Difficulty) {
        let profile = difficulty.profile();
        self.difficulty = difficulty;
        self.player = Player::spawn(&profile);
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.score = 0;
        self.level = 1;
        self.kill_streak = 0;
        self.time_ms = 0.0;
        self.screen_shake = 0.0;
        self.notices.clear();
        self.events.clear();
        self.phase = GamePhase::Playing;
        log::info!("New run started on {} difficulty", difficulty.as_str());
    }

    /// Idempotent unlock: already-unlocked ids are a no-op and emit nothing.
    pub fn unlock_achievement(&mut self, id: AchievementId) {
        let Some(entry) = self.achievements.iter_mut().find(|a| a.id == id) else {
            return;
        };
        if entry.unlocked {
            return;
        }
        entry.unlocked = true;
        self.notices.announce_achievement(id);
        self.events.push(GameEvent::AchievementUnlocked(id));
        log::info!("Achievement unlocked: {}", id.key());
    }

    /// Drain the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_key_parsing() {
        assert_eq!(Difficulty::from_key("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_key("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_key("medium"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_key("nightmare"), None);
    }

    #[test]
    fn unknown_difficulty_key_falls_back_to_normal() {
        let mut state = GameState::new(7);
        state.open_difficulty_select();
        state.start_game_with_key("nightmare");
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty, Difficulty::Normal);
        assert_eq!(state.player.max_health, 3);
    }

    #[test]
    fn hard_reset_uses_hard_profile() {
        let mut state = GameState::new(7);
        state.open_difficulty_select();
        state.start_game(Difficulty::Hard);

        assert_eq!(state.player.health, 2);
        assert_eq!(state.player.max_health, 2);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn reset_preserves_achievements_and_backdrop() {
        let mut state = GameState::new(7);
        state.open_difficulty_select();
        state.start_game(Difficulty::Normal);
        state.unlock_achievement(AchievementId::FirstBlood);
        let star_count = state.stars.len();

        state.phase = GamePhase::GameOver;
        state.start_game(Difficulty::Easy);

        assert!(state.achievements[0].unlocked);
        assert_eq!(state.stars.len(), star_count);
        assert_eq!(state.player.max_health, 5);
    }

    #[test]
    fn start_game_ignored_outside_menu_and_game_over() {
        let mut state = GameState::new(7);
        // Still on the title screen
        state.start_game(Difficulty::Hard);
        assert_eq!(state.phase, GamePhase::Start);

        state.open_difficulty_select();
        state.start_game(Difficulty::Hard);
        assert_eq!(state.phase, GamePhase::Playing);

        // Mid-run restart is dropped too
        state.start_game(Difficulty::Easy);
        assert_eq!(state.difficulty, Difficulty::Hard);
    }

    #[test]
    fn pause_toggle_only_while_running() {
        let mut state = GameState::new(7);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Start);

        state.open_difficulty_select();
        state.start_game(Difficulty::Normal);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut state = GameState::new(7);
        state.unlock_achievement(AchievementId::AcePilot);
        let first = state.take_events();
        assert_eq!(
            first,
            vec![GameEvent::AchievementUnlocked(AchievementId::AcePilot)]
        );

        state.unlock_achievement(AchievementId::AcePilot);
        assert!(state.take_events().is_empty());
        assert_eq!(
            state
                .achievements
                .iter()
                .filter(|a| a.unlocked)
                .count(),
            1
        );
    }

    #[test]
    fn enemy_kind_unlocks_by_level() {
        assert_eq!(EnemyKind::unlocked_at(1), &[EnemyKind::Basic]);
        assert_eq!(
            EnemyKind::unlocked_at(2),
            &[EnemyKind::Basic, EnemyKind::Fast]
        );
        assert_eq!(EnemyKind::unlocked_at(3).len(), 3);
        assert_eq!(EnemyKind::unlocked_at(9).len(), 3);
    }

    #[test]
    fn return_to_menu_from_anywhere() {
        let mut state = GameState::new(7);
        state.open_difficulty_select();
        state.start_game(Difficulty::Normal);
        state.toggle_pause();
        state.return_to_menu();
        assert_eq!(state.phase, GamePhase::Start);
    }
}

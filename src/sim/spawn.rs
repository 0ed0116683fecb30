//! Entity spawning: enemies, power-up drops, explosion bursts, backdrop
//!
//! All randomness comes from the session RNG in `GameState`, so two runs
//! with the same seed and inputs produce the same spawns.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Enemy, EnemyKind, GameState, MAX_PARTICLES, Nebula, Particle, PowerUp, PowerUpKind, Star,
};
use crate::consts::*;

/// Roll the per-step spawn chance: base rate from the difficulty profile
/// plus 0.005 per level.
pub fn maybe_spawn_enemy(state: &mut GameState) {
    let chance = state.difficulty.profile().spawn_rate + state.level as f64 * 0.005;
    if state.rng.random_bool(chance.min(1.0)) {
        spawn_enemy(state);
    }
}

/// Spawn an enemy of a level-appropriate kind at a random column just above
/// the top edge. Speed scales with level, then the difficulty multiplier.
pub fn spawn_enemy(state: &mut GameState) {
    let kinds = EnemyKind::unlocked_at(state.level);
    let kind = kinds[state.rng.random_range(0..kinds.len())];
    let stats = kind.stats();

    let x = state.rng.random_range(0.0..WORLD_WIDTH - stats.size.x);
    let speed =
        (stats.speed + state.level as f32 * 0.2) * state.difficulty.profile().enemy_speed_mult;

    state.enemies.push(Enemy {
        kind,
        pos: Vec2::new(x, -stats.size.y),
        size: stats.size,
        speed,
        health: stats.health,
        max_health: stats.health,
        points: stats.points,
        alive: true,
    });
}

/// Drop a power-up of a uniformly random kind where an enemy died.
pub fn spawn_power_up(state: &mut GameState, pos: Vec2) {
    let kind = if state.rng.random_bool(0.5) {
        PowerUpKind::TripleShot
    } else {
        PowerUpKind::Shield
    };
    state.power_ups.push(PowerUp {
        kind,
        pos,
        size: Vec2::splat(POWERUP_SIZE),
        speed: POWERUP_FALL_SPEED,
        alive: true,
    });
}

/// Three-layer explosion burst: white core flash, colored debris sparks,
/// slow lingering smoke. Also kicks the screen shake to its full magnitude
/// (reset, not accumulated).
pub fn spawn_explosion(state: &mut GameState, at: Vec2, color: u32, debris: usize) {
    state.screen_shake = SHAKE_ON_EXPLOSION;

    // Core flash: concentric zero-velocity discs with a short fuse
    for i in 0..5 {
        push_particle(
            state,
            Particle {
                pos: at,
                vel: Vec2::ZERO,
                life: 1.0,
                max_life: 0.3,
                friction: 1.0,
                size: (i + 1) as f32 * 15.0,
                color: 0xffffff,
                alpha: Some(0.8),
            },
        );
    }

    // Debris sparks, alternating between the entity color and white
    for i in 0..debris {
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(4.0..12.0);
        let max_life = state.rng.random_range(0.4..1.2);
        let size = state.rng.random_range(2.0..7.0);
        push_particle(
            state,
            Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                max_life,
                friction: 0.95,
                size,
                color: if i % 2 == 0 { color } else { 0xffffff },
                alpha: None,
            },
        );
    }

    // Smoke
    for _ in 0..10 {
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(1.0..3.0);
        let max_life = state.rng.random_range(1.0..2.5);
        let size = state.rng.random_range(5.0..15.0);
        push_particle(
            state,
            Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                max_life,
                friction: 0.98,
                size,
                color: 0x4b5563,
                alpha: None,
            },
        );
    }
}

fn push_particle(state: &mut GameState, particle: Particle) {
    if state.particles.len() < MAX_PARTICLES {
        state.particles.push(particle);
    }
}

/// Seed the parallax starfield and nebula blobs. Runs once per session
/// construction; resets leave the backdrop alone.
pub fn seed_backdrop(state: &mut GameState) {
    state.stars.clear();
    for _ in 0..STAR_COUNT {
        let layer = state.rng.random_range(0..3u8);
        let (size, speed) = match layer {
            0 => (1.0, 0.5),
            1 => (2.0, 1.2),
            _ => (3.0, 2.5),
        };
        state.stars.push(Star {
            pos: Vec2::new(
                state.rng.random_range(0.0..WORLD_WIDTH),
                state.rng.random_range(0.0..WORLD_HEIGHT),
            ),
            size,
            speed,
            layer,
        });
    }

    const NEBULA_COLORS: [u32; 3] = [0x3b82f6, 0x8b5cf6, 0xec4899];
    state.nebulae.clear();
    for _ in 0..NEBULA_COUNT {
        let color = NEBULA_COLORS[state.rng.random_range(0..NEBULA_COLORS.len())];
        state.nebulae.push(Nebula {
            pos: Vec2::new(
                state.rng.random_range(0.0..WORLD_WIDTH),
                state.rng.random_range(0.0..WORLD_HEIGHT),
            ),
            size: state.rng.random_range(200.0..500.0),
            vel: Vec2::new(
                state.rng.random_range(-0.1..0.1),
                state.rng.random_range(0.1..0.3),
            ),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Difficulty;

    fn playing_state(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(42);
        state.open_difficulty_select();
        state.start_game(difficulty);
        state
    }

    #[test]
    fn level_one_spawns_only_basic() {
        let mut state = playing_state(Difficulty::Normal);
        for _ in 0..50 {
            spawn_enemy(&mut state);
        }
        assert!(state.enemies.iter().all(|e| e.kind == EnemyKind::Basic));
    }

    #[test]
    fn enemies_start_above_the_world() {
        let mut state = playing_state(Difficulty::Normal);
        spawn_enemy(&mut state);
        let enemy = &state.enemies[0];
        assert_eq!(enemy.pos.y, -enemy.size.y);
        assert!(enemy.pos.x >= 0.0);
        assert!(enemy.pos.x + enemy.size.x <= WORLD_WIDTH);
    }

    #[test]
    fn enemy_speed_scales_with_level_and_difficulty() {
        let mut state = playing_state(Difficulty::Hard);
        state.level = 4;
        for _ in 0..50 {
            spawn_enemy(&mut state);
        }
        for enemy in &state.enemies {
            let base = enemy.kind.stats().speed;
            let expected = (base + 4.0 * 0.2) * 1.3;
            assert!((enemy.speed - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn power_up_drops_at_given_point() {
        let mut state = playing_state(Difficulty::Normal);
        spawn_power_up(&mut state, Vec2::new(123.0, 456.0));
        let pu = &state.power_ups[0];
        assert_eq!(pu.pos, Vec2::new(123.0, 456.0));
        assert_eq!(pu.speed, POWERUP_FALL_SPEED);
        assert!(matches!(
            pu.kind,
            PowerUpKind::TripleShot | PowerUpKind::Shield
        ));
    }

    #[test]
    fn explosion_bursts_and_shakes() {
        let mut state = playing_state(Difficulty::Normal);
        spawn_explosion(&mut state, Vec2::new(400.0, 500.0), 0xef4444, 20);
        // 5 flash + 20 debris + 10 smoke
        assert_eq!(state.particles.len(), 35);
        assert_eq!(state.screen_shake, SHAKE_ON_EXPLOSION);

        let flashes = state
            .particles
            .iter()
            .filter(|p| p.vel == Vec2::ZERO)
            .count();
        assert_eq!(flashes, 5);
    }

    #[test]
    fn particle_cap_holds() {
        let mut state = playing_state(Difficulty::Normal);
        for _ in 0..30 {
            spawn_explosion(&mut state, Vec2::new(400.0, 500.0), 0xffffff, 20);
        }
        assert!(state.particles.len() <= MAX_PARTICLES);
    }

    #[test]
    fn backdrop_counts() {
        let state = GameState::new(1);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert_eq!(state.nebulae.len(), NEBULA_COUNT);
        assert!(state.stars.iter().all(|s| s.layer < 3));
    }
}

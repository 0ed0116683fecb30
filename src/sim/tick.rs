//! Fixed timestep simulation step
//!
//! One call advances the world by one 16.67 ms step, in a fixed order:
//! player movement, collisions, power-ups, particles, level check, spawn.
//! The order is load-bearing: an escape penalty and a level threshold can
//! land in the same step, and reordering would shift when levels and
//! achievements fire.

use glam::Vec2;
use rand::Rng;

use super::collision::{clamp_to_world, outside_world};
use super::spawn;
use super::state::{AchievementId, Bullet, GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;
use crate::consts::*;

/// Held movement directions. Diagonals allowed; no normalization, so
/// diagonal movement is faster, as arcade tradition demands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Input commands for a single step (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch aim target in world coordinates; overrides keys
    pub aim: Option<Vec2>,
    /// Currently held movement keys
    pub held: HeldKeys,
    /// One-shot fire request; the caller clears it after the step
    pub fire: bool,
}

/// Advance the game state by one fixed timestep of `dt_ms` milliseconds.
///
/// Anything but `Playing` freezes the world entirely, timers included.
/// Input arriving in a frozen phase is dropped, not buffered.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ms += dt_ms as f64;

    // Shake decays linearly; a fresh explosion resets it to full, never adds
    if state.screen_shake > 0.0 {
        state.screen_shake = (state.screen_shake - SHAKE_DECAY_PER_STEP).max(0.0);
    }

    move_player(state, input);
    advance_timers(state, dt_ms);
    if input.fire {
        fire(state);
    }
    scroll_backdrop(state);
    advance_bullets(state);
    resolve_enemies(state);
    resolve_power_ups(state);
    advance_particles(state, dt_ms);
    check_level_up(state);
    spawn::maybe_spawn_enemy(state);
    state.notices.advance(dt_ms);
}

/// Pointer aim wins over keys: the ship eases toward the target with
/// exponential smoothing. Either way the ship ends the step inside the
/// world rectangle.
fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    if let Some(target) = input.aim {
        let target = target - player.size * 0.5;
        player.pos += (target - player.pos) * POINTER_SMOOTHING;
    } else {
        let held = input.held;
        if held.left {
            player.pos.x -= player.speed;
        }
        if held.right {
            player.pos.x += player.speed;
        }
        if held.up {
            player.pos.y -= player.speed;
        }
        if held.down {
            player.pos.y += player.speed;
        }
    }
    player.pos = clamp_to_world(player.pos, player.size);
}

fn advance_timers(state: &mut GameState, dt_ms: f32) {
    state.player.invincible.advance(dt_ms);
    state.player.triple_shot.advance(dt_ms);
}

/// Spawn bullets for a fire request. One straight bullet from the nose, or
/// three while the triple-shot window runs (center straight, wing bullets
/// fanned out by the spread angle).
fn fire(state: &mut GameState) {
    use std::f32::consts::FRAC_PI_2;

    let size = Vec2::new(BULLET_WIDTH, BULLET_HEIGHT);
    let ship = &state.player;
    let nose = Vec2::new(
        ship.pos.x + ship.size.x / 2.0 - BULLET_WIDTH / 2.0,
        ship.pos.y,
    );
    let wings = (
        ship.pos,
        Vec2::new(ship.pos.x + ship.size.x, ship.pos.y),
    );
    let triple = ship.triple_shot.active();

    let bullet = |pos: Vec2, angle: Option<f32>| Bullet {
        pos,
        size,
        speed: BULLET_SPEED,
        damage: BULLET_DAMAGE,
        player_owned: true,
        angle,
        alive: true,
    };

    state.bullets.push(bullet(nose, None));
    if triple {
        state
            .bullets
            .push(bullet(wings.0, Some(-FRAC_PI_2 - TRIPLE_SHOT_SPREAD)));
        state
            .bullets
            .push(bullet(wings.1, Some(-FRAC_PI_2 + TRIPLE_SHOT_SPREAD)));
    }
    state.events.push(GameEvent::Sound(SoundCue::Shoot));
}

/// Scroll the starfield down and drift the nebulae; both wrap back to a
/// fresh random column when they leave the bottom.
fn scroll_backdrop(state: &mut GameState) {
    let GameState {
        stars,
        nebulae,
        rng,
        ..
    } = state;

    for star in stars.iter_mut() {
        star.pos.y += star.speed;
        if star.pos.y > WORLD_HEIGHT {
            star.pos.y = 0.0;
            star.pos.x = rng.random_range(0.0..WORLD_WIDTH);
        }
    }
    for nebula in nebulae.iter_mut() {
        nebula.pos += nebula.vel;
        if nebula.pos.y > WORLD_HEIGHT + nebula.size {
            nebula.pos.y = -nebula.size;
            nebula.pos.x = rng.random_range(0.0..WORLD_WIDTH);
        }
    }
}

fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        match bullet.angle {
            Some(angle) => {
                bullet.pos.x += angle.cos() * bullet.speed;
                bullet.pos.y += angle.sin() * bullet.speed;
            }
            None => bullet.pos.y -= bullet.speed,
        }
        if outside_world(bullet.pos, BULLET_CULL_MARGIN) {
            bullet.alive = false;
        }
    }
    state.bullets.retain(|b| b.alive);
}

/// Advance enemies and resolve their collisions. Per enemy, in order:
/// player contact, bottom escape, then bullet hits. A contacted or escaped
/// enemy takes no further tests this step.
fn resolve_enemies(state: &mut GameState) {
    let mut explosions: Vec<(Vec2, u32)> = Vec::new();
    let mut drops: Vec<Vec2> = Vec::new();
    let mut unlocks: Vec<AchievementId> = Vec::new();
    let mut game_over = false;

    {
        let GameState {
            player,
            enemies,
            bullets,
            events,
            rng,
            score,
            kill_streak,
            ..
        } = state;

        for enemy in enemies.iter_mut() {
            enemy.pos.y += enemy.speed;

            if !player.is_invincible() && player.aabb().overlaps(&enemy.aabb()) {
                events.push(GameEvent::Sound(SoundCue::Hit));
                if player.shield_active {
                    // One-shot shield soaks the hit; the streak survives
                    player.shield_active = false;
                    explosions.push((player.aabb().center(), 0x8b5cf6));
                } else {
                    player.health -= 1;
                    *kill_streak = 0;
                    player.invincible.start(INVINCIBLE_MS);
                    explosions.push((player.aabb().center(), 0xffffff));
                    if player.health <= 0 {
                        game_over = true;
                    }
                }
                enemy.alive = false;
                continue;
            }

            if enemy.pos.y > WORLD_HEIGHT {
                enemy.alive = false;
                *score = score.saturating_sub(ESCAPE_PENALTY);
                continue;
            }

            // Full pairwise scan; each bullet lands at most once
            for bullet in bullets.iter_mut() {
                if !bullet.alive || !bullet.player_owned {
                    continue;
                }
                if !bullet.aabb().overlaps(&enemy.aabb()) {
                    continue;
                }
                enemy.health -= bullet.damage;
                bullet.alive = false;
                events.push(GameEvent::Sound(SoundCue::Hit));

                if enemy.health <= 0 {
                    enemy.alive = false;
                    events.push(GameEvent::Sound(SoundCue::Explosion));
                    explosions.push((enemy.aabb().center(), enemy.color()));
                    *score += enemy.points;
                    if *score >= ACE_PILOT_SCORE {
                        unlocks.push(AchievementId::AcePilot);
                    }
                    unlocks.push(AchievementId::FirstBlood);
                    *kill_streak += 1;
                    if *kill_streak >= UNSTOPPABLE_KILLS {
                        unlocks.push(AchievementId::Unstoppable);
                    }
                    if rng.random_bool(POWERUP_DROP_CHANCE) {
                        drops.push(enemy.pos);
                    }
                    break;
                }
            }
        }

        enemies.retain(|e| e.alive);
        bullets.retain(|b| b.alive);
    }

    for id in unlocks {
        state.unlock_achievement(id);
    }
    for (at, color) in explosions {
        spawn::spawn_explosion(state, at, color, 20);
    }
    for at in drops {
        spawn::spawn_power_up(state, at);
    }
    if game_over {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over at {} points, level {}", state.score, state.level);
    }
}

/// Advance power-ups and apply pickups. Effects land instantly: triple shot
/// refreshes its full window, shield arms its one-shot flag.
fn resolve_power_ups(state: &mut GameState) {
    use super::state::PowerUpKind;

    let mut power_hungry = false;
    {
        let GameState {
            player,
            power_ups,
            events,
            ..
        } = state;

        for pu in power_ups.iter_mut() {
            pu.pos.y += pu.speed;

            if player.aabb().overlaps(&pu.aabb()) {
                match pu.kind {
                    PowerUpKind::TripleShot => player.triple_shot.start(TRIPLE_SHOT_MS),
                    PowerUpKind::Shield => player.shield_active = true,
                }
                if player.shield_active && player.triple_shot.active() {
                    power_hungry = true;
                }
                events.push(GameEvent::Sound(SoundCue::Powerup));
                pu.alive = false;
                continue;
            }
            if pu.pos.y > WORLD_HEIGHT {
                pu.alive = false;
            }
        }
        power_ups.retain(|p| p.alive);
    }
    if power_hungry {
        state.unlock_achievement(AchievementId::PowerHungry);
    }
}

/// Decorative physics: drift, friction, life decay in wall-clock seconds.
fn advance_particles(state: &mut GameState, dt_ms: f32) {
    let dt_secs = dt_ms / 1000.0;
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.vel *= particle.friction;
        particle.life -= dt_secs;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Level threshold check. Leveling clears the wave and shows the banner.
fn check_level_up(state: &mut GameState) {
    if state.score < state.level * LEVEL_SCORE_STEP {
        return;
    }
    state.level += 1;
    if state.level == 5 {
        state.unlock_achievement(AchievementId::Survivor);
    }
    state.notices.announce_level_up();
    state.events.push(GameEvent::LevelUp(state.level));
    state.enemies.clear();
    log::info!("Reached level {} at {} points", state.level, state.score);
}

//! Countdown-driven transient effects
//!
//! Invincibility frames, the triple-shot window and the HUD banners are all
//! the same mechanism: a duration that runs down with the fixed step and a
//! predicate on whether it is still running. `Countdown` is that mechanism,
//! shared so the decrement/compare logic exists exactly once.

use serde::{Deserialize, Serialize};

use super::state::AchievementId;
use crate::consts::{ACHIEVEMENT_BANNER_MS, LEVEL_BANNER_MS};

/// A millisecond countdown advanced by the fixed per-step delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: f32,
}

impl Countdown {
    /// An expired countdown.
    pub const fn idle() -> Self {
        Self { remaining_ms: 0.0 }
    }

    /// (Re)start the countdown. Restarting refreshes the duration, it does
    /// not stack.
    pub fn start(&mut self, duration_ms: f32) {
        self.remaining_ms = duration_ms;
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = 0.0;
    }

    pub fn active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms.max(0.0)
    }

    /// Advance by `dt_ms`. Returns true on the step the countdown crosses
    /// zero, so callers can run their one-shot expiry action.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if self.remaining_ms <= 0.0 {
            return false;
        }
        self.remaining_ms -= dt_ms;
        self.remaining_ms <= 0.0
    }
}

/// Transient HUD notification state, expired against the frame clock.
///
/// Resetting the session drops pending banners, so a stale "level up" can
/// never fire into a fresh run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notices {
    /// Most recently unlocked achievement, shown until its banner expires
    pub last_achievement: Option<AchievementId>,
    achievement_banner: Countdown,
    level_banner: Countdown,
}

impl Notices {
    pub fn announce_achievement(&mut self, id: AchievementId) {
        self.last_achievement = Some(id);
        self.achievement_banner.start(ACHIEVEMENT_BANNER_MS);
    }

    pub fn announce_level_up(&mut self) {
        self.level_banner.start(LEVEL_BANNER_MS);
    }

    pub fn level_banner_visible(&self) -> bool {
        self.level_banner.active()
    }

    /// Run down both banners; clears the achievement slot on expiry.
    pub fn advance(&mut self, dt_ms: f32) {
        if self.achievement_banner.advance(dt_ms) {
            self.last_achievement = None;
        }
        self.level_banner.advance(dt_ms);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

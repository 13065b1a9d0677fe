//! Duck variants and their resolution behavior
//!
//! The lifecycle controller decides *when* a duck resolves; the behavior
//! decides *what* resolving means. Adding a duck kind is one enum variant,
//! one `Behavior` impl, one dispatch arm - the timing and hit arbitration
//! in `duck.rs` stay untouched.

use glam::Vec2;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::duck::Duck;
use super::services::{EffectKind, ScoreEvent, Services};
use crate::consts::{ROTATION_JITTER, SCALE_JITTER};

/// Behavioral category of a duck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuckKind {
    /// Clicking scores points; letting it expire is merely a miss
    Reward,
    /// Clicking is punished; natural expiry is free
    Decoy,
}

impl DuckKind {
    /// Dispatch table: kind to its stateless behavior.
    pub(crate) fn behavior(self) -> &'static dyn Behavior {
        match self {
            DuckKind::Reward => &RewardBehavior,
            DuckKind::Decoy => &DecoyBehavior,
        }
    }
}

/// Variant hook set.
///
/// `on_hit` and `on_expired` have no defaults: every kind must define its
/// click and expiry outcomes. The remaining hooks default to no-ops.
pub trait Behavior {
    /// The duck was clicked in time.
    fn on_hit(&self, duck: &mut Duck, services: &mut Services<'_>);

    /// The countdown ran out without a click.
    fn on_expired(&self, duck: &mut Duck, services: &mut Services<'_>);

    /// Spawn-time customization. Cosmetic only: must not touch points,
    /// lifetime, or position.
    fn on_spawned(&self, _duck: &mut Duck, _rng: &mut dyn RngCore) {}

    /// Remaining lifetime crossed the warning threshold. Cosmetic only.
    fn on_lifetime_low(&self, _duck: &mut Duck) {}

    /// Per-tick movement; the default duck sits still.
    fn on_movement(&self, _duck: &mut Duck, _dt: f32) {}
}

/// Cosmetic spawn jitter shared by the stock variants.
fn jitter(duck: &mut Duck, rng: &mut dyn RngCore) {
    duck.scale = 1.0 + rng.random_range(-SCALE_JITTER..=SCALE_JITTER);
    duck.rotation = rng.random_range(-ROTATION_JITTER..=ROTATION_JITTER);
}

/// Beneficial duck: points on click, harmless miss on expiry.
pub struct RewardBehavior;

impl Behavior for RewardBehavior {
    fn on_hit(&self, duck: &mut Duck, services: &mut Services<'_>) {
        services.record(ScoreEvent::RewardHit {
            points: duck.point_value,
        });
        services.play(EffectKind::Success, duck.pos);
    }

    fn on_expired(&self, _duck: &mut Duck, services: &mut Services<'_>) {
        services.record(ScoreEvent::RewardMissed);
    }

    fn on_spawned(&self, duck: &mut Duck, rng: &mut dyn RngCore) {
        jitter(duck, rng);
        duck.tag = "duck";
    }

    fn on_lifetime_low(&self, duck: &mut Duck) {
        duck.hurry = true;
    }
}

/// Adversarial duck: punished click, free expiry, optional sway.
pub struct DecoyBehavior;

impl Behavior for DecoyBehavior {
    fn on_hit(&self, duck: &mut Duck, services: &mut Services<'_>) {
        services.record(ScoreEvent::DecoyHit {
            penalty_secs: duck.penalty_secs,
        });
        services.play(EffectKind::Penalty, duck.pos);
    }

    fn on_expired(&self, _duck: &mut Duck, services: &mut Services<'_>) {
        // Explicitly no penalty: only clicking a decoy is punished
        services.record(ScoreEvent::DecoyExpired);
    }

    fn on_spawned(&self, duck: &mut Duck, rng: &mut dyn RngCore) {
        jitter(duck, rng);
        duck.tag = "decoy";
    }

    fn on_lifetime_low(&self, duck: &mut Duck) {
        duck.hurry = true;
    }

    /// Placeholder oscillation around the spawn anchor, horizontal only.
    fn on_movement(&self, duck: &mut Duck, dt: f32) {
        if duck.sway_speed <= 0.0 {
            return;
        }
        duck.sway_phase += duck.sway_speed * dt;
        let offset = duck.sway_phase.sin() * duck.sway_amplitude;
        duck.pos = duck.anchor() + Vec2::new(offset, 0.0);
    }
}

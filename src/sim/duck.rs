//! Duck lifecycle state machine
//!
//! One duck = one independent state machine: spawn -> countdown -> (hit |
//! expire) -> terminal effects -> disposal. Timing and hit arbitration live
//! here and only here; what an outcome *means* is the variant's business
//! (see `variant.rs`).

use glam::Vec2;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::services::Services;
use super::variant::DuckKind;
use crate::consts::LOW_LIFETIME_WARN;
use crate::tuning::DuckTuning;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuckState {
    /// Constructed but not yet activated - ticks are no-ops
    Spawned,
    /// Counting down, accepting hits
    Active,
    /// Outcome finalized - inert forever
    Resolved,
}

/// Why a duck left `Active`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveCause {
    Hit,
    Expiry,
}

/// A single click-target duck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duck {
    /// Host-allocated identity, echoed back through the disposal sink
    pub id: u32,
    pub kind: DuckKind,
    /// Points awarded if this duck resolves as a rewarded hit
    pub point_value: u32,
    /// Seconds deducted if this duck is a decoy and gets clicked
    pub penalty_secs: f32,
    pub total_lifetime: f32,
    /// Mutated only by `tick`; non-increasing while `Active`
    pub remaining_lifetime: f32,
    pub state: DuckState,
    /// Latched on the first accepted hit; the double-resolution guard
    pub hit: bool,
    pub pos: Vec2,
    /// Sway speed in radians/sec (0 = stationary, the default)
    pub sway_speed: f32,
    pub sway_amplitude: f32,
    pub sway_phase: f32,
    /// Cosmetic scale set by the spawn hook
    pub scale: f32,
    /// Cosmetic rotation set by the spawn hook
    pub rotation: f32,
    /// Variant identity tag for downstream identification
    #[serde(skip)]
    pub tag: &'static str,
    /// Low-lifetime warning flag for renderers (wing-flap animation etc.)
    pub hurry: bool,
    /// Spawn position; sway oscillates around this
    anchor: Vec2,
    /// Low-lifetime hook latch
    low_warned: bool,
}

impl Duck {
    /// Construct inert, in `Spawned`. Call [`Duck::activate`] exactly once
    /// before ticking; until then every tick is a no-op.
    pub fn new(id: u32, kind: DuckKind, pos: Vec2, tuning: &DuckTuning) -> Self {
        Self {
            id,
            kind,
            point_value: tuning.default_point_value,
            penalty_secs: tuning.decoy_penalty_secs,
            total_lifetime: tuning.default_lifetime,
            remaining_lifetime: tuning.default_lifetime,
            state: DuckState::Spawned,
            hit: false,
            pos,
            sway_speed: tuning.decoy_sway_speed,
            sway_amplitude: tuning.decoy_sway_amplitude,
            sway_phase: 0.0,
            scale: 1.0,
            rotation: 0.0,
            tag: "",
            hurry: false,
            anchor: pos,
            low_warned: false,
        }
    }

    /// Activate the duck: apply spawner overrides, enter `Active`, run the
    /// variant's spawn hook.
    ///
    /// Overrides of `None` (or non-positive values inside `Some`) fall back
    /// to the tuning defaults. Calling on anything but a freshly spawned
    /// duck is a logged no-op.
    pub fn activate(&mut self, lifetime: Option<f32>, points: Option<u32>, rng: &mut dyn RngCore) {
        if self.state != DuckState::Spawned {
            log::warn!("duck {} activated twice - ignoring", self.id);
            return;
        }
        if let Some(lifetime) = lifetime.filter(|l| *l > 0.0) {
            self.total_lifetime = lifetime;
            self.remaining_lifetime = lifetime;
        }
        if let Some(points) = points.filter(|p| *p > 0) {
            self.point_value = points;
        }
        self.state = DuckState::Active;
        self.kind.behavior().on_spawned(self, rng);
        log::debug!(
            "duck {} ({:?}) active: {:.1}s, {} pts",
            self.id,
            self.kind,
            self.remaining_lifetime,
            self.point_value
        );
    }

    /// Spawn position the sway oscillates around.
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Advance one frame. No-op unless `Active` and unhit.
    ///
    /// Order within a tick: countdown, hurry warning, movement, hit
    /// arbitration, expiry. A hit accepted this tick wins over an expiry
    /// computed this tick.
    pub fn tick(&mut self, dt: f32, services: &mut Services<'_>) {
        if self.state != DuckState::Active || self.hit {
            return;
        }

        self.remaining_lifetime -= dt;

        // Hurry warning, first crossing only
        if !self.low_warned && self.remaining_lifetime <= LOW_LIFETIME_WARN {
            self.low_warned = true;
            log::debug!("duck {} lifetime low", self.id);
            self.kind.behavior().on_lifetime_low(self);
        }

        // Movement before arbitration so the hit-test sees this frame's position
        self.kind.behavior().on_movement(self, dt);

        // Hit arbitration: the poll path
        if services.struck(self) && self.accept_hit() {
            self.resolve(ResolveCause::Hit, services);
            return;
        }

        if self.remaining_lifetime <= 0.0 {
            self.resolve(ResolveCause::Expiry, services);
        }
    }

    /// The host-push hit path (legacy collision callbacks and the like).
    ///
    /// Shares the acceptance guard with the poll inside [`Duck::tick`]:
    /// whichever path observes the duck first wins, the loser is a no-op.
    /// Returns whether the hit was accepted.
    pub fn notify_struck(&mut self, services: &mut Services<'_>) -> bool {
        if !self.accept_hit() {
            return false;
        }
        self.resolve(ResolveCause::Hit, services);
        true
    }

    /// At most one hit per duck, ever.
    fn accept_hit(&mut self) -> bool {
        if self.state != DuckState::Active || self.hit {
            return false;
        }
        self.hit = true;
        true
    }

    /// Finalize the outcome. Exactly one of the variant's hit/expiry hooks
    /// runs, then the host is asked to tear the duck down. Re-entry is a
    /// no-op.
    fn resolve(&mut self, cause: ResolveCause, services: &mut Services<'_>) {
        if self.state == DuckState::Resolved {
            return;
        }
        self.state = DuckState::Resolved;
        log::debug!("duck {} resolved: {:?}", self.id, cause);
        let behavior = self.kind.behavior();
        match cause {
            ResolveCause::Hit => behavior.on_hit(self, services),
            ResolveCause::Expiry => behavior.on_expired(self, services),
        }
        services.dispose(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::services::doubles::{AlwaysStrike, EventLog, Trash};
    use crate::sim::services::ScoreEvent;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn reward(lifetime: f32, points: u32) -> Duck {
        let tuning = DuckTuning::default();
        let mut duck = Duck::new(1, DuckKind::Reward, Vec2::new(10.0, 20.0), &tuning);
        duck.activate(Some(lifetime), Some(points), &mut Pcg32::seed_from_u64(7));
        duck
    }

    #[test]
    fn test_tick_before_activate_is_inert() {
        let tuning = DuckTuning::default();
        let mut duck = Duck::new(1, DuckKind::Reward, Vec2::ZERO, &tuning);

        let mut events = EventLog::default();
        {
            let mut services = Services {
                score: Some(&mut events),
                ..Services::none()
            };
            for _ in 0..100 {
                duck.tick(0.1, &mut services);
            }
        }

        assert_eq!(duck.state, DuckState::Spawned);
        assert_eq!(duck.remaining_lifetime, duck.total_lifetime);
        assert!(events.0.is_empty());
    }

    #[test]
    fn test_activate_twice_is_ignored() {
        let tuning = DuckTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut duck = Duck::new(1, DuckKind::Reward, Vec2::ZERO, &tuning);

        duck.activate(Some(3.0), Some(5), &mut rng);
        duck.activate(Some(99.0), Some(1000), &mut rng);

        assert_eq!(duck.state, DuckState::Active);
        assert_eq!(duck.total_lifetime, 3.0);
        assert_eq!(duck.point_value, 5);
    }

    #[test]
    fn test_nonpositive_overrides_use_defaults() {
        let tuning = DuckTuning::default();
        let mut duck = Duck::new(1, DuckKind::Reward, Vec2::ZERO, &tuning);
        duck.activate(Some(-1.0), Some(0), &mut Pcg32::seed_from_u64(7));

        assert_eq!(duck.total_lifetime, tuning.default_lifetime);
        assert_eq!(duck.point_value, tuning.default_point_value);
    }

    #[test]
    fn test_reward_missed_scenario() {
        // Reward, 5 pts, lifetime 3.0, 31 frames of 0.1, no hit:
        // exactly one miss at cumulative time >= 3.0, one disposal
        let mut duck = reward(3.0, 5);
        let mut events = EventLog::default();
        let mut trash = Trash::default();
        {
            let mut services = Services {
                score: Some(&mut events),
                disposal: Some(&mut trash),
                ..Services::none()
            };
            for _ in 0..31 {
                duck.tick(0.1, &mut services);
            }
        }

        assert_eq!(events.0, vec![ScoreEvent::RewardMissed]);
        assert_eq!(trash.0, vec![1]);
        assert_eq!(duck.state, DuckState::Resolved);
        assert!(!duck.hit);
    }

    #[test]
    fn test_hit_wins_over_same_tick_expiry() {
        // Countdown runs out on the very tick the pointer connects
        let mut duck = reward(0.1, 5);
        let hits = AlwaysStrike;
        let mut events = EventLog::default();
        let mut trash = Trash::default();
        {
            let mut services = Services {
                hits: Some(&hits),
                score: Some(&mut events),
                disposal: Some(&mut trash),
                ..Services::none()
            };
            duck.tick(0.1, &mut services);
            // Resolved ducks must stay silent
            for _ in 0..10 {
                duck.tick(0.1, &mut services);
            }
        }

        assert_eq!(events.0, vec![ScoreEvent::RewardHit { points: 5 }]);
        assert_eq!(trash.0, vec![1]);
        assert!(duck.hit);
    }

    #[test]
    fn test_second_hit_path_is_a_no_op() {
        // Poll accepts this tick; a late fallback push must change nothing
        let mut duck = reward(3.0, 5);
        let hits = AlwaysStrike;
        let mut events = EventLog::default();
        let mut trash = Trash::default();
        {
            let mut services = Services {
                hits: Some(&hits),
                score: Some(&mut events),
                disposal: Some(&mut trash),
                ..Services::none()
            };
            duck.tick(0.1, &mut services);
            assert!(!duck.notify_struck(&mut services));
        }

        assert_eq!(events.0.len(), 1);
        assert_eq!(trash.0.len(), 1);
    }

    #[test]
    fn test_push_path_resolves_without_a_poll() {
        let mut duck = reward(3.0, 7);
        let mut events = EventLog::default();
        {
            let mut services = Services {
                score: Some(&mut events),
                ..Services::none()
            };
            duck.tick(0.1, &mut services);
            assert!(duck.notify_struck(&mut services));
            assert!(!duck.notify_struck(&mut services));
        }

        assert_eq!(events.0, vec![ScoreEvent::RewardHit { points: 7 }]);
        assert_eq!(duck.state, DuckState::Resolved);
    }

    #[test]
    fn test_hurry_warning_fires_once_at_the_crossing() {
        let mut duck = reward(3.0, 5);
        let mut services = Services::none();

        // 3 ticks of 0.5: remaining 1.5, still above the threshold
        for _ in 0..3 {
            duck.tick(0.5, &mut services);
        }
        assert!(!duck.hurry);

        // 4th tick crosses to exactly 1.0
        duck.tick(0.5, &mut services);
        assert!(duck.hurry);

        // Clear the cosmetic flag; the hook must not re-fire
        duck.hurry = false;
        duck.tick(0.5, &mut services);
        assert!(!duck.hurry);
    }

    #[test]
    fn test_no_collaborators_no_crash() {
        let mut duck = reward(0.5, 5);
        let mut services = Services::none();
        for _ in 0..20 {
            duck.tick(0.1, &mut services);
        }
        assert_eq!(duck.state, DuckState::Resolved);
    }

    #[test]
    fn test_position_frozen_after_resolution() {
        let mut duck = Duck::new(9, DuckKind::Decoy, Vec2::new(50.0, 0.0), &DuckTuning::default());
        duck.sway_speed = 3.0;
        duck.activate(Some(10.0), None, &mut Pcg32::seed_from_u64(7));

        let mut services = Services::none();
        for _ in 0..5 {
            duck.tick(0.1, &mut services);
        }
        assert!(duck.notify_struck(&mut services));

        let frozen = duck.pos;
        for _ in 0..20 {
            duck.tick(0.1, &mut services);
        }
        assert_eq!(duck.pos, frozen);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any dt sequence summing past the lifetime expires exactly
            /// once, and never hits.
            #[test]
            fn expiry_fires_exactly_once(dts in prop::collection::vec(0.01f32..0.3, 1..200)) {
                let lifetime: f32 = 2.0;
                let mut duck = reward(lifetime, 5);
                let mut events = EventLog::default();
                {
                    let mut services = Services {
                        score: Some(&mut events),
                        ..Services::none()
                    };
                    for dt in &dts {
                        duck.tick(*dt, &mut services);
                    }
                    // Top up so the cumulative time passes the lifetime
                    // regardless of the drawn sequence
                    let total: f32 = dts.iter().sum();
                    if total < lifetime {
                        let mut left = lifetime - total + 0.05;
                        while left > 0.0 {
                            duck.tick(0.1, &mut services);
                            left -= 0.1;
                        }
                    }
                }

                let misses = events
                    .0
                    .iter()
                    .filter(|e| **e == ScoreEvent::RewardMissed)
                    .count();
                prop_assert_eq!(misses, 1);
                let has_reward_hit = events
                    .0
                    .iter()
                    .any(|e| matches!(e, ScoreEvent::RewardHit { .. }));
                prop_assert!(!has_reward_hit);
            }
        }
    }
}

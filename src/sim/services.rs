//! Collaborator contracts at the host boundary
//!
//! The simulation core never talks to the renderer, audio, input, or the
//! score aggregator directly. Each concern is a narrow trait the host
//! implements; everything outbound is fire-and-forget. A missing
//! collaborator means the feature is disabled, not an error - each call is
//! individually skipped, so a bare `Services::none()` still ticks fine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::duck::Duck;

/// Typed score events reported to the host aggregator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScoreEvent {
    /// Reward duck clicked in time
    RewardHit { points: u32 },
    /// Reward duck expired unclicked - no penalty, just a miss
    RewardMissed,
    /// Decoy clicked - the only punished outcome
    DecoyHit { penalty_secs: f32 },
    /// Decoy expired naturally, no penalty
    DecoyExpired,
}

/// Effect playback requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Feather burst on a rewarded click
    Success,
    /// Smoke puff on a punished click
    Penalty,
}

/// Read-only per-frame hit query (the poll path)
pub trait HitTester {
    /// Was this duck struck by player input this frame?
    fn struck(&self, duck: &Duck) -> bool;
}

/// One-way score/event aggregation
pub trait ScoreSink {
    fn record(&mut self, event: ScoreEvent);
}

/// Fire-and-forget effect playback
pub trait EffectPlayer {
    fn play(&mut self, effect: EffectKind, at: Vec2);
}

/// Removal requests back to the host
pub trait DisposalSink {
    /// The duck is resolved; stop ticking it and tear it down.
    fn dispose(&mut self, id: u32);
}

/// Everything a duck may call out to during a tick.
///
/// Collaborators are injected by the host per call rather than stored on the
/// duck; every one of them is optional.
#[derive(Default)]
pub struct Services<'a> {
    pub hits: Option<&'a dyn HitTester>,
    pub score: Option<&'a mut dyn ScoreSink>,
    pub effects: Option<&'a mut dyn EffectPlayer>,
    pub disposal: Option<&'a mut dyn DisposalSink>,
}

impl<'a> Services<'a> {
    /// No collaborators at all - every outbound call becomes a no-op.
    pub fn none() -> Self {
        Self::default()
    }

    pub(crate) fn struck(&self, duck: &Duck) -> bool {
        self.hits.is_some_and(|h| h.struck(duck))
    }

    pub(crate) fn record(&mut self, event: ScoreEvent) {
        if let Some(score) = self.score.as_deref_mut() {
            score.record(event);
        }
    }

    pub(crate) fn play(&mut self, effect: EffectKind, at: Vec2) {
        if let Some(effects) = self.effects.as_deref_mut() {
            effects.play(effect, at);
        }
    }

    pub(crate) fn dispose(&mut self, id: u32) {
        if let Some(disposal) = self.disposal.as_deref_mut() {
            disposal.dispose(id);
        }
    }
}

//! Quack Attack - a timed duck-popping click-target game core
//!
//! Core modules:
//! - `sim`: Deterministic entity simulation (lifecycle, variants, events)
//! - `tuning`: Data-driven game balance
//!
//! The crate owns exactly one thing: the per-duck lifecycle state machine
//! and its variant dispatch. Rendering, audio, input polling, and scoring
//! aggregation belong to the host engine and are reached through the trait
//! contracts in [`sim::services`].

pub mod sim;
pub mod tuning;

pub use sim::{
    Behavior, DisposalSink, Duck, DuckKind, DuckState, EffectKind, EffectPlayer, HitTester,
    ResolveCause, ScoreEvent, ScoreSink, Services,
};
pub use tuning::DuckTuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz host frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Countdown for a freshly spawned duck (seconds)
    pub const DEFAULT_LIFETIME: f32 = 3.0;
    /// Points awarded for clicking a reward duck
    pub const DEFAULT_POINT_VALUE: u32 = 5;
    /// Seconds deducted for clicking a decoy
    pub const DECOY_PENALTY_SECS: f32 = 2.0;

    /// Remaining lifetime at which the hurry warning fires
    pub const LOW_LIFETIME_WARN: f32 = 1.0;

    /// Decoy sway speed in radians/sec (0 disables movement entirely)
    pub const DECOY_SWAY_SPEED: f32 = 0.0;
    /// Decoy sway amplitude in world units
    pub const DECOY_SWAY_AMPLITUDE: f32 = 12.0;

    /// Spawn-time cosmetic scale jitter (+/- around 1.0)
    pub const SCALE_JITTER: f32 = 0.1;
    /// Spawn-time cosmetic rotation jitter in radians (~5 degrees)
    pub const ROTATION_JITTER: f32 = 0.09;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Each duck is an independent state machine; ducks never reference each
//! other. Cross-duck coordination (aggregate scoring) happens only through
//! one-way notifications into the host's [`services::ScoreSink`].

pub mod duck;
pub mod services;
pub mod variant;

pub use duck::{Duck, DuckState, ResolveCause};
pub use services::{
    DisposalSink, EffectKind, EffectPlayer, HitTester, ScoreEvent, ScoreSink, Services,
};
pub use variant::{Behavior, DuckKind};

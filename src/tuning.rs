//! Data-driven game balance
//!
//! Everything a designer might retune without a recompile lives here. The
//! defaults mirror `consts`; hosts can overlay a JSON document where any
//! missing field keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DECOY_PENALTY_SECS, DECOY_SWAY_AMPLITUDE, DECOY_SWAY_SPEED, DEFAULT_LIFETIME,
    DEFAULT_POINT_VALUE,
};

/// Balance knobs for duck spawning and resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DuckTuning {
    /// Countdown for a freshly spawned duck, seconds
    pub default_lifetime: f32,
    /// Points for clicking a reward duck
    pub default_point_value: u32,
    /// Seconds deducted for clicking a decoy
    pub decoy_penalty_secs: f32,
    /// Decoy sway speed, radians/sec (0 = stationary)
    pub decoy_sway_speed: f32,
    /// Decoy sway amplitude, world units
    pub decoy_sway_amplitude: f32,
}

impl Default for DuckTuning {
    fn default() -> Self {
        Self {
            default_lifetime: DEFAULT_LIFETIME,
            default_point_value: DEFAULT_POINT_VALUE,
            decoy_penalty_secs: DECOY_PENALTY_SECS,
            decoy_sway_speed: DECOY_SWAY_SPEED,
            decoy_sway_amplitude: DECOY_SWAY_AMPLITUDE,
        }
    }
}

impl DuckTuning {
    /// Parse tuning from a JSON document; missing fields keep defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

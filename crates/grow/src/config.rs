//! Tunables for the Grow map module.

use bevy::prelude::*;

/// Score assigned when a suburb identifier is missing or empty.
pub const DEFAULT_SCORE: u8 = 50;

/// Minimum zoom level at which suburb hover highlighting is active.
/// Below this the polygons are too small to hover meaningfully.
pub const HOVER_MIN_ZOOM: f32 = 9.0;

/// Seed for the score jitter RNG when none is configured.
pub const DEFAULT_SCORE_SEED: u64 = 0x70726f70; // "prop"

#[derive(Resource, Debug, Clone, Copy)]
pub struct GrowConfig {
    /// Hover highlighting only engages at or above this zoom.
    pub hover_min_zoom: f32,
    /// Seed for the jitter RNG; fixed so score sequences are reproducible.
    pub score_seed: u64,
}

impl Default for GrowConfig {
    fn default() -> Self {
        Self {
            hover_min_zoom: HOVER_MIN_ZOOM,
            score_seed: DEFAULT_SCORE_SEED,
        }
    }
}

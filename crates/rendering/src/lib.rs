//! The map paint controller: turns suburb scores and interaction state into
//! fill colors on a map surface.
//!
//! The surface itself is a collaborator behind the [`paint::MapSurface`]
//! trait — in production the shell's map canvas, here also an ASCII
//! implementation for headless runs and tests.

use bevy::prelude::*;

use grow::GrowSet;

pub mod ascii_surface;
pub mod color_ramps;
pub mod paint;

/// Registers the repaint system after the Grow input and scoring sets.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<color_ramps::ScoreRampChoice>();
        app.add_systems(Update, paint::repaint_surface.in_set(GrowSet::Paint));
    }
}

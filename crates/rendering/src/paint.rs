//! Paint resolution and the map-surface boundary.
//!
//! [`PaintSpec`] is the single color expression for a frame: which suburb is
//! searched, hovered, or open in detail view, and which ramp colors the rest.
//! Precedence is strict: searched beats hovered beats the detail selection
//! beats the score ramp.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use grow::interaction::{InteractionState, ViewMode};
use grow::suburbs::{SuburbCollection, SuburbFeature, SuburbId};

use crate::color_ramps::{ColorRamp, HighlightPalette, ScoreRampChoice, HIGHLIGHTS};

// ---------------------------------------------------------------------------
// The surface collaborator
// ---------------------------------------------------------------------------

/// The rendering surface the paint controller drives. In production this is
/// the shell's map canvas; tests and the demo binary use the ASCII surface.
///
/// A surface that is not ready yet simply reports `false` and every paint
/// call becomes a no-op — the map degrades to its unstyled state, never an
/// error.
pub trait MapSurface: Send + Sync {
    fn is_ready(&self) -> bool;
    /// Replace the surface's feature collection (geometry and scores).
    fn push_features(&mut self, features: &[SuburbFeature]);
    /// Set the fill color for one feature.
    fn set_feature_fill(&mut self, id: &SuburbId, color: Color);
}

/// The owned handle to the active surface. Explicitly a resource so every
/// consumer receives it by injection instead of reaching for a shared global.
#[derive(Resource)]
pub struct MapSurfaceHandle(pub Box<dyn MapSurface>);

/// Shares one surface between the handle resource and an outside observer
/// (the demo binary printing frames, tests reading fills back).
pub struct SharedSurface<S>(pub Arc<Mutex<S>>);

impl<S> SharedSurface<S> {
    pub fn new(surface: S) -> Self {
        Self(Arc::new(Mutex::new(surface)))
    }
}

// Manual impl: the derive would demand `S: Clone`, but cloning only copies
// the handle.
impl<S> Clone for SharedSurface<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S: MapSurface> MapSurface for SharedSurface<S> {
    fn is_ready(&self) -> bool {
        self.0.lock().map(|s| s.is_ready()).unwrap_or(false)
    }

    fn push_features(&mut self, features: &[SuburbFeature]) {
        if let Ok(mut s) = self.0.lock() {
            s.push_features(features);
        }
    }

    fn set_feature_fill(&mut self, id: &SuburbId, color: Color) {
        if let Ok(mut s) = self.0.lock() {
            s.set_feature_fill(id, color);
        }
    }
}

// ---------------------------------------------------------------------------
// Paint resolution
// ---------------------------------------------------------------------------

/// The color expression for one frame.
pub struct PaintSpec<'a> {
    pub searched: Option<&'a SuburbId>,
    pub hovered: Option<&'a SuburbId>,
    /// Set only while the single-suburb detail view is open.
    pub detail: Option<&'a SuburbId>,
    pub ramp: &'static ColorRamp,
    pub palette: &'static HighlightPalette,
}

impl<'a> PaintSpec<'a> {
    /// Build the frame's expression from interaction state and view mode.
    pub fn for_state(
        state: &'a InteractionState,
        mode: ViewMode,
        ramp: &'static ColorRamp,
    ) -> Self {
        Self {
            searched: state.searched.as_ref(),
            hovered: state.hovered.as_ref(),
            detail: match mode {
                ViewMode::SuburbDetail => state.selected.as_ref(),
                ViewMode::Explore => None,
            },
            ramp,
            palette: &HIGHLIGHTS,
        }
    }

    /// Resolve one feature's fill. Precedence: searched, hovered, detail
    /// selection, then the score ramp.
    pub fn resolve(&self, feature: &SuburbFeature) -> Color {
        if self.searched == Some(&feature.id) {
            return self.palette.searched;
        }
        if self.hovered == Some(&feature.id) {
            return self.palette.hovered;
        }
        if self.detail == Some(&feature.id) {
            return self.palette.selected;
        }
        self.ramp.sample_score(feature.score)
    }
}

// ---------------------------------------------------------------------------
// Repaint system
// ---------------------------------------------------------------------------

/// Push the current feature collection and per-feature fills to the surface
/// whenever anything that feeds the expression changed. Runs after the Grow
/// input and scoring sets, so strategy changes repaint in the same frame.
pub fn repaint_surface(
    interaction: Res<InteractionState>,
    mode: Res<State<ViewMode>>,
    suburbs: Res<SuburbCollection>,
    ramp_choice: Res<ScoreRampChoice>,
    surface: Option<ResMut<MapSurfaceHandle>>,
) {
    let dirty = interaction.is_changed()
        || mode.is_changed()
        || suburbs.is_changed()
        || ramp_choice.is_changed();
    if !dirty {
        return;
    }
    // No surface attached yet, or the canvas is still initializing: no-op.
    let Some(mut surface) = surface else {
        return;
    };
    if !surface.0.is_ready() {
        return;
    }

    let spec = PaintSpec::for_state(&interaction, *mode.get(), ramp_choice.ramp());
    surface.0.push_features(&suburbs.features);
    for feature in &suburbs.features {
        let fill = spec.resolve(feature);
        surface.0.set_feature_fill(&feature.id, fill);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

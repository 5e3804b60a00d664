//! Domain logic for the Grow suburb map: strategy presets, suburb features,
//! the suburb scorer, and the pointer/search/click interaction coordinator.
//!
//! Everything here is headless. The actual map canvas is a collaborator owned
//! by the embedding shell; this crate only produces state for the rendering
//! crate to paint.

use bevy::prelude::*;

pub mod config;
pub mod fetch;
pub mod interaction;
pub mod kpi;
pub mod scoring;
pub mod strategy;
pub mod suburbs;

/// System ordering for the Grow update cycle.
///
/// Input (pointer/search/fetch) runs before scoring, which runs before the
/// rendering crate's paint set, so a strategy change and the repaint it
/// triggers land in the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowSet {
    /// Pointer, search, camera, and fetch-poll systems.
    Input,
    /// Score recomputation on strategy changes.
    Score,
    /// Surface repaint (systems live in the rendering crate).
    Paint,
}

/// Registers every Grow resource, event, and system.
pub struct GrowPlugin;

impl Plugin for GrowPlugin {
    fn build(&self, app: &mut App) {
        // Headless hosts (tests, the demo binary) don't carry DefaultPlugins,
        // so make sure state transitions are driven.
        if !app.is_plugin_added::<bevy::state::app::StatesPlugin>() {
            app.add_plugins(bevy::state::app::StatesPlugin);
        }

        app.configure_sets(
            Update,
            (GrowSet::Input, GrowSet::Score, GrowSet::Paint).chain(),
        );

        app.init_resource::<config::GrowConfig>()
            .init_resource::<strategy::StrategyLibrary>()
            .init_resource::<suburbs::SuburbCollection>()
            .init_resource::<fetch::SuburbFetch>()
            .init_resource::<interaction::InteractionState>()
            .init_resource::<interaction::MapCursor>();

        // Seed the jitter RNG from config (which the host may have inserted
        // before this plugin) so score sequences are reproducible.
        let seed = app.world().resource::<config::GrowConfig>().score_seed;
        app.insert_resource(scoring::ScoreRng::seeded(seed));

        app.init_state::<interaction::ViewMode>();

        app.add_event::<interaction::PointerMoved>()
            .add_event::<interaction::PointerLeft>()
            .add_event::<interaction::PointerClicked>()
            .add_event::<interaction::CameraMoved>()
            .add_event::<interaction::SearchRequested>()
            .add_event::<interaction::ClearSearch>()
            .add_event::<interaction::SuburbClicked>()
            .add_event::<fetch::SuburbsLoaded>();

        app.add_systems(
            Update,
            (
                fetch::poll_suburb_fetch,
                interaction::hover_system,
                interaction::pointer_leave_system,
                interaction::camera_moved_system,
                interaction::search_system,
                interaction::clear_search_system,
                interaction::click_system,
            )
                .chain()
                .in_set(GrowSet::Input),
        );
        app.add_systems(
            Update,
            scoring::apply_strategy_scores.in_set(GrowSet::Score),
        );
        app.add_systems(
            OnEnter(interaction::ViewMode::Explore),
            interaction::clear_selection_on_explore,
        );
    }
}

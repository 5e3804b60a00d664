//! The interaction coordinator: hover, search, and selection state for the
//! suburb map, driven by pointer and camera events from the embedding shell.
//!
//! The three flags in [`InteractionState`] are independent. Each is cleared
//! only by its own trigger: hover by pointer-leave or moving off a feature,
//! search by a user-initiated camera move or an explicit clear, selection by
//! leaving the single-suburb detail view. Lookups that miss every polygon are
//! no-ops throughout — there are no failure states in this tier.

use bevy::prelude::*;

use crate::config::GrowConfig;
use crate::kpi::KpiSnapshot;
use crate::scoring::{score, ScoreRng};
use crate::strategy::StrategyLibrary;
use crate::suburbs::{SuburbCollection, SuburbId};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Whether the map shows the full suburb grid or a single selected suburb.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Explore,
    SuburbDetail,
}

/// Hover / search / selection flags. Mutually independent; no ordering
/// constraint between them.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered: Option<SuburbId>,
    pub searched: Option<SuburbId>,
    pub selected: Option<SuburbId>,
}

/// Cursor style the shell should apply over the map canvas.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapCursor {
    #[default]
    Default,
    Pointer,
}

// ---------------------------------------------------------------------------
// Input events (sent by the embedding shell)
// ---------------------------------------------------------------------------

/// Pointer moved over the map canvas.
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerMoved {
    /// Map-space position under the pointer.
    pub position: Vec2,
    /// Screen-space position, forwarded into click payloads.
    pub screen: Vec2,
    /// Current map zoom level.
    pub zoom: f32,
}

/// Pointer left the map canvas.
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerLeft;

/// Left-click on the map canvas.
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerClicked {
    pub position: Vec2,
    pub screen: Vec2,
}

/// User-initiated pan or zoom.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraMoved;

/// Search resolved to map coordinates (e.g. from the address search box).
#[derive(Event, Debug, Clone, Copy)]
pub struct SearchRequested {
    pub position: Vec2,
}

/// Explicitly dismiss the search highlight.
#[derive(Event, Debug, Clone, Copy)]
pub struct ClearSearch;

// ---------------------------------------------------------------------------
// Output event
// ---------------------------------------------------------------------------

/// Emitted when a click lands on a suburb: everything the shell needs to
/// render the suburb popup. Consuming this event is the host's job; clicking
/// mutates no interaction state.
#[derive(Event, Debug, Clone)]
pub struct SuburbClicked {
    pub id: SuburbId,
    pub name: Option<String>,
    pub code: Option<String>,
    pub score: u8,
    pub kpis: KpiSnapshot,
    /// Screen-space anchor for the popup.
    pub screen: Vec2,
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Track the hovered suburb. Only the latest pointer position in a frame
/// matters. Below the zoom threshold hovering is disabled entirely.
pub fn hover_system(
    mut moved: EventReader<PointerMoved>,
    config: Res<GrowConfig>,
    suburbs: Res<SuburbCollection>,
    mut state: ResMut<InteractionState>,
    mut cursor: ResMut<MapCursor>,
) {
    let Some(event) = moved.read().last() else {
        return;
    };
    let hovered = if event.zoom >= config.hover_min_zoom {
        suburbs.feature_at(event.position).map(|f| f.id.clone())
    } else {
        None
    };
    let style = if hovered.is_some() {
        MapCursor::Pointer
    } else {
        MapCursor::Default
    };
    if state.hovered != hovered {
        state.hovered = hovered;
    }
    if *cursor != style {
        *cursor = style;
    }
}

/// Pointer-leave clears the hover unconditionally.
pub fn pointer_leave_system(
    mut left: EventReader<PointerLeft>,
    mut state: ResMut<InteractionState>,
    mut cursor: ResMut<MapCursor>,
) {
    if left.is_empty() {
        return;
    }
    left.clear();
    if state.hovered.is_some() {
        state.hovered = None;
    }
    if *cursor != MapCursor::Default {
        *cursor = MapCursor::Default;
    }
}

/// A user-initiated pan or zoom dismisses the search highlight. Hover is
/// untouched; the next pointer move re-evaluates it anyway.
pub fn camera_moved_system(
    mut moved: EventReader<CameraMoved>,
    mut state: ResMut<InteractionState>,
) {
    if moved.is_empty() {
        return;
    }
    moved.clear();
    if state.searched.is_some() {
        state.searched = None;
    }
}

/// Resolve a search position to its containing suburb. A position outside
/// every boundary is a no-op rather than an error.
pub fn search_system(
    mut requests: EventReader<SearchRequested>,
    suburbs: Res<SuburbCollection>,
    mut state: ResMut<InteractionState>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };
    if let Some(feature) = suburbs.feature_at(request.position) {
        let id = feature.id.clone();
        if state.searched.as_ref() != Some(&id) {
            state.searched = Some(id);
        }
    }
}

/// Explicit clear from the search UI.
pub fn clear_search_system(
    mut clears: EventReader<ClearSearch>,
    mut state: ResMut<InteractionState>,
) {
    if clears.is_empty() {
        return;
    }
    clears.clear();
    if state.searched.is_some() {
        state.searched = None;
    }
}

/// Score the clicked suburb and hand the popup payload to the host.
pub fn click_system(
    mut clicks: EventReader<PointerClicked>,
    suburbs: Res<SuburbCollection>,
    library: Res<StrategyLibrary>,
    mut rng: ResMut<ScoreRng>,
    mut out: EventWriter<SuburbClicked>,
) {
    for click in clicks.read() {
        let Some(feature) = suburbs.feature_at(click.position) else {
            continue;
        };
        let Some(active) = library.active() else {
            continue;
        };
        out.send(SuburbClicked {
            id: feature.id.clone(),
            name: feature.name.clone(),
            code: feature.code.clone(),
            score: score(feature.id.as_str(), active, &mut rng.0),
            kpis: KpiSnapshot::mock_for(feature.id.as_str()),
            screen: click.screen,
        });
    }
}

/// Returning to the full map drops the single-suburb selection.
pub fn clear_selection_on_explore(mut state: ResMut<InteractionState>) {
    if state.selected.is_some() {
        state.selected = None;
    }
}

/// Enter the single-suburb detail view for `id`.
pub fn enter_suburb_detail(
    state: &mut InteractionState,
    next: &mut NextState<ViewMode>,
    id: SuburbId,
) {
    state.selected = Some(id);
    next.set(ViewMode::SuburbDetail);
}

/// Leave the detail view; selection is cleared on the `Explore` transition.
pub fn exit_suburb_detail(next: &mut NextState<ViewMode>) {
    next.set(ViewMode::Explore);
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HOVER_MIN_ZOOM;
    use crate::suburbs::{Polygon, SuburbFeature};
    use crate::GrowPlugin;

    fn square_at(x: f32) -> Polygon {
        Polygon::new(vec![
            Vec2::new(x, 0.0),
            Vec2::new(x + 1.0, 0.0),
            Vec2::new(x + 1.0, 1.0),
            Vec2::new(x, 1.0),
        ])
    }

    fn harness() -> App {
        let mut app = App::new();
        app.add_plugins(GrowPlugin);
        app.insert_resource(SuburbCollection::new(vec![
            SuburbFeature::new("3056", square_at(0.0)).with_name("Brunswick"),
            SuburbFeature::new("3058", square_at(2.0)).with_name("Coburg"),
        ]));
        app
    }

    fn interaction(app: &App) -> &InteractionState {
        app.world().resource::<InteractionState>()
    }

    fn move_pointer(app: &mut App, position: Vec2, zoom: f32) {
        app.world_mut().send_event(PointerMoved {
            position,
            screen: Vec2::new(400.0, 300.0),
            zoom,
        });
        app.update();
    }

    #[test]
    fn hover_sets_feature_and_cursor_at_high_zoom() {
        let mut app = harness();
        move_pointer(&mut app, Vec2::new(0.5, 0.5), HOVER_MIN_ZOOM + 1.0);
        assert_eq!(interaction(&app).hovered, Some(SuburbId::from("3056")));
        assert_eq!(*app.world().resource::<MapCursor>(), MapCursor::Pointer);
    }

    #[test]
    fn hover_disabled_below_zoom_threshold() {
        let mut app = harness();
        move_pointer(&mut app, Vec2::new(0.5, 0.5), HOVER_MIN_ZOOM - 0.1);
        assert_eq!(interaction(&app).hovered, None);
        assert_eq!(*app.world().resource::<MapCursor>(), MapCursor::Default);
    }

    #[test]
    fn hover_clears_when_moving_off_features() {
        let mut app = harness();
        move_pointer(&mut app, Vec2::new(0.5, 0.5), 10.0);
        move_pointer(&mut app, Vec2::new(-5.0, 0.5), 10.0);
        assert_eq!(interaction(&app).hovered, None);
    }

    #[test]
    fn pointer_leave_always_clears_hover() {
        let mut app = harness();
        move_pointer(&mut app, Vec2::new(0.5, 0.5), 10.0);
        app.world_mut().send_event(PointerLeft);
        app.update();
        assert_eq!(interaction(&app).hovered, None);
        assert_eq!(*app.world().resource::<MapCursor>(), MapCursor::Default);
    }

    #[test]
    fn search_sets_containing_suburb() {
        let mut app = harness();
        app.world_mut().send_event(SearchRequested {
            position: Vec2::new(2.5, 0.5),
        });
        app.update();
        assert_eq!(interaction(&app).searched, Some(SuburbId::from("3058")));
    }

    #[test]
    fn search_miss_is_a_noop() {
        let mut app = harness();
        app.world_mut().send_event(SearchRequested {
            position: Vec2::new(2.5, 0.5),
        });
        app.update();
        app.world_mut().send_event(SearchRequested {
            position: Vec2::new(100.0, 100.0),
        });
        app.update();
        // The earlier hit survives a missed search.
        assert_eq!(interaction(&app).searched, Some(SuburbId::from("3058")));
    }

    #[test]
    fn camera_move_clears_search_but_not_hover() {
        let mut app = harness();
        move_pointer(&mut app, Vec2::new(0.5, 0.5), 10.0);
        app.world_mut().send_event(SearchRequested {
            position: Vec2::new(2.5, 0.5),
        });
        app.update();

        app.world_mut().send_event(CameraMoved);
        app.update();
        assert_eq!(interaction(&app).searched, None);
        assert_eq!(interaction(&app).hovered, Some(SuburbId::from("3056")));
    }

    #[test]
    fn clear_search_event_dismisses_highlight() {
        let mut app = harness();
        app.world_mut().send_event(SearchRequested {
            position: Vec2::new(0.5, 0.5),
        });
        app.update();
        app.world_mut().send_event(ClearSearch);
        app.update();
        assert_eq!(interaction(&app).searched, None);
    }

    #[test]
    fn click_emits_payload_without_touching_state() {
        let mut app = harness();
        // "Long-Term Growth": growth 30 → +15, yield 25 → no jitter.
        app.world_mut()
            .resource_mut::<StrategyLibrary>()
            .set_active(2);
        app.update();

        app.world_mut().send_event(PointerClicked {
            position: Vec2::new(0.5, 0.5),
            screen: Vec2::new(120.0, 80.0),
        });
        app.update();

        let events = app.world().resource::<Events<SuburbClicked>>();
        let mut cursor = events.get_cursor();
        let clicked: Vec<&SuburbClicked> = cursor.read(events).collect();
        assert_eq!(clicked.len(), 1);
        let payload = clicked[0];
        assert_eq!(payload.id, SuburbId::from("3056"));
        assert_eq!(payload.name.as_deref(), Some("Brunswick"));
        assert_eq!(payload.score, 81);
        assert_eq!(payload.screen, Vec2::new(120.0, 80.0));
        assert_eq!(*interaction(&app), InteractionState::default());
    }

    #[test]
    fn click_on_void_emits_nothing() {
        let mut app = harness();
        app.world_mut().send_event(PointerClicked {
            position: Vec2::new(50.0, 50.0),
            screen: Vec2::ZERO,
        });
        app.update();

        let events = app.world().resource::<Events<SuburbClicked>>();
        let mut cursor = events.get_cursor();
        assert_eq!(cursor.read(events).count(), 0);
    }

    #[test]
    fn leaving_detail_view_clears_selection() {
        let mut app = harness();
        app.update();
        {
            let world = app.world_mut();
            world.resource_mut::<InteractionState>().selected = Some(SuburbId::from("3056"));
            world
                .resource_mut::<NextState<ViewMode>>()
                .set(ViewMode::SuburbDetail);
        }
        app.update();
        assert_eq!(interaction(&app).selected, Some(SuburbId::from("3056")));

        app.world_mut()
            .resource_mut::<NextState<ViewMode>>()
            .set(ViewMode::Explore);
        app.update();
        assert_eq!(interaction(&app).selected, None);
    }
}

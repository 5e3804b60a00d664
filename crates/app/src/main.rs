//! Headless demo for the Grow suburb map.
//!
//! Wires the Grow and rendering plugins to an ASCII surface, loads a small
//! inner-Melbourne suburb set through the fetch path, then scripts the
//! interactions a user would perform: switch strategy, hover, search, click.
//! Each step logs the rendered frame.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use grow::fetch::SuburbFetch;
use grow::interaction::{
    CameraMoved, PointerClicked, PointerMoved, SearchRequested, SuburbClicked,
};
use grow::strategy::StrategyLibrary;
use grow::suburbs::{Polygon, SuburbFeature};
use grow::GrowPlugin;
use rendering::ascii_surface::AsciiSurface;
use rendering::paint::{MapSurfaceHandle, SharedSurface};
use rendering::RenderingPlugin;

/// Demo feature set: four suburbs as unit squares on a 4x2 map.
fn demo_suburbs() -> Vec<SuburbFeature> {
    let square = |x: f32, y: f32| {
        Polygon::new(vec![
            Vec2::new(x, y),
            Vec2::new(x + 2.0, y),
            Vec2::new(x + 2.0, y + 1.0),
            Vec2::new(x, y + 1.0),
        ])
    };
    vec![
        SuburbFeature::new("3056", square(0.0, 1.0))
            .with_name("Brunswick")
            .with_code("20307"),
        SuburbFeature::new("3058", square(2.0, 1.0))
            .with_name("Coburg")
            .with_code("20572"),
        SuburbFeature::new("3065", square(0.0, 0.0))
            .with_name("Fitzroy")
            .with_code("21021"),
        SuburbFeature::new("3053", square(2.0, 0.0))
            .with_name("Carlton")
            .with_code("20439"),
    ]
}

fn log_frame(label: &str, surface: &SharedSurface<AsciiSurface>) {
    if let Ok(surface) = surface.0.lock() {
        info!("{label}:\n{}", surface.render());
    }
}

fn log_clicks(app: &App) {
    let events = app.world().resource::<Events<SuburbClicked>>();
    let mut cursor = events.get_cursor();
    for click in cursor.read(events) {
        info!(
            "clicked {} ({}): score {} | yield {:.1}% vacancy {:.1}% growth {:.1}% at {:?}",
            click.name.as_deref().unwrap_or(click.id.as_str()),
            click.code.as_deref().unwrap_or("-"),
            click.score,
            click.kpis.yield_pct,
            click.kpis.vacancy_pct,
            click.kpis.growth_5y_pct,
            click.screen,
        );
    }
}

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins((GrowPlugin, RenderingPlugin));

    let mut ascii = AsciiSurface::new(48, 8);
    ascii.fit_bounds(Rect::new(0.0, 0.0, 4.0, 2.0));
    let surface = SharedSurface::new(ascii);
    app.insert_resource(MapSurfaceHandle(Box::new(surface.clone())));

    // Load the demo set through the fetch path and score it with the default
    // "Cash Flow Focus" preset.
    app.world_mut()
        .resource_mut::<SuburbFetch>()
        .queue_static(demo_suburbs());
    app.update();
    log_frame("cash flow focus", &surface);

    // Switch to "Long-Term Growth" — every suburb is rescored and repainted.
    app.world_mut()
        .resource_mut::<StrategyLibrary>()
        .set_active(2);
    app.update();
    log_frame("long-term growth", &surface);

    // Hover Brunswick at street-level zoom.
    app.world_mut().send_event(PointerMoved {
        position: Vec2::new(1.0, 1.5),
        screen: Vec2::new(320.0, 120.0),
        zoom: 12.0,
    });
    app.update();
    log_frame("hovering Brunswick", &surface);

    // Search lands on Carlton; the search highlight outranks the hover.
    app.world_mut().send_event(SearchRequested {
        position: Vec2::new(3.0, 0.5),
    });
    app.update();
    log_frame("searched Carlton", &surface);

    // Click Coburg: the popup payload is emitted, state stays as-is.
    app.world_mut().send_event(PointerClicked {
        position: Vec2::new(3.0, 1.5),
        screen: Vec2::new(520.0, 140.0),
    });
    app.update();
    log_clicks(&app);

    // Panning dismisses the search highlight.
    app.world_mut().send_event(CameraMoved);
    app.update();
    log_frame("after pan", &surface);
}

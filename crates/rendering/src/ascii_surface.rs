//! ASCII map surface for headless runs.
//!
//! Renders the suburb collection into a character grid: one character per
//! cell, sampled at the cell center. Painted suburbs show a brightness digit
//! derived from their fill color, unpainted suburbs `#`, empty map `.`.
//! Built on demand from the stored state — no per-frame systems needed.

use std::collections::HashMap;

use bevy::prelude::*;

use grow::suburbs::{SuburbFeature, SuburbId};

use crate::paint::MapSurface;

/// Brightness digit for a fill color: relative luminance quantized to 0–9.
pub fn shade_char(color: Color) -> char {
    let s = color.to_srgba();
    let lum = 0.2126 * s.red + 0.7152 * s.green + 0.0722 * s.blue;
    let decile = (lum * 10.0).clamp(0.0, 9.0) as u8;
    char::from(b'0' + decile)
}

/// Character-grid implementation of [`MapSurface`].
///
/// Not ready until [`AsciiSurface::fit_bounds`] is called, which mirrors a
/// real canvas that ignores paint calls before its style has loaded.
pub struct AsciiSurface {
    width: usize,
    height: usize,
    bounds: Option<Rect>,
    features: Vec<SuburbFeature>,
    fills: HashMap<SuburbId, Color>,
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bounds: None,
            features: Vec::new(),
            fills: HashMap::new(),
        }
    }

    /// Set the viewport. The surface reports ready from here on.
    pub fn fit_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    /// Render the current frame, north-up, rows separated by newlines.
    pub fn render(&self) -> String {
        let Some(bounds) = self.bounds else {
            return String::new();
        };
        let size = bounds.size();
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                let point = bounds.min
                    + Vec2::new(
                        (col as f32 + 0.5) / self.width as f32 * size.x,
                        (row as f32 + 0.5) / self.height as f32 * size.y,
                    );
                out.push(self.char_at(point));
            }
            out.push('\n');
        }
        out
    }

    fn char_at(&self, point: Vec2) -> char {
        let Some(feature) = self.features.iter().find(|f| f.polygon.contains(point)) else {
            return '.';
        };
        match self.fills.get(&feature.id) {
            Some(&fill) => shade_char(fill),
            None => '#',
        }
    }
}

impl MapSurface for AsciiSurface {
    fn is_ready(&self) -> bool {
        self.bounds.is_some()
    }

    fn push_features(&mut self, features: &[SuburbFeature]) {
        self.features = features.to_vec();
        self.fills.retain(|id, _| features.iter().any(|f| &f.id == id));
    }

    fn set_feature_fill(&mut self, id: &SuburbId, color: Color) {
        self.fills.insert(id.clone(), color);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use grow::suburbs::Polygon;

    fn square_at(x: f32) -> Polygon {
        Polygon::new(vec![
            Vec2::new(x, 0.0),
            Vec2::new(x + 1.0, 0.0),
            Vec2::new(x + 1.0, 1.0),
            Vec2::new(x, 1.0),
        ])
    }

    fn two_suburb_surface() -> AsciiSurface {
        let mut surface = AsciiSurface::new(4, 1);
        surface.fit_bounds(Rect::new(0.0, 0.0, 4.0, 1.0));
        surface.push_features(&[
            SuburbFeature::new("3056", square_at(0.0)),
            SuburbFeature::new("3058", square_at(2.0)),
        ]);
        surface
    }

    #[test]
    fn not_ready_until_bounds_are_set() {
        let surface = AsciiSurface::new(4, 4);
        assert!(!surface.is_ready());
        assert_eq!(surface.render(), "");
    }

    #[test]
    fn unpainted_features_render_as_hash() {
        let surface = two_suburb_surface();
        assert_eq!(surface.render(), "#.#.\n");
    }

    #[test]
    fn fills_render_as_brightness_digits() {
        let mut surface = two_suburb_surface();
        surface.set_feature_fill(&SuburbId::from("3056"), Color::srgb(0.0, 1.0, 0.0));
        surface.set_feature_fill(&SuburbId::from("3058"), Color::srgb(1.0, 0.0, 0.0));
        // lime luminance ≈ 0.72 → '7'; red ≈ 0.21 → '2'
        assert_eq!(surface.render(), "7.2.\n");
    }

    #[test]
    fn pushing_features_drops_stale_fills() {
        let mut surface = two_suburb_surface();
        surface.set_feature_fill(&SuburbId::from("3058"), Color::WHITE);
        surface.push_features(&[SuburbFeature::new("3056", square_at(0.0))]);
        assert_eq!(surface.render(), "#...\n");
    }

    #[test]
    fn shade_orders_by_luminance() {
        let dark = shade_char(Color::srgb(0.05, 0.05, 0.05));
        let mid = shade_char(Color::srgb(0.5, 0.5, 0.5));
        let bright = shade_char(Color::srgb(1.0, 1.0, 1.0));
        assert!(dark < mid && mid < bright);
    }
}

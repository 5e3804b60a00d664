//! Suburb features: polygon boundaries keyed by postcode-style identifiers,
//! with a mock score that the scorer rewrites in place on strategy changes.

use bevy::prelude::*;

use crate::config::DEFAULT_SCORE;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Suburb identifier, e.g. the postcode `"3056"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuburbId(pub String);

impl SuburbId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SuburbId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for SuburbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A suburb boundary: a single exterior ring in map coordinates.
///
/// The ring is treated as implicitly closed (last vertex connects back to the
/// first). The scorer never reads geometry; it exists for containment lookups
/// and viewport bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<Vec2>,
}

impl Polygon {
    pub fn new(exterior: Vec<Vec2>) -> Self {
        Self { exterior }
    }

    /// Ray-casting point containment. Points on an edge count as inside;
    /// degenerate rings (fewer than 3 vertices) contain nothing.
    pub fn contains(&self, point: Vec2) -> bool {
        let ring = &self.exterior;
        if ring.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[j];
            if (a.y > point.y) != (b.y > point.y) {
                let slope_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
                if point.x < slope_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Axis-aligned bounds of the ring. Empty rings produce a zero rect.
    pub fn bounds(&self) -> Rect {
        let mut iter = self.exterior.iter();
        let Some(&first) = iter.next() else {
            return Rect::default();
        };
        let mut rect = Rect::from_corners(first, first);
        for &p in iter {
            rect = rect.union_point(p);
        }
        rect
    }
}

// ---------------------------------------------------------------------------
// Features and the collection
// ---------------------------------------------------------------------------

/// One suburb on the map. `score` is a display value recomputed on every
/// strategy change and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SuburbFeature {
    pub id: SuburbId,
    /// Official locality code, when the source supplies one.
    pub code: Option<String>,
    /// Display name, when the source supplies one.
    pub name: Option<String>,
    pub score: u8,
    pub polygon: Polygon,
}

impl SuburbFeature {
    pub fn new(id: impl Into<String>, polygon: Polygon) -> Self {
        Self {
            id: SuburbId(id.into()),
            code: None,
            name: None,
            score: DEFAULT_SCORE,
            polygon,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// The full feature set currently loaded on the map.
#[derive(Resource, Debug, Clone, Default)]
pub struct SuburbCollection {
    pub features: Vec<SuburbFeature>,
}

impl SuburbCollection {
    pub fn new(features: Vec<SuburbFeature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: &SuburbId) -> Option<&SuburbFeature> {
        self.features.iter().find(|f| &f.id == id)
    }

    pub fn get_mut(&mut self, id: &SuburbId) -> Option<&mut SuburbFeature> {
        self.features.iter_mut().find(|f| &f.id == id)
    }

    /// First feature whose polygon contains `point`. Suburb boundaries do not
    /// overlap in practice, so first-match is fine.
    pub fn feature_at(&self, point: Vec2) -> Option<&SuburbFeature> {
        self.features.iter().find(|f| f.polygon.contains(point))
    }

    /// Union of all feature bounds, for fit-to-viewport calculations.
    pub fn bounds(&self) -> Rect {
        self.features
            .iter()
            .map(|f| f.polygon.bounds())
            .reduce(|acc, r| acc.union(r))
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

//! Color ramps and highlight colors for the suburb score overlay.
//!
//! The score ramp is a 5-stop linear interpolation over the score range
//! (0 red, 25 orange, 50 yellow, 75 lime, 100 green), matching the CSS named
//! colors the web shell uses. A blue-to-yellow alternative is provided for
//! red-green color vision deficiency.

use bevy::prelude::*;

// ---------------------------------------------------------------------------
// Continuous color ramps
// ---------------------------------------------------------------------------

/// A continuous color ramp defined by evenly-spaced sRGB control points.
/// Interpolates linearly in sRGB space for a given `t` in `[0, 1]`.
pub struct ColorRamp {
    /// Control points as `[r, g, b]` in sRGB, evenly spaced from t=0..1.
    points: &'static [[f32; 3]],
}

impl ColorRamp {
    /// Sample the ramp at parameter `t` (clamped to `[0, 1]`).
    pub fn sample(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let n = self.points.len();
        if n == 0 {
            return Color::BLACK;
        }
        if n == 1 {
            let p = self.points[0];
            return Color::srgb(p[0], p[1], p[2]);
        }
        let max_idx = (n - 1) as f32;
        let scaled = t * max_idx;
        let lo = (scaled as usize).min(n - 2);
        let hi = lo + 1;
        let frac = scaled - lo as f32;
        let a = self.points[lo];
        let b = self.points[hi];
        Color::srgb(
            a[0] + (b[0] - a[0]) * frac,
            a[1] + (b[1] - a[1]) * frac,
            a[2] + (b[2] - a[2]) * frac,
        )
    }

    /// Sample the ramp for a 0–100 score.
    pub fn sample_score(&self, score: u8) -> Color {
        self.sample(f32::from(score) / 100.0)
    }
}

/// The default score ramp. Stops at scores 0, 25, 50, 75, 100 using the CSS
/// `red`, `orange`, `yellow`, `lime`, `green` values.
pub static SCORE_RAMP: ColorRamp = ColorRamp {
    points: &[
        [1.0, 0.0, 0.0],   // 0   - red
        [1.0, 0.647, 0.0], // 25  - orange
        [1.0, 1.0, 0.0],   // 50  - yellow
        [0.0, 1.0, 0.0],   // 75  - lime
        [0.0, 0.502, 0.0], // 100 - green
    ],
};

/// Blue-to-yellow alternative (cividis stops) for red-green color vision
/// deficiency. Avoids the red/orange/green hues of the default ramp entirely.
pub static SCORE_RAMP_CVD: ColorRamp = ColorRamp {
    points: &[
        [0.000, 0.135, 0.305], // 0   - dark navy
        [0.245, 0.311, 0.363],
        [0.349, 0.408, 0.364],
        [0.533, 0.552, 0.302],
        [0.940, 0.749, 0.000], // 100 - warm yellow
    ],
};

/// Which score ramp the repaint uses.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreRampChoice {
    #[default]
    Standard,
    ColorVisionDeficient,
}

impl ScoreRampChoice {
    pub fn ramp(self) -> &'static ColorRamp {
        match self {
            Self::Standard => &SCORE_RAMP,
            Self::ColorVisionDeficient => &SCORE_RAMP_CVD,
        }
    }
}

// ---------------------------------------------------------------------------
// Highlight colors
// ---------------------------------------------------------------------------

/// Fill colors for the three interaction highlights.
pub struct HighlightPalette {
    /// Suburb matched by the address search.
    pub searched: Color,
    /// Suburb under the pointer.
    pub hovered: Color,
    /// The suburb whose detail view is open.
    pub selected: Color,
}

/// Search wins over hover wins over selection; the colors are the CSS
/// `green`, `orange`, and `blue` the web shell always used.
pub static HIGHLIGHTS: HighlightPalette = HighlightPalette {
    searched: Color::srgb(0.0, 0.502, 0.0),
    hovered: Color::srgb(1.0, 0.647, 0.0),
    selected: Color::srgb(0.0, 0.0, 1.0),
};

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

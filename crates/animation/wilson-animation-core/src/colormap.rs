//! Color map lookup.
//!
//! Stops are searched with the same clamp policy as curves, but blending is
//! always linear across all four channels (no easing modes apply).

use serde::{Deserialize, Serialize};
use wilson_api_core::{Color, ColorStop, Project};

use crate::config::Config;

/// Range nudge applied when `min == max`, keeping `1 / (max - min)` finite.
pub const RANGE_EPSILON: f64 = 1e-7;

/// Color for `value`. Empty maps and color-less stops read as opaque black.
pub fn lookup(stops: &[ColorStop], value: f64) -> Color {
    let Some(first) = stops.first() else {
        return Color::BLACK;
    };
    let idx = stops.partition_point(|s| s.value <= value);
    if idx == stops.len() {
        return stops[stops.len() - 1].color.unwrap_or(Color::BLACK);
    }
    if idx == 0 {
        return first.color.unwrap_or(Color::BLACK);
    }

    let before = &stops[idx - 1];
    let after = &stops[idx];
    match (before.color, after.color) {
        (Some(a), Some(b)) => {
            let lambda = (value - before.value) / (after.value - before.value);
            a.lerp(b, lambda as f32)
        }
        _ => Color::BLACK,
    }
}

/// Scalar range mapped onto the full color map.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    min: f64,
    max: f64,
}

impl ColorRange {
    pub fn new(min: f64, max: f64) -> Self {
        let mut range = Self { min, max };
        range.sanitize();
        range
    }

    /// First to last stop, or `0..1` for maps with fewer than two stops.
    pub fn for_stops(stops: &[ColorStop]) -> Self {
        match (stops.first(), stops.last()) {
            (Some(first), Some(last)) if stops.len() > 1 => Self::new(first.value, last.value),
            _ => Self::new(0.0, 1.0),
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn set_min(&mut self, min: f64) {
        self.min = min;
        self.sanitize();
    }

    pub fn set_max(&mut self, max: f64) {
        self.max = max;
        self.sanitize();
    }

    /// Position of `value` inside the range, clamped to [0,1].
    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    fn sanitize(&mut self) {
        if self.min == self.max {
            self.max += RANGE_EPSILON;
        }
    }
}

/// A color map together with the adjustable scalar range shown through it.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    stops: Vec<ColorStop>,
    range: ColorRange,
}

impl ColorScale {
    pub fn new(stops: Vec<ColorStop>) -> Self {
        let range = ColorRange::for_stops(&stops);
        Self { stops, range }
    }

    pub fn from_project(project: &Project) -> Self {
        Self::new(project.colormap_stops().to_vec())
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn range(&self) -> &ColorRange {
        &self.range
    }

    pub fn range_mut(&mut self) -> &mut ColorRange {
        &mut self.range
    }

    /// Color for `value` after normalizing it against the current range.
    /// With the default range this equals [`lookup`] on the stops.
    pub fn map(&self, value: f64) -> Color {
        let u = self.range.normalize(value);
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) if self.stops.len() > 1 => {
                lookup(&self.stops, first.value + u * (last.value - first.value))
            }
            _ => lookup(&self.stops, value),
        }
    }

    /// RGBA8 table at the configured color map resolution.
    pub fn bake(&self, cfg: &Config) -> Vec<[u8; 4]> {
        bake_colormap(&self.stops, cfg.colormap_resolution)
    }
}

/// RGBA8 table sampled uniformly across the stop domain; texel `i` holds the
/// color at `first + i / resolution * (last - first)`.
pub fn bake_colormap(stops: &[ColorStop], resolution: usize) -> Vec<[u8; 4]> {
    match stops {
        [] => vec![Color::BLACK.to_rgba8()],
        [only] => vec![only.color.unwrap_or(Color::BLACK).to_rgba8()],
        [first, .., last] => {
            let start = first.value;
            let period = last.value - start;
            let resolution = resolution.max(1);
            (0..resolution)
                .map(|i| {
                    let v = i as f64 / resolution as f64 * period + start;
                    lookup(stops, v).to_rgba8()
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);

    fn red_blue() -> Vec<ColorStop> {
        vec![ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)]
    }

    #[test]
    fn empty_and_single_stop() {
        assert_eq!(lookup(&[], 0.3), Color::BLACK);
        let single = [ColorStop::new(2.0, BLUE)];
        for v in [-10.0, 2.0, 50.0] {
            assert_eq!(lookup(&single, v), BLUE);
        }
    }

    #[test]
    fn midpoint_blends_all_channels() {
        assert_eq!(lookup(&red_blue(), 0.5), Color::rgba(0.5, 0.0, 0.5, 1.0));
        let fade = [
            ColorStop::new(0.0, Color::rgba(0.0, 0.0, 0.0, 0.0)),
            ColorStop::new(2.0, Color::rgba(1.0, 1.0, 1.0, 1.0)),
        ];
        assert_eq!(lookup(&fade, 0.5), Color::rgba(0.25, 0.25, 0.25, 0.25));
    }

    #[test]
    fn clamps_outside_domain() {
        assert_eq!(lookup(&red_blue(), -3.0), RED);
        assert_eq!(lookup(&red_blue(), 1.0), BLUE);
        assert_eq!(lookup(&red_blue(), 7.0), BLUE);
    }

    #[test]
    fn colorless_stop_reads_black() {
        let stops = [
            ColorStop::new(0.0, RED),
            ColorStop {
                value: 1.0,
                color: None,
            },
        ];
        assert_eq!(lookup(&stops, 0.5), Color::BLACK);
        assert_eq!(lookup(&stops, 9.0), Color::BLACK);
        assert_eq!(lookup(&stops, -1.0), RED);
    }

    #[test]
    fn degenerate_range_is_nudged() {
        let mut range = ColorRange::new(3.0, 3.0);
        assert_eq!(range.max(), 3.0 + RANGE_EPSILON);
        assert!(range.normalize(3.0).is_finite());
        range.set_min(range.max());
        assert!(range.max() > range.min());
        assert_eq!(ColorRange::for_stops(&[]), ColorRange::new(0.0, 1.0));
    }

    #[test]
    fn scale_respects_custom_range() {
        let mut scale = ColorScale::new(red_blue());
        assert_eq!(scale.map(0.5), lookup(&red_blue(), 0.5));
        scale.range_mut().set_min(10.0);
        scale.range_mut().set_max(20.0);
        assert_eq!(scale.map(15.0), Color::rgba(0.5, 0.0, 0.5, 1.0));
        assert_eq!(scale.map(0.0), RED);
    }

    #[test]
    fn baked_table() {
        assert_eq!(bake_colormap(&[], 8), vec![[0, 0, 0, 255]]);
        let table = bake_colormap(&red_blue(), 4);
        assert_eq!(table.len(), 4);
        assert_eq!(table[0], [255, 0, 0, 255]);
        assert_eq!(table[2], [128, 0, 128, 255]);

        let cfg = Config::default();
        assert_eq!(ColorScale::new(red_blue()).bake(&cfg).len(), cfg.colormap_resolution);
    }
}
